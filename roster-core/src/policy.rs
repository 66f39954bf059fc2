//! Authorization policy engine
//!
//! The single canonical allow/deny table for every action class. Handlers
//! contain no ad-hoc permission checks; they call [`authorize`] and map the
//! error to a response. Keeping the table in one unit-tested function means
//! a policy regression is caught without an HTTP harness.

use crate::error::{DirectoryError, Result};
use crate::user::Identity;

/// Action classes the policy decides over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListUsers,
    GetUser,
    UpdateUser,
    DeleteUser,
}

/// Decide whether `identity` may perform `action` against `target`.
///
/// | Action       | Requirement                            |
/// |--------------|----------------------------------------|
/// | `ListUsers`  | authenticated (any)                    |
/// | `GetUser`    | authenticated (any)                    |
/// | `UpdateUser` | authenticated AND (self OR admin)      |
/// | `DeleteUser` | authenticated AND admin                |
///
/// Anonymous identities are `Unauthorized`; authenticated identities
/// lacking permission are `Forbidden`. Never a silent no-op.
pub fn authorize(action: Action, identity: &Identity, target: Option<&str>) -> Result<()> {
    let (username, is_admin) = match identity {
        Identity::Anonymous => return Err(DirectoryError::Unauthorized),
        Identity::Authenticated { username, is_admin } => (username.as_str(), *is_admin),
    };

    match action {
        Action::ListUsers | Action::GetUser => Ok(()),
        Action::UpdateUser => {
            if is_admin || target == Some(username) {
                Ok(())
            } else {
                Err(DirectoryError::Forbidden(
                    "Only that user or an admin can edit a user".to_string(),
                ))
            }
        }
        Action::DeleteUser => {
            if is_admin {
                Ok(())
            } else {
                Err(DirectoryError::Forbidden(
                    "Admin access required".to_string(),
                ))
            }
        }
    }
}
