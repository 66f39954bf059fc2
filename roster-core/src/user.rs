//! User records, request identities, and request payloads
//!
//! ## Authentication Flow
//!
//! 1. **Registration**: an account is created with a username and password
//! 2. **Login**: credentials are verified, returning a signed bearer token
//! 3. **Requests**: each request presents the token; the server resolves it
//!    into an [`Identity`] before any handler runs
//!
//! ## Security
//!
//! - Passwords are hashed using Argon2id; the hash never leaves the server
//! - Tokens carry only the claims needed to rebuild an identity (username
//!   and admin flag) so resolution never touches the store

use serde::{Deserialize, Serialize};

/// Core user type for authentication and profile management
///
/// Represents a registered account. The password hash is never serialized
/// to prevent accidental exposure in responses or logs.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    /// Unique username, the record's primary key; immutable after creation
    pub username: String,
    /// Argon2id password hash (never serialized)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Server-controlled; not settable through the public update path
    pub is_admin: bool,
}

/// Projection returned by the list endpoint.
///
/// The username is intentionally absent: the published contract only
/// exposes profile fields here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl From<&UserRecord> for UserSummary {
    fn from(user: &UserRecord) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}

/// Registration request payload
///
/// # Example
///
/// ```json
/// {
///   "username": "alice",
///   "password": "secure_password",
///   "first_name": "Alice",
///   "last_name": "Anderson",
///   "email": "alice@example.com",
///   "phone": "555-0100"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    /// Plain text password (hashed before persistence)
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    /// Plain text password (verified against the stored hash)
    pub password: String,
}

/// The resolved notion of who is making a request.
///
/// Constructed fresh per request by the identity middleware, carried as a
/// request extension, and discarded when the request completes. An invalid
/// or missing credential resolves to [`Identity::Anonymous`], never to an
/// error and never to partial trust.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated { username: String, is_admin: bool },
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    /// Username of an authenticated identity, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated { username, .. } => Some(username),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Identity::Authenticated { is_admin: true, .. })
    }
}

/// JWT claims for bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to
    pub sub: String,
    /// Admin flag captured at issuance
    pub admin: bool,
    /// Expiration time (Unix epoch seconds)
    pub exp: i64,
    /// Issued at (Unix epoch seconds)
    pub iat: i64,
    /// Token ID
    pub jti: String,
}

impl Claims {
    /// Rebuild the identity this token vouches for.
    pub fn identity(&self) -> Identity {
        Identity::Authenticated {
            username: self.sub.clone(),
            is_admin: self.admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = UserRecord {
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Anderson".to_string(),
            email: "alice@example.com".to_string(),
            phone: "555-0100".to_string(),
            is_admin: false,
        };

        let json = serde_json::to_value(&user).expect("user serializes");
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn identity_accessors() {
        let anon = Identity::Anonymous;
        assert!(anon.is_anonymous());
        assert!(!anon.is_admin());
        assert_eq!(anon.username(), None);

        let admin = Identity::Authenticated {
            username: "root".to_string(),
            is_admin: true,
        };
        assert!(!admin.is_anonymous());
        assert!(admin.is_admin());
        assert_eq!(admin.username(), Some("root"));
    }
}
