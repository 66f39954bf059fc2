//! The user directory service
//!
//! Composes the persistence port, the credential manager, and the
//! change-set builder into the operations the HTTP surface exposes.
//! All authorization decisions live in [`crate::policy`], not here.

use std::sync::Arc;

use tracing::info;

use crate::changeset::{ChangeSet, UPDATABLE_FIELDS, build_partial_update};
use crate::credentials::CredentialManager;
use crate::error::{DirectoryError, Result};
use crate::store::UserStore;
use crate::user::{NewUser, UserRecord, UserSummary};

const USERS_TABLE: &str = "users";
const KEY_FIELD: &str = "username";

/// Centralized service for user record operations.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn UserStore>,
    credentials: CredentialManager,
}

impl std::fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDirectory").finish_non_exhaustive()
    }
}

impl UserDirectory {
    pub fn new(store: Arc<dyn UserStore>, credentials: CredentialManager) -> Self {
        Self { store, credentials }
    }

    /// Validate username format.
    fn validate_username(username: &str) -> Result<()> {
        if username.is_empty() {
            return Err(DirectoryError::InvalidInput(
                "Username cannot be empty".to_string(),
            ));
        }

        if username.len() > 32 {
            return Err(DirectoryError::InvalidInput(
                "Username cannot exceed 32 characters".to_string(),
            ));
        }

        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DirectoryError::InvalidInput(
                "Username can only contain letters, numbers, underscores, and hyphens".to_string(),
            ));
        }

        Ok(())
    }

    /// Register a new user.
    ///
    /// The duplicate pre-check accepts a small race window; the store's
    /// uniqueness enforcement backstops it with the same error kind.
    /// Registration never grants the admin flag.
    pub async fn register(&self, candidate: NewUser) -> Result<UserRecord> {
        Self::validate_username(&candidate.username)?;

        if self
            .store
            .get_user_by_username(&candidate.username)
            .await?
            .is_some()
        {
            return Err(DirectoryError::DuplicateUsername(candidate.username));
        }

        let password_hash = self.credentials.hash(&candidate.password)?;

        let user = UserRecord {
            username: candidate.username,
            password_hash,
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            email: candidate.email,
            phone: candidate.phone,
            is_admin: false,
        };

        self.store.insert_user(&user).await?;

        info!("User registered: {}", user.username);
        Ok(user)
    }

    /// Verify a username/password pair, returning the record on success.
    ///
    /// Unknown-user and wrong-password failures return the same
    /// `Unauthorized` value, and the unknown-user path still performs a
    /// verification against a dummy hash so the two cost comparably.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<UserRecord> {
        match self.store.get_user_by_username(username).await? {
            Some(user) => {
                if self.credentials.verify(password, &user.password_hash) {
                    Ok(user)
                } else {
                    Err(DirectoryError::Unauthorized)
                }
            }
            None => {
                self.credentials
                    .verify(password, self.credentials.dummy_hash());
                Err(DirectoryError::Unauthorized)
            }
        }
    }

    /// All users projected to summaries, ordered by username ascending.
    pub async fn list_all(&self) -> Result<Vec<UserSummary>> {
        self.store.list_summaries().await
    }

    pub async fn get_by_username(&self, username: &str) -> Result<UserRecord> {
        self.store
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| DirectoryError::NotFound(format!("No such user: {username}")))
    }

    /// Selectively update a user from the given change set.
    ///
    /// Validation happens entirely before the store is touched; a rejected
    /// change set leaves the record unmodified.
    pub async fn apply_partial_update(
        &self,
        username: &str,
        changes: &ChangeSet,
    ) -> Result<UserRecord> {
        let update =
            build_partial_update(USERS_TABLE, changes, KEY_FIELD, username, UPDATABLE_FIELDS)?;

        self.store
            .apply_update(&update)
            .await?
            .ok_or_else(|| DirectoryError::NotFound(format!("No such user: {username}")))
    }

    pub async fn delete(&self, username: &str) -> Result<()> {
        if !self.store.delete_user(username).await? {
            return Err(DirectoryError::NotFound(format!("No such user: {username}")));
        }
        Ok(())
    }
}
