use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::changeset::UpdateQuery;
use crate::error::{DirectoryError, Result};
use crate::store::UserStore;
use crate::user::{UserRecord, UserSummary};

/// In-memory implementation of the [`UserStore`] port.
///
/// Backs the integration suite and local experiments; the ordered map
/// mirrors the username-ascending listing the PostgreSQL store produces.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<Mutex<BTreeMap<String, UserRecord>>>,
}

impl std::fmt::Debug for InMemoryUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryUserStore").finish_non_exhaustive()
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, UserRecord>> {
        // A poisoned lock only happens after a panic in another test
        // thread; propagating the inner state is still sound here.
        self.users.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert_user(&self, user: &UserRecord) -> Result<()> {
        let mut users = self.lock();
        if users.contains_key(&user.username) {
            return Err(DirectoryError::DuplicateUsername(user.username.clone()));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.lock().get(username).cloned())
    }

    async fn list_summaries(&self) -> Result<Vec<UserSummary>> {
        Ok(self.lock().values().map(UserSummary::from).collect())
    }

    async fn apply_update(&self, update: &UpdateQuery) -> Result<Option<UserRecord>> {
        if update.key_field != "username" {
            return Err(DirectoryError::Store(format!(
                "Unsupported key field: {}",
                update.key_field
            )));
        }

        let mut users = self.lock();
        let Some(user) = users.get_mut(&update.key_value) else {
            return Ok(None);
        };

        for (field, value) in &update.assignments {
            match field.as_str() {
                "first_name" => user.first_name = value.clone(),
                "last_name" => user.last_name = value.clone(),
                "email" => user.email = value.clone(),
                "phone" => user.phone = value.clone(),
                other => {
                    return Err(DirectoryError::Store(format!(
                        "Unsupported column: {other}"
                    )));
                }
            }
        }

        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, username: &str) -> Result<bool> {
        Ok(self.lock().remove(username).is_some())
    }
}
