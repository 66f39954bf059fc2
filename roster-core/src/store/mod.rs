//! Persistence port and implementations
//!
//! The directory talks to storage exclusively through the [`UserStore`]
//! trait. [`postgres::PostgresUserStore`] is the production backend;
//! [`memory::InMemoryUserStore`] backs the integration suite and local
//! experiments without a database.

use async_trait::async_trait;

use crate::changeset::UpdateQuery;
use crate::error::Result;
use crate::user::{UserRecord, UserSummary};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserStore;
pub use postgres::PostgresUserStore;

/// User persistence port.
///
/// Implementations must enforce username uniqueness on insert and report
/// matched-row outcomes on update/delete so callers can surface `NotFound`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new record. Fails with `DuplicateUsername` when the
    /// username is already taken.
    async fn insert_user(&self, user: &UserRecord) -> Result<()>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>>;

    /// All records projected to summaries, ordered by username ascending.
    async fn list_summaries(&self) -> Result<Vec<UserSummary>>;

    /// Execute a validated partial update. Returns the updated record, or
    /// `None` when no row matched the key predicate.
    async fn apply_update(&self, update: &UpdateQuery) -> Result<Option<UserRecord>>;

    /// Delete a record. Returns false when no row was deleted.
    async fn delete_user(&self, username: &str) -> Result<bool>;
}
