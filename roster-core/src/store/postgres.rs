use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::changeset::UpdateQuery;
use crate::error::{DirectoryError, Result};
use crate::store::UserStore;
use crate::user::{UserRecord, UserSummary};

/// PostgreSQL-backed implementation of the [`UserStore`] port.
#[derive(Clone, Debug)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    username: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    is_admin: bool,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            username: row.username,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            is_admin: row.is_admin,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
}

impl From<SummaryRow> for UserSummary {
    fn from(row: SummaryRow) -> Self {
        UserSummary {
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
        }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn insert_user(&self, user: &UserRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users
                (username, password_hash, first_name, last_name, email, phone, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(user.is_admin)
        .execute(self.pool())
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error()
                && db_err.constraint() == Some("users_pkey")
            {
                return DirectoryError::DuplicateUsername(user.username.clone());
            }
            DirectoryError::Store(format!("Failed to create user: {e}"))
        })?;

        info!("Created user: {}", user.username);
        Ok(())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT username, password_hash, first_name, last_name, email, phone, is_admin
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| DirectoryError::Store(format!("Failed to get user by username: {e}")))?;

        Ok(row.map(UserRecord::from))
    }

    async fn list_summaries(&self) -> Result<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT first_name, last_name, email, phone
            FROM users
            ORDER BY username
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| DirectoryError::Store(format!("Failed to list users: {e}")))?;

        Ok(rows.into_iter().map(UserSummary::from).collect())
    }

    async fn apply_update(&self, update: &UpdateQuery) -> Result<Option<UserRecord>> {
        let sql = update.sql();
        let mut query = sqlx::query_as::<_, UserRow>(&sql);
        for param in update.params() {
            query = query.bind(param.to_string());
        }

        let row = query
            .fetch_optional(self.pool())
            .await
            .map_err(|e| DirectoryError::Store(format!("Failed to update user: {e}")))?;

        if let Some(row) = &row {
            info!("Updated user: {}", row.username);
        }

        Ok(row.map(UserRecord::from))
    }

    async fn delete_user(&self, username: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(self.pool())
            .await
            .map_err(|e| DirectoryError::Store(format!("Failed to delete user: {e}")))?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted user: {username}");
        }
        Ok(deleted)
    }
}
