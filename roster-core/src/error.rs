use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Duplicate username: {0}")]
    DuplicateUsername(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Deliberately carries no detail: unknown-user and wrong-password
    /// failures must be indistinguishable to the caller.
    #[error("Cannot authenticate")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
