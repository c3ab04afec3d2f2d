use thiserror::Error;

#[derive(Error, Debug)]
pub enum EpgError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl EpgError {
    /// Whether the error belongs to the unexpected class whose details must
    /// not reach the caller.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, EpgError::Database(_) | EpgError::Internal(_))
    }
}

pub type EpgResult<T> = Result<T, EpgError>;
