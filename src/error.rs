use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid input: {0}")]
    Input(String),
    #[error("organization '{organization}' not found (HTTP {status})")]
    OrganizationNotFound { organization: String, status: u16 },
    #[error("unauthorized: invalid access token")]
    Unauthorized,
    #[error("forbidden: API rate limit exceeded")]
    RateLimited,
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
