//! Error types

use thiserror::Error;

/// Failure talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response carrying a backend message
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Authentication required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Blocks a submission; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// Blocks a single cart mutation; the rest of the cart is untouched.
    #[error("Insufficient stock for {product}. Available: {available}")]
    InsufficientStock { product: String, available: i32 },

    #[error(transparent)]
    Remote(#[from] ApiError),

    #[error("No active {0}")]
    NoActiveSession(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
