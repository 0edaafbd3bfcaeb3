use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unauthorized")]
    Unauthorized { detail: Option<String> },

    #[error("Not found")]
    NotFound { detail: Option<String> },

    #[error("Request rejected with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Server-supplied message, if the error carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::Unauthorized { detail }
            | AppError::NotFound { detail }
            | AppError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The message to show a user: the server's detail when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Transport(_) => ErrorCode::Transport,
            AppError::Unauthorized { .. } => ErrorCode::Unauthorized,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::Rejected { .. } => ErrorCode::Rejected,
            AppError::Storage(_) => ErrorCode::StorageError,
            AppError::Clipboard(_) => ErrorCode::ClipboardError,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    Transport,
    Unauthorized,
    NotFound,
    Rejected,
    StorageError,
    ClipboardError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Rejected => "REJECTED",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ClipboardError => "CLIPBOARD_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
