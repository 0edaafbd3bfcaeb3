//! Translation of HTTP failures into [`AppError`].

use luminara_types::ApiErrorBody;
use reqwest::{Response, StatusCode};

use crate::app_error::AppError;

/// A request that never produced a response (DNS, connect, timeout, TLS).
pub fn transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::Transport("request timed out".into())
    } else {
        AppError::Transport(e.without_url().to_string())
    }
}

/// Reads the `{"detail": ...}` body of a non-success response.
pub async fn error_from_response(response: Response) -> AppError {
    let status = response.status();
    let detail = match response.text().await {
        Ok(body) => detail_from_body(&body),
        Err(_) => None,
    };
    error_from_status(status, detail)
}

pub fn detail_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message())
}

pub fn error_from_status(status: StatusCode, detail: Option<String>) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized { detail },
        StatusCode::NOT_FOUND => AppError::NotFound { detail },
        _ => AppError::Rejected {
            status: status.as_u16(),
            detail,
        },
    }
}
