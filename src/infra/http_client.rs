//! HTTP client factory with consistent timeout configuration.
//!
//! The API gateway must use `try_build_client()` rather than constructing
//! `reqwest::Client` directly, so every request is bounded by both timeouts.

use reqwest::Client;
use std::time::Duration;

/// Default connect timeout (TCP handshake + TLS).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default request timeout (total request/response time).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build an HTTP client with the given timeouts.
pub fn try_build_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .user_agent(concat!("luminara/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Build an HTTP client with default timeouts.
pub fn try_build_default_client() -> Result<Client, reqwest::Error> {
    try_build_client(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
}
