//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use std::path::PathBuf;
use std::time::Duration;

use luminara_types::{Subdomain, User};
use url::Url;

use crate::{domain::entities::credential::Credential, infra::config::AppConfig};

pub const TEST_TIMESTAMP: &str = "2025-01-15T10:30:00";

/// Create a test user with sensible defaults.
pub fn create_test_user(overrides: impl FnOnce(&mut User)) -> User {
    let mut user = User {
        id: 1,
        email: "ada@example.com".to_string(),
        username: "ada".to_string(),
        provider: "email".to_string(),
        is_verified: true,
        created_at: TEST_TIMESTAMP.to_string(),
    };
    overrides(&mut user);
    user
}

/// Create a test subdomain claim with sensible defaults.
pub fn create_test_subdomain(overrides: impl FnOnce(&mut Subdomain)) -> Subdomain {
    let mut subdomain = Subdomain {
        id: 1,
        subdomain: "ada".to_string(),
        full_url: "https://ada.myluminarasystem.pro".to_string(),
        created_at: TEST_TIMESTAMP.to_string(),
        owner_username: "ada".to_string(),
    };
    overrides(&mut subdomain);
    subdomain
}

pub fn test_credential() -> Credential {
    Credential::new("test-credential").expect("non-blank credential")
}

/// Create a client configuration pointing at a local API.
pub fn create_test_config(overrides: impl FnOnce(&mut AppConfig)) -> AppConfig {
    let mut config = AppConfig {
        api_url: Url::parse("http://localhost:8000").unwrap(),
        root_domain: "myluminarasystem.pro".to_string(),
        home: PathBuf::from("/nonexistent"),
        availability_debounce: Duration::from_millis(500),
        http_connect_timeout: Duration::from_secs(5),
        http_request_timeout: Duration::from_secs(30),
        log_file: None,
    };
    overrides(&mut config);
    config
}
