//! Wire types for the Luminara REST API.
//!
//! This crate provides:
//! - The user identity returned by `/users/*`
//! - Auth request/response bodies and the supported OAuth providers
//! - Subdomain claim, availability and admin-token payloads
//! - The `{"detail": ...}` error body the API returns on failure

mod auth;
mod errors;
mod subdomain;
mod user;

pub use auth::{
    AccessTokenResponse, LoginRequest, OAuthInitResponse, OAuthProvider,
    ResendVerificationRequest, SignupRequest,
};
pub use errors::ApiErrorBody;
pub use subdomain::{
    AdminTokenResponse, AdminTokenStatus, CreateSubdomainRequest, Subdomain,
    SubdomainAvailability, UpdateSubdomainRequest,
};
pub use user::User;
