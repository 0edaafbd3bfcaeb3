use async_trait::async_trait;
use luminara_types::{
    AccessTokenResponse, AdminTokenResponse, AdminTokenStatus, LoginRequest, OAuthProvider,
    SignupRequest, Subdomain, SubdomainAvailability, User,
};

use crate::app_error::AppResult;

// ============================================================================
// Remote API ports - implemented by the HTTP gateway, which attaches the
// stored credential to every call.
// ============================================================================

#[async_trait]
pub trait UserApi: Send + Sync {
    /// Resolves the stored credential into the current identity.
    async fn current_user(&self) -> AppResult<User>;
    async fn update_email(&self, email: &str) -> AppResult<User>;
    async fn delete_account(&self) -> AppResult<()>;
    /// `None` when no such user exists.
    async fn public_profile(&self, username: &str) -> AppResult<Option<User>>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> AppResult<AccessTokenResponse>;
    async fn signup(&self, request: &SignupRequest) -> AppResult<()>;
    /// Returns the provider authorization URL the browser should be sent to.
    async fn oauth_url(&self, provider: OAuthProvider) -> AppResult<String>;
    async fn resend_verification(&self, email: &str) -> AppResult<()>;
}

#[async_trait]
pub trait SubdomainApi: Send + Sync {
    /// `None` when the user has not claimed a subdomain yet.
    async fn my_subdomain(&self) -> AppResult<Option<Subdomain>>;
    async fn check_availability(&self, name: &str) -> AppResult<SubdomainAvailability>;
    async fn create_subdomain(&self, name: &str) -> AppResult<Subdomain>;
    async fn rename_subdomain(&self, name: &str) -> AppResult<Subdomain>;
    async fn delete_subdomain(&self) -> AppResult<()>;
    async fn admin_token_status(&self) -> AppResult<AdminTokenStatus>;
    /// Issues a new admin token, revoking any previous one.
    async fn generate_admin_token(&self) -> AppResult<AdminTokenResponse>;
    async fn delete_admin_token(&self) -> AppResult<()>;
}
