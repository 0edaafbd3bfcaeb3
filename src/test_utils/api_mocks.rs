//! In-memory implementation of the remote API ports.
//!
//! Every call is recorded as `op` or `op:arg` so tests can assert on exactly
//! which requests went out. Failures are injected per operation name.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use luminara_types::{
    AccessTokenResponse, AdminTokenResponse, AdminTokenStatus, LoginRequest, OAuthProvider,
    SignupRequest, Subdomain, SubdomainAvailability, User,
};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::api::{AuthApi, SubdomainApi, UserApi},
};

use super::factories::{TEST_TIMESTAMP, create_test_subdomain};

pub const TEST_ACCESS_TOKEN: &str = "issued-access-token";
pub const TEST_ADMIN_TOKEN: &str = "lum_admin_0123456789abcdef";

#[derive(Default)]
pub struct InMemoryApi {
    user: Mutex<Option<User>>,
    subdomain: Mutex<Option<Subdomain>>,
    taken: Mutex<HashSet<String>>,
    token_status: Mutex<AdminTokenStatus>,
    check_delay: Mutex<Option<Duration>>,
    mutation_delay: Mutex<Option<Duration>>,
    failures: Mutex<HashMap<&'static str, AppError>>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: User) -> Self {
        let api = Self::default();
        api.set_user(user);
        api
    }

    pub fn set_user(&self, user: User) {
        *self.user.lock().unwrap() = Some(user);
    }

    pub fn set_subdomain(&self, subdomain: Subdomain) {
        *self.subdomain.lock().unwrap() = Some(subdomain);
    }

    /// Marks `name` as claimed by someone else.
    pub fn take_name(&self, name: &str) {
        self.taken.lock().unwrap().insert(name.to_string());
    }

    pub fn set_check_delay(&self, delay: Duration) {
        *self.check_delay.lock().unwrap() = Some(delay);
    }

    /// Holds every claim and admin-token mutation for `delay` before it answers.
    pub fn set_mutation_delay(&self, delay: Duration) {
        *self.mutation_delay.lock().unwrap() = Some(delay);
    }

    /// Makes every subsequent call to `op` fail with `error`.
    pub fn fail_with(&self, op: &'static str, error: AppError) {
        self.failures.lock().unwrap().insert(op, error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.split(':').next() == Some(op))
            .count()
    }

    fn record(&self, op: &'static str, arg: Option<&str>) -> AppResult<()> {
        let entry = match arg {
            Some(arg) => format!("{}:{}", op, arg),
            None => op.to_string(),
        };
        self.calls.lock().unwrap().push(entry);

        match self.failures.lock().unwrap().get(op) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn pause_mutation(&self) {
        let delay = *self.mutation_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn claim(&self, name: &str) -> Subdomain {
        let owner = self
            .user
            .lock()
            .unwrap()
            .as_ref()
            .map(|u| u.username.clone())
            .unwrap_or_else(|| "ada".to_string());
        let subdomain = create_test_subdomain(|s| {
            s.subdomain = name.to_string();
            s.full_url = format!("https://{}.myluminarasystem.pro", name);
            s.owner_username = owner;
        });
        self.set_subdomain(subdomain.clone());
        subdomain
    }
}

#[async_trait]
impl UserApi for InMemoryApi {
    async fn current_user(&self) -> AppResult<User> {
        self.record("current_user", None)?;
        self.user
            .lock()
            .unwrap()
            .clone()
            .ok_or(AppError::Unauthorized { detail: None })
    }

    async fn update_email(&self, email: &str) -> AppResult<User> {
        self.record("update_email", Some(email))?;
        let mut guard = self.user.lock().unwrap();
        let user = guard
            .as_mut()
            .ok_or(AppError::Unauthorized { detail: None })?;
        user.email = email.to_string();
        Ok(user.clone())
    }

    async fn delete_account(&self) -> AppResult<()> {
        self.record("delete_account", None)?;
        *self.user.lock().unwrap() = None;
        *self.subdomain.lock().unwrap() = None;
        Ok(())
    }

    async fn public_profile(&self, username: &str) -> AppResult<Option<User>> {
        self.record("public_profile", Some(username))?;
        Ok(self
            .user
            .lock()
            .unwrap()
            .clone()
            .filter(|u| u.username == username))
    }
}

#[async_trait]
impl AuthApi for InMemoryApi {
    async fn login(&self, request: &LoginRequest) -> AppResult<AccessTokenResponse> {
        self.record("login", Some(&request.email))?;
        Ok(AccessTokenResponse {
            access_token: TEST_ACCESS_TOKEN.to_string(),
            token_type: Some("bearer".to_string()),
        })
    }

    async fn signup(&self, request: &SignupRequest) -> AppResult<()> {
        self.record("signup", Some(&request.username))
    }

    async fn oauth_url(&self, provider: OAuthProvider) -> AppResult<String> {
        self.record("oauth_url", Some(&provider.to_string()))?;
        Ok(format!("https://{}.example/authorize?client_id=test", provider))
    }

    async fn resend_verification(&self, email: &str) -> AppResult<()> {
        self.record("resend_verification", Some(email))
    }
}

#[async_trait]
impl SubdomainApi for InMemoryApi {
    async fn my_subdomain(&self) -> AppResult<Option<Subdomain>> {
        self.record("my_subdomain", None)?;
        Ok(self.subdomain.lock().unwrap().clone())
    }

    async fn check_availability(&self, name: &str) -> AppResult<SubdomainAvailability> {
        self.record("check_availability", Some(name))?;
        let delay = *self.check_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let taken = self.taken.lock().unwrap().contains(name);
        Ok(SubdomainAvailability {
            available: !taken,
            reason: taken.then(|| "Subdomain already taken".to_string()),
        })
    }

    async fn create_subdomain(&self, name: &str) -> AppResult<Subdomain> {
        self.record("create_subdomain", Some(name))?;
        self.pause_mutation().await;
        Ok(self.claim(name))
    }

    async fn rename_subdomain(&self, name: &str) -> AppResult<Subdomain> {
        self.record("rename_subdomain", Some(name))?;
        self.pause_mutation().await;
        if self.subdomain.lock().unwrap().is_none() {
            return Err(AppError::NotFound {
                detail: Some("Subdomain not found".into()),
            });
        }
        Ok(self.claim(name))
    }

    async fn delete_subdomain(&self) -> AppResult<()> {
        self.record("delete_subdomain", None)?;
        self.pause_mutation().await;
        *self.subdomain.lock().unwrap() = None;
        *self.token_status.lock().unwrap() = AdminTokenStatus::default();
        Ok(())
    }

    async fn admin_token_status(&self) -> AppResult<AdminTokenStatus> {
        self.record("admin_token_status", None)?;
        Ok(self.token_status.lock().unwrap().clone())
    }

    async fn generate_admin_token(&self) -> AppResult<AdminTokenResponse> {
        self.record("generate_admin_token", None)?;
        self.pause_mutation().await;
        *self.token_status.lock().unwrap() = AdminTokenStatus {
            has_token: true,
            created_at: Some(TEST_TIMESTAMP.to_string()),
        };
        Ok(AdminTokenResponse {
            token: TEST_ADMIN_TOKEN.to_string(),
            created_at: TEST_TIMESTAMP.to_string(),
            message: Some("Admin token generated successfully".to_string()),
        })
    }

    async fn delete_admin_token(&self) -> AppResult<()> {
        self.record("delete_admin_token", None)?;
        self.pause_mutation().await;
        *self.token_status.lock().unwrap() = AdminTokenStatus::default();
        Ok(())
    }
}
