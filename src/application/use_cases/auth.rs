use std::sync::Arc;

use luminara_types::{LoginRequest, OAuthProvider, SignupRequest, User};
use tracing::{debug, info, instrument};
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        outcome::{FieldErrors, Outcome, SubmitOutcome},
        ports::{api::AuthApi, ui::UiPorts},
        use_cases::session::{SessionStore, credential_from_url},
        validators::{PasswordCheck, is_valid_email, validate_password, validate_username},
    },
    domain::entities::{credential::Credential, notice::Notice, route::Route},
};

pub const VERIFIED_QUERY_PARAM: &str = "verified";
pub const EMAIL_VERIFIED_MESSAGE: &str = "Email verified successfully! You can now log in.";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if !is_valid_email(&self.email) {
            errors.push("email", "Please enter a valid email address");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }
        errors
    }
}

/// Registration form with a password checklist kept in sync on every edit.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    password: String,
    password_check: PasswordCheck,
}

impl RegisterForm {
    pub fn new(email: impl Into<String>, username: impl Into<String>, password: &str) -> Self {
        let mut form = Self {
            email: email.into(),
            username: username.into(),
            ..Self::default()
        };
        form.set_password(password);
        form
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = password.to_string();
        self.password_check = validate_password(password);
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn password_check(&self) -> PasswordCheck {
        self.password_check
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if !is_valid_email(&self.email) {
            errors.push("email", "Please enter a valid email address");
        }
        if let Err(msg) = validate_username(self.username.trim()) {
            errors.push("username", msg);
        }
        if let Some(first) = self.password_check.errors().first() {
            errors.push("password", *first);
        }
        errors
    }
}

/// Login, registration and OAuth flows.
#[derive(Clone)]
pub struct AuthUseCases {
    api: Arc<dyn AuthApi>,
    session: Arc<SessionStore>,
    ui: UiPorts,
}

impl AuthUseCases {
    pub fn new(api: Arc<dyn AuthApi>, session: Arc<SessionStore>, ui: UiPorts) -> Self {
        Self { api, session, ui }
    }

    /// Shows the post-verification notice when the login screen is opened
    /// from the verification email link. Returns whether it was shown.
    pub fn acknowledge_verification(&self, url: &Url) -> bool {
        let verified = url
            .query_pairs()
            .any(|(key, value)| key == VERIFIED_QUERY_PARAM && value == "true");
        if verified {
            self.ui.notifier.notify(Notice::success(EMAIL_VERIFIED_MESSAGE));
        }
        verified
    }

    #[instrument(skip_all)]
    pub async fn login(&self, form: &LoginForm) -> SubmitOutcome {
        let errors = form.validate();
        if !errors.is_empty() {
            return SubmitOutcome::Invalid(errors);
        }

        let request = LoginRequest {
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        };

        match self.exchange(&request).await {
            Ok(user) => {
                info!(username = %user.username, "logged in");
                self.ui.notifier.notify(Notice::success("Welcome back!"));
                SubmitOutcome::Navigate(Route::Dashboard)
            }
            Err(e) => {
                debug!(error = %e, code = e.code().as_str(), "login failed");
                self.submit_failed(e.user_message("Login failed"))
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn register(&self, form: &RegisterForm) -> SubmitOutcome {
        let errors = form.validate();
        if !errors.is_empty() {
            return SubmitOutcome::Invalid(errors);
        }

        let request = SignupRequest {
            email: form.email.trim().to_string(),
            username: form.username.trim().to_string(),
            password: form.password.clone(),
        };

        match self.api.signup(&request).await {
            Ok(()) => {
                info!(username = %request.username, "account registered");
                self.ui.notifier.notify(Notice::success(
                    "Account created! Please check your email to verify your account.",
                ));
                SubmitOutcome::Navigate(Route::Login)
            }
            Err(e) => {
                debug!(error = %e, code = e.code().as_str(), "registration failed");
                self.submit_failed(e.user_message("Registration failed"))
            }
        }
    }

    /// Fetches the provider's authorization URL and opens it in the browser.
    #[instrument(skip(self))]
    pub async fn start_oauth(&self, provider: OAuthProvider) -> Outcome<String> {
        let failure = format!("Failed to initialize {} login", provider.label());

        let auth_url = match self.api.oauth_url(provider).await {
            Ok(url) => url,
            Err(e) => {
                debug!(error = %e, %provider, "oauth init failed");
                return self.failed(failure);
            }
        };

        if let Err(e) = self.ui.browser.open(&auth_url) {
            debug!(error = %e, %provider, "could not open browser");
            return self.failed(failure);
        }

        let message = format!("Continue in your browser to sign in with {}", provider.label());
        Outcome::done(auth_url, message)
    }

    /// Finishes an OAuth redirect: a single login attempt, no retry.
    #[instrument(skip_all)]
    pub async fn complete_oauth(&self, redirect: &Url) -> Route {
        let Some(credential) = credential_from_url(redirect) else {
            self.ui
                .notifier
                .notify(Notice::error("No authentication token received"));
            return Route::Login;
        };

        match self.session.login(credential).await {
            Ok(user) => {
                info!(username = %user.username, "oauth login completed");
                self.ui
                    .notifier
                    .notify(Notice::success("Successfully logged in!"));
                Route::Dashboard
            }
            Err(e) => {
                debug!(error = %e, code = e.code().as_str(), "oauth login failed");
                self.ui.notifier.notify(Notice::error("Login failed"));
                Route::Login
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn resend_verification(&self, email: &str) -> Outcome {
        if !is_valid_email(email) {
            return Outcome::failed("Please enter a valid email address");
        }

        match self.api.resend_verification(email.trim()).await {
            Ok(()) => {
                let message = "Verification email sent. Please check your inbox.";
                self.ui.notifier.notify(Notice::success(message));
                Outcome::done((), message)
            }
            Err(e) => self.failed(e.user_message("Failed to resend verification email")),
        }
    }

    async fn exchange(&self, request: &LoginRequest) -> AppResult<User> {
        let token = self.api.login(request).await?;
        let credential = Credential::new(token.access_token)
            .ok_or_else(|| AppError::Internal("empty access token".into()))?;
        self.session.login(credential).await
    }

    fn submit_failed(&self, message: String) -> SubmitOutcome {
        self.ui.notifier.notify(Notice::error(message.clone()));
        SubmitOutcome::Failed { message }
    }

    fn failed<T>(&self, message: String) -> Outcome<T> {
        self.ui.notifier.notify(Notice::error(message.clone()));
        Outcome::failed(message)
    }
}
