use std::sync::Arc;

use luminara_types::User;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        outcome::{Outcome, SkipReason},
        ports::{api::UserApi, ui::UiPorts},
        use_cases::session::SessionStore,
        validators::is_valid_email,
    },
    domain::entities::notice::Notice,
};

pub const DELETE_ACCOUNT_PROMPT: &str =
    "Are you sure you want to delete your account? Your subdomain and admin token will be removed.";

#[derive(Clone)]
pub struct AccountUseCases {
    api: Arc<dyn UserApi>,
    session: Arc<SessionStore>,
    ui: UiPorts,
}

impl AccountUseCases {
    pub fn new(api: Arc<dyn UserApi>, session: Arc<SessionStore>, ui: UiPorts) -> Self {
        Self { api, session, ui }
    }

    /// Changes the account email, then re-resolves the session identity.
    #[instrument(skip(self))]
    pub async fn update_email(&self, email: &str) -> Outcome<User> {
        if !is_valid_email(email) {
            return Outcome::failed("Please enter a valid email address");
        }
        if !self.session.state().is_authenticated() {
            return Outcome::Skipped(SkipReason::Disabled);
        }

        match self.api.update_email(email.trim()).await {
            Ok(user) => {
                info!(username = %user.username, "email updated");
                self.session.refresh_user().await;
                let message = "Email updated successfully";
                self.ui.notifier.notify(Notice::success(message));
                Outcome::done(user, message)
            }
            Err(e) => {
                debug!(error = %e, code = e.code().as_str(), "email update failed");
                self.failed(e.user_message("Failed to update email"))
            }
        }
    }

    /// Permanently deletes the account and logs out locally.
    #[instrument(skip(self))]
    pub async fn delete_account(&self) -> Outcome {
        if !self.session.state().is_authenticated() {
            return Outcome::Skipped(SkipReason::Disabled);
        }
        if !self.ui.confirm.confirm(DELETE_ACCOUNT_PROMPT) {
            return Outcome::Skipped(SkipReason::NotConfirmed);
        }

        match self.api.delete_account().await {
            Ok(()) => {
                if let Err(e) = self.session.logout() {
                    warn!(error = %e, "failed to clear credential after account deletion");
                }
                info!("account deleted");
                let message = "Account deleted successfully";
                self.ui.notifier.notify(Notice::success(message));
                Outcome::done((), message)
            }
            Err(e) => self.failed(e.user_message("Failed to delete account")),
        }
    }

    /// Looks up another user's public profile. Unknown usernames yield `None`.
    #[instrument(skip(self))]
    pub async fn public_profile(&self, username: &str) -> Outcome<Option<User>> {
        match self.api.public_profile(username.trim()).await {
            Ok(Some(user)) => Outcome::done(Some(user), "Profile loaded"),
            Ok(None) => Outcome::done(None, "User not found"),
            Err(e) => self.failed(e.user_message("Failed to load profile")),
        }
    }

    fn failed<T>(&self, message: String) -> Outcome<T> {
        self.ui.notifier.notify(Notice::error(message.clone()));
        Outcome::failed(message)
    }
}
