use std::sync::Arc;

use luminara_types::User;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::{
    app_error::AppResult,
    application::ports::{api::UserApi, storage::CredentialStore},
    domain::entities::{credential::Credential, session::SessionState},
};

/// Query parameter carrying a one-time credential on the OAuth redirect.
pub const CREDENTIAL_QUERY_PARAM: &str = "token";

/// Single source of truth for "who is logged in".
///
/// Views read the state (or `subscribe` to it); only `init`, `login`,
/// `logout`, `refresh_user` and `teardown` change it.
pub struct SessionStore {
    api: Arc<dyn UserApi>,
    credentials: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn UserApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Unresolved);
        Self {
            api,
            credentials,
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Resolves the startup credential, taken from `launch_url` (OAuth
    /// redirect) or else from storage. Never fails: an unusable credential
    /// is deleted and the session settles as anonymous.
    #[instrument(skip_all)]
    pub async fn init(&self, launch_url: Option<&Url>) -> SessionState {
        if !matches!(*self.state.borrow(), SessionState::Unresolved) {
            debug!(state = self.state.borrow().as_str(), "session already initialized");
            return self.state();
        }

        let credential = match launch_url.and_then(credential_from_url) {
            Some(credential) => {
                if let Err(e) = self.credentials.save(&credential) {
                    warn!(error = %e, code = e.code().as_str(), "failed to persist launch credential");
                }
                Some(credential)
            }
            None => match self.credentials.load() {
                Ok(credential) => credential,
                Err(e) => {
                    warn!(error = %e, "failed to read stored credential");
                    None
                }
            },
        };

        if credential.is_some() {
            if let Err(e) = self.resolve().await {
                debug!(error = %e, "startup credential rejected");
            }
        } else {
            self.set(SessionState::Anonymous);
        }

        self.state()
    }

    /// Stores `credential` and resolves it. Unlike `init`, failure is
    /// returned so the caller can report it.
    #[instrument(skip_all)]
    pub async fn login(&self, credential: Credential) -> AppResult<User> {
        self.credentials.save(&credential)?;
        self.resolve().await
    }

    /// Forgets the credential and identity. No network call.
    #[instrument(skip(self))]
    pub fn logout(&self) -> AppResult<()> {
        let cleared = self.credentials.clear();
        self.set(SessionState::Anonymous);
        info!("logged out");
        cleared
    }

    /// Re-resolves the stored credential, e.g. after the identity changed server-side.
    #[instrument(skip(self))]
    pub async fn refresh_user(&self) -> SessionState {
        if let Err(e) = self.resolve().await {
            debug!(error = %e, "refresh rejected credential");
        }
        self.state()
    }

    /// Drops the in-memory identity; the persisted credential survives for the next `init`.
    pub fn teardown(&self) {
        self.set(SessionState::Unresolved);
    }

    async fn resolve(&self) -> AppResult<User> {
        self.set(SessionState::Loading);

        match self.api.current_user().await {
            Ok(user) => {
                info!(username = %user.username, "session resolved");
                self.set(SessionState::Authenticated(user.clone()));
                Ok(user)
            }
            Err(e) => {
                // Any failure is treated as proof the credential is invalid.
                debug!(error = %e, code = e.code().as_str(), "identity fetch failed; clearing credential");
                if let Err(clear_err) = self.credentials.clear() {
                    warn!(error = %clear_err, "failed to delete stored credential");
                }
                self.set(SessionState::Anonymous);
                Err(e)
            }
        }
    }

    fn set(&self, next: SessionState) {
        self.state.send_replace(next);
    }
}

/// Extracts the one-time credential from an OAuth redirect URL.
pub fn credential_from_url(url: &Url) -> Option<Credential> {
    url.query_pairs()
        .find(|(key, _)| key == CREDENTIAL_QUERY_PARAM)
        .and_then(|(_, value)| Credential::new(value.into_owned()))
}
