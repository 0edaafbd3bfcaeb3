use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use luminara_types::{AdminTokenStatus, Subdomain, SubdomainAvailability};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument};

use crate::{
    application::{
        debounce::{DebounceKey, Debouncer},
        outcome::{Outcome, SkipReason},
        ports::{api::SubdomainApi, ui::UiPorts},
        validators::{is_checkable_subdomain, normalize_subdomain},
    },
    domain::entities::{availability::AvailabilityState, notice::Notice},
};

pub const DELETE_CLAIM_PROMPT: &str =
    "Are you sure you want to delete your subdomain? This action cannot be undone.";
pub const DELETE_TOKEN_PROMPT: &str = "Are you sure you want to delete your admin token? This will revoke access to all applications using this token.";

/// Reason reported when the availability probe itself fails.
const CHECK_FAILED_REASON: &str = "Check failed";

/// The user's subdomain claim as last fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClaimState {
    #[default]
    NotLoaded,
    /// The API reported no claim; a valid state, not an error.
    Absent,
    Claimed(Subdomain),
}

impl ClaimState {
    pub fn subdomain(&self) -> Option<&Subdomain> {
        match self {
            ClaimState::Claimed(subdomain) => Some(subdomain),
            _ => None,
        }
    }
}

/// Mutating actions, each guarded against duplicate submission while in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardAction {
    CreateClaim,
    RenameClaim,
    DeleteClaim,
    GenerateToken,
    DeleteToken,
}

#[derive(Default)]
struct DashboardState {
    claim: ClaimState,
    input: String,
    availability: AvailabilityState,
    token_status: Option<AdminTokenStatus>,
    /// Shown once after generation; never persisted.
    token_secret: Option<SecretString>,
    token_visible: bool,
    in_flight: HashSet<DashboardAction>,
}

/// Render-ready snapshot of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub claim: ClaimState,
    pub input: String,
    pub availability: AvailabilityState,
    pub token_status: Option<AdminTokenStatus>,
    /// The freshly generated token: in clear when revealed, masked otherwise.
    pub token_display: Option<String>,
    pub token_visible: bool,
    pub can_create: bool,
    pub can_rename: bool,
    pub admin_endpoint: Option<String>,
    pub in_flight: Vec<DashboardAction>,
}

/// Subdomain claim and admin token management for the current identity.
pub struct Dashboard {
    api: Arc<dyn SubdomainApi>,
    ui: UiPorts,
    root_domain: String,
    debouncer: Debouncer,
    state: Mutex<DashboardState>,
}

impl Dashboard {
    pub fn new(
        api: Arc<dyn SubdomainApi>,
        ui: UiPorts,
        root_domain: String,
        debounce: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            ui,
            root_domain,
            debouncer: Debouncer::new(debounce),
            state: Mutex::new(DashboardState::default()),
        })
    }

    /// Fetches the claim and the token status in parallel.
    #[instrument(skip(self))]
    pub async fn mount(&self) {
        tokio::join!(self.fetch_claim(), self.fetch_token_status());
    }

    pub async fn fetch_claim(&self) {
        match self.api.my_subdomain().await {
            Ok(Some(subdomain)) => self.lock().claim = ClaimState::Claimed(subdomain),
            Ok(None) => self.lock().claim = ClaimState::Absent,
            Err(e) => {
                debug!(error = %e, code = e.code().as_str(), "failed to fetch subdomain");
                self.notify(Notice::error("Failed to fetch subdomain"));
            }
        }
    }

    /// Failures are ignored: without a claim there is no token to report.
    pub async fn fetch_token_status(&self) {
        match self.api.admin_token_status().await {
            Ok(status) => self.lock().token_status = Some(status),
            Err(e) => debug!(error = %e, "ignoring admin token status failure"),
        }
    }

    /// Records a keystroke in the subdomain field and (re)schedules the
    /// debounced availability probe for it.
    pub fn on_input_changed(self: &Arc<Self>, value: &str) {
        let name = normalize_subdomain(value);

        {
            let mut state = self.lock();
            state.input = value.to_string();
            if state.availability.name() != Some(name.as_str()) {
                state.availability = AvailabilityState::Unknown;
            }
        }

        if !is_checkable_subdomain(&name) {
            self.debouncer.cancel();
            return;
        }

        let this: Weak<Self> = Arc::downgrade(self);
        self.debouncer.schedule(move |key| async move {
            if let Some(this) = this.upgrade() {
                this.run_check(key, name).await;
            }
        });
    }

    /// Drops any pending availability probe.
    pub fn unmount(&self) {
        self.debouncer.cancel();
    }

    /// Waits for a scheduled availability probe, if any, to finish.
    pub async fn settle(&self) {
        self.debouncer.flush().await;
    }

    async fn run_check(&self, key: DebounceKey, name: String) {
        {
            let mut state = self.lock();
            if !key.is_current() {
                return;
            }
            state.availability = AvailabilityState::Checking { name: name.clone() };
        }

        let result = match self.api.check_availability(&name).await {
            Ok(result) => result,
            Err(e) => {
                debug!(error = %e, %name, "availability check failed");
                SubdomainAvailability {
                    available: false,
                    reason: Some(CHECK_FAILED_REASON.to_string()),
                }
            }
        };

        let mut state = self.lock();
        if key.is_current() && normalize_subdomain(&state.input) == name {
            state.availability = AvailabilityState::Known { name, result };
        } else {
            debug!(%name, "discarding stale availability result");
        }
    }

    pub fn can_create(&self) -> bool {
        let state = self.lock();
        Self::input_is_available(&state)
            && !state.in_flight.contains(&DashboardAction::CreateClaim)
    }

    #[instrument(skip(self))]
    pub async fn create_claim(&self) -> Outcome<Subdomain> {
        let Some(name) = self.available_input() else {
            return Outcome::Skipped(SkipReason::Disabled);
        };
        let Some(_guard) = self.begin(DashboardAction::CreateClaim) else {
            return Outcome::Skipped(SkipReason::InFlight);
        };

        let outcome = match self.api.create_subdomain(&name).await {
            Ok(subdomain) => {
                info!(subdomain = %subdomain.subdomain, "subdomain created");
                self.replace_claim(subdomain.clone());
                self.succeed(subdomain, "Subdomain created successfully!")
            }
            Err(e) => self.fail(e.user_message("Failed to create subdomain")),
        };

        // Claim creation can change token eligibility either way.
        self.fetch_token_status().await;
        outcome
    }

    #[instrument(skip(self))]
    pub async fn rename_claim(&self) -> Outcome<Subdomain> {
        if self.lock().claim.subdomain().is_none() {
            return Outcome::Skipped(SkipReason::Disabled);
        }
        let Some(name) = self.available_input() else {
            return Outcome::Skipped(SkipReason::Disabled);
        };
        let Some(_guard) = self.begin(DashboardAction::RenameClaim) else {
            return Outcome::Skipped(SkipReason::InFlight);
        };

        match self.api.rename_subdomain(&name).await {
            Ok(subdomain) => {
                info!(subdomain = %subdomain.subdomain, "subdomain renamed");
                self.replace_claim(subdomain.clone());
                self.succeed(subdomain, "Subdomain updated successfully!")
            }
            Err(e) => self.fail(e.user_message("Failed to update subdomain")),
        }
    }

    /// Deleting the claim revokes its tokens server-side, so local token state goes too.
    #[instrument(skip(self))]
    pub async fn delete_claim(&self) -> Outcome {
        if self.is_busy(DashboardAction::DeleteClaim) {
            return Outcome::Skipped(SkipReason::InFlight);
        }
        if !self.ui.confirm.confirm(DELETE_CLAIM_PROMPT) {
            return Outcome::Skipped(SkipReason::NotConfirmed);
        }
        let Some(_guard) = self.begin(DashboardAction::DeleteClaim) else {
            return Outcome::Skipped(SkipReason::InFlight);
        };

        match self.api.delete_subdomain().await {
            Ok(()) => {
                {
                    let mut state = self.lock();
                    state.claim = ClaimState::Absent;
                    state.token_status = None;
                    state.token_secret = None;
                    state.token_visible = false;
                }
                info!("subdomain deleted");
                self.succeed((), "Subdomain deleted successfully")
            }
            Err(e) => self.fail(e.user_message("Failed to delete subdomain")),
        }
    }

    /// Issues a new admin token, replacing any existing one.
    #[instrument(skip(self))]
    pub async fn generate_token(&self) -> Outcome {
        let Some(_guard) = self.begin(DashboardAction::GenerateToken) else {
            return Outcome::Skipped(SkipReason::InFlight);
        };

        match self.api.generate_admin_token().await {
            Ok(token) => {
                {
                    let mut state = self.lock();
                    state.token_secret = Some(SecretString::new(token.token.into()));
                    state.token_visible = true;
                }
                info!(created_at = %token.created_at, "admin token generated");
                self.fetch_token_status().await;
                self.succeed((), "Admin token generated successfully!")
            }
            Err(e) => self.fail(e.user_message("Failed to generate admin token")),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_token(&self) -> Outcome {
        if self.is_busy(DashboardAction::DeleteToken) {
            return Outcome::Skipped(SkipReason::InFlight);
        }
        if !self.ui.confirm.confirm(DELETE_TOKEN_PROMPT) {
            return Outcome::Skipped(SkipReason::NotConfirmed);
        }
        let Some(_guard) = self.begin(DashboardAction::DeleteToken) else {
            return Outcome::Skipped(SkipReason::InFlight);
        };

        match self.api.delete_admin_token().await {
            Ok(()) => {
                {
                    let mut state = self.lock();
                    state.token_status = Some(AdminTokenStatus {
                        has_token: false,
                        created_at: None,
                    });
                    state.token_secret = None;
                    state.token_visible = false;
                }
                info!("admin token deleted");
                self.succeed((), "Admin token deleted successfully")
            }
            Err(e) => self.fail(e.user_message("Failed to delete admin token")),
        }
    }

    /// Flips between showing the generated token in clear and masked. Returns the new visibility.
    pub fn toggle_token_visibility(&self) -> bool {
        let mut state = self.lock();
        state.token_visible = !state.token_visible;
        state.token_visible
    }

    pub fn copy_token(&self) -> Outcome {
        let token = self
            .lock()
            .token_secret
            .as_ref()
            .map(|secret| secret.expose_secret().to_string());
        match token {
            Some(token) => self.copy(&token),
            None => Outcome::Skipped(SkipReason::Disabled),
        }
    }

    pub fn copy_url(&self) -> Outcome {
        let url = self.lock().claim.subdomain().map(|s| s.full_url.clone());
        match url {
            Some(url) => self.copy(&url),
            None => Outcome::Skipped(SkipReason::Disabled),
        }
    }

    pub fn view(&self) -> DashboardView {
        let state = self.lock();
        let token_display = state.token_secret.as_ref().map(|secret| {
            let raw = secret.expose_secret();
            if state.token_visible {
                raw.to_string()
            } else {
                "•".repeat(raw.chars().count())
            }
        });
        let claimed = state.claim.subdomain().is_some();

        DashboardView {
            claim: state.claim.clone(),
            input: state.input.clone(),
            availability: state.availability.clone(),
            token_status: state.token_status.clone(),
            token_display,
            token_visible: state.token_visible,
            can_create: Self::input_is_available(&state)
                && !state.in_flight.contains(&DashboardAction::CreateClaim),
            can_rename: claimed
                && Self::input_is_available(&state)
                && !state.in_flight.contains(&DashboardAction::RenameClaim),
            admin_endpoint: state
                .claim
                .subdomain()
                .map(|s| admin_endpoint(&s.subdomain, &self.root_domain)),
            in_flight: state.in_flight.iter().copied().collect(),
        }
    }

    pub fn is_busy(&self, action: DashboardAction) -> bool {
        self.lock().in_flight.contains(&action)
    }

    fn copy(&self, text: &str) -> Outcome {
        match self.ui.clipboard.copy(text) {
            Ok(()) => self.succeed((), "Copied to clipboard!"),
            Err(e) => {
                debug!(error = %e, "clipboard copy failed");
                self.fail("Failed to copy to clipboard")
            }
        }
    }

    fn input_is_available(state: &DashboardState) -> bool {
        state
            .availability
            .is_available_for(&normalize_subdomain(&state.input))
    }

    /// The normalized input, if the last probe cleared exactly it.
    fn available_input(&self) -> Option<String> {
        let state = self.lock();
        let name = normalize_subdomain(&state.input);
        state.availability.is_available_for(&name).then_some(name)
    }

    fn replace_claim(&self, subdomain: Subdomain) {
        self.debouncer.cancel();
        let mut state = self.lock();
        state.claim = ClaimState::Claimed(subdomain);
        state.input.clear();
        state.availability = AvailabilityState::Unknown;
    }

    fn begin(&self, action: DashboardAction) -> Option<InFlightGuard<'_>> {
        let mut state = self.lock();
        if !state.in_flight.insert(action) {
            return None;
        }
        Some(InFlightGuard {
            dashboard: self,
            action,
        })
    }

    fn succeed<T>(&self, value: T, message: &str) -> Outcome<T> {
        self.notify(Notice::success(message));
        Outcome::done(value, message)
    }

    fn fail<T>(&self, message: impl Into<String>) -> Outcome<T> {
        let message = message.into();
        self.notify(Notice::error(message.clone()));
        Outcome::failed(message)
    }

    fn notify(&self, notice: Notice) {
        self.ui.notifier.notify(notice);
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Clears the in-flight flag when the action finishes, however it finishes.
struct InFlightGuard<'a> {
    dashboard: &'a Dashboard,
    action: DashboardAction,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.dashboard.lock().in_flight.remove(&self.action);
    }
}

/// Admin API base URL for a claimed subdomain.
pub fn admin_endpoint(subdomain: &str, root_domain: &str) -> String {
    format!("https://{}.{}/api/admin", subdomain, root_domain)
}
