use std::sync::Arc;

use url::Url;

use crate::{
    application::{
        ports::{
            api::{AuthApi, SubdomainApi, UserApi},
            storage::CredentialStore,
            ui::UiPorts,
        },
        use_cases::{
            account::AccountUseCases, auth::AuthUseCases, dashboard::Dashboard,
            landing::{CallToAction, calls_to_action},
            session::SessionStore,
        },
    },
    domain::entities::session::SessionState,
    infra::config::AppConfig,
};

/// Everything a view needs, constructed once and passed explicitly.
///
/// The session is the only state shared between views; it is resolved by
/// [`AppContext::init`] and dropped by [`AppContext::teardown`].
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub session: Arc<SessionStore>,
    pub auth: Arc<AuthUseCases>,
    pub account: Arc<AccountUseCases>,
    pub dashboard: Arc<Dashboard>,
    pub ui: UiPorts,
}

impl AppContext {
    pub fn new<A>(
        config: AppConfig,
        api: Arc<A>,
        credentials: Arc<dyn CredentialStore>,
        ui: UiPorts,
    ) -> Self
    where
        A: UserApi + AuthApi + SubdomainApi + 'static,
    {
        let session = Arc::new(SessionStore::new(api.clone(), credentials));
        let auth = AuthUseCases::new(api.clone(), session.clone(), ui.clone());
        let account = AccountUseCases::new(api.clone(), session.clone(), ui.clone());
        let dashboard = Dashboard::new(
            api,
            ui.clone(),
            config.root_domain.clone(),
            config.availability_debounce,
        );

        Self {
            config: Arc::new(config),
            session,
            auth: Arc::new(auth),
            account: Arc::new(account),
            dashboard,
            ui,
        }
    }

    /// Resolves the startup session from `launch_url` or storage.
    pub async fn init(&self, launch_url: Option<&Url>) -> SessionState {
        self.session.init(launch_url).await
    }

    pub fn landing(&self) -> Vec<CallToAction> {
        calls_to_action(&self.session.state())
    }

    /// Cancels pending work and forgets the in-memory session.
    pub fn teardown(&self) {
        self.dashboard.unmount();
        self.session.teardown();
    }
}
