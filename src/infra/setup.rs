use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{
        app_context::AppContext,
        browser::SystemBrowser,
        clipboard::SystemClipboard,
        console::{AssumeYes, ConsoleNotifier, StdinConfirm},
        http::api_client::ApiClient,
        storage::file_credential_store::FileCredentialStore,
    },
    application::ports::{
        storage::CredentialStore,
        ui::{Confirm, UiPorts},
    },
    infra::{config::AppConfig, error::InfraError, http_client::try_build_client},
};

/// Filter used when `RUST_LOG` is unset. Notices are printed by the notifier,
/// so only problems nothing else reports get through.
pub const DEFAULT_LOG_FILTER: &str = "luminara=warn";

/// Wires adapters and use cases into a context. The session is not
/// resolved yet; call [`AppContext::init`].
pub fn init_app_context(config: AppConfig, assume_yes: bool) -> Result<AppContext, InfraError> {
    fs::create_dir_all(&config.home).map_err(|source| InfraError::CreateDir {
        path: config.home.clone(),
        source,
    })?;

    let store = FileCredentialStore::in_dir(&config.home);
    debug!(path = %store.path().display(), "credential store");
    let credentials: Arc<dyn CredentialStore> = Arc::new(store);
    let client = try_build_client(config.http_connect_timeout, config.http_request_timeout)?;
    let api = Arc::new(ApiClient::new(
        client,
        config.api_url.clone(),
        credentials.clone(),
    ));

    let confirm: Arc<dyn Confirm> = if assume_yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(StdinConfirm)
    };
    let ui = UiPorts {
        notifier: Arc::new(ConsoleNotifier),
        clipboard: Arc::new(SystemClipboard::new()),
        confirm,
        browser: Arc::new(SystemBrowser),
    };

    Ok(AppContext::new(config, api, credentials, ui))
}

/// Console logs go to stderr; a JSON copy goes to `log_file` when set.
pub fn init_tracing(log_file: Option<&Path>) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let json_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| InfraError::LogFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Arc::new(file))
                    .with_current_span(true)
                    .with_span_list(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
