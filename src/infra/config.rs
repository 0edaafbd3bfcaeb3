use std::path::PathBuf;
use std::time::Duration;

use env_helpers::get_env_default;
use url::Url;

use crate::infra::error::InfraError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_ROOT_DOMAIN: &str = "myluminarasystem.pro";

pub struct AppConfig {
    /// Base URL of the Luminara REST API.
    pub api_url: Url,
    /// Domain under which subdomains are claimed (e.g., "myluminarasystem.pro").
    pub root_domain: String,
    /// Directory holding client-local storage.
    pub home: PathBuf,
    /// Quiet period after the last keystroke before availability is checked.
    pub availability_debounce: Duration,
    pub http_connect_timeout: Duration,
    pub http_request_timeout: Duration,
    /// Optional JSON log file.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Reads the environment. Command-line values take precedence, and an
    /// environment value they replace is never parsed or resolved.
    pub fn from_env(api_url: Option<Url>, home: Option<PathBuf>) -> Result<Self, InfraError> {
        let api_url = match api_url {
            Some(url) => url,
            None => {
                let raw: String =
                    get_env_default("LUMINARA_API_URL", DEFAULT_API_URL.to_string());
                parse_api_url(&raw)?
            }
        };

        let root_domain: String =
            get_env_default("LUMINARA_ROOT_DOMAIN", DEFAULT_ROOT_DOMAIN.to_string());
        let home = resolve_home(home, std::env::var("LUMINARA_HOME").ok(), dirs::home_dir)?;

        let debounce_ms: u64 = get_env_default("AVAILABILITY_DEBOUNCE_MS", 500);
        let connect_secs: u64 = get_env_default("HTTP_CONNECT_TIMEOUT_SECS", 5);
        let request_secs: u64 = get_env_default("HTTP_REQUEST_TIMEOUT_SECS", 30);
        let log_file = std::env::var("LOG_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_url,
            root_domain: root_domain.trim().trim_matches('.').to_lowercase(),
            home,
            availability_debounce: Duration::from_millis(debounce_ms),
            http_connect_timeout: Duration::from_secs(connect_secs),
            http_request_timeout: Duration::from_secs(request_secs),
            log_file,
        })
    }
}

pub fn parse_api_url(raw: &str) -> Result<Url, InfraError> {
    let url = Url::parse(raw.trim()).map_err(|e| InfraError::ConfigInvalid {
        var: "LUMINARA_API_URL",
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(InfraError::ConfigInvalid {
            var: "LUMINARA_API_URL",
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}

/// Returns the Luminara home directory.
///
/// Order: `--home`, then LUMINARA_HOME, then ~/.config/luminara. The user's
/// home directory is only looked up when neither is set.
pub fn resolve_home(
    flag: Option<PathBuf>,
    env: Option<String>,
    home_dir: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf, InfraError> {
    if let Some(home) = flag {
        return Ok(home);
    }
    if let Some(home) = env
        && !home.trim().is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    home_dir()
        .map(|h| h.join(".config").join("luminara"))
        .ok_or(InfraError::HomeDirUnavailable)
}
