use std::path::PathBuf;

use thiserror::Error;

/// Infrastructure errors that can occur during startup.
///
/// Display messages never include credentials; use Display (%e) in logs.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Configuration error: {var} is invalid ({reason})")]
    ConfigInvalid { var: &'static str, reason: String },

    #[error("Could not determine home directory. Set LUMINARA_HOME.")]
    HomeDirUnavailable,

    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open log file {path}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client initialization failed")]
    HttpClient(#[source] reqwest::Error),
}

impl From<reqwest::Error> for InfraError {
    fn from(e: reqwest::Error) -> Self {
        InfraError::HttpClient(e)
    }
}
