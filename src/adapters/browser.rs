use tracing::info;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::ui::Browser,
};

/// Opens URLs with the platform's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> AppResult<()> {
        info!(%url, "opening browser");
        open::that(url).map_err(|e| AppError::Internal(format!("failed to open browser: {}", e)))
    }
}
