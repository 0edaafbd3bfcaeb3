//! Clipboard access with two transports:
//! 1. OSC 52 terminal escape sequence (works over SSH)
//! 2. System clipboard via `arboard`

use std::io::{IsTerminal, Write};

use base64::Engine;
use tracing::debug;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::ui::Clipboard,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    /// Writes the OSC 52 sequence to stderr so stdout stays clean for piping.
    fn copy_osc52(text: &str) -> AppResult<()> {
        let mut stderr = std::io::stderr();
        if !stderr.is_terminal() {
            return Err(AppError::Clipboard("stderr is not a terminal".into()));
        }

        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        // ESC ] 52 ; c ; <base64> ESC \
        write!(stderr, "\x1b]52;c;{}\x1b\\", encoded)
            .and_then(|_| stderr.flush())
            .map_err(|e| AppError::Clipboard(format!("OSC 52 write failed: {}", e)))
    }

    fn copy_system(text: &str) -> AppResult<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| AppError::Clipboard(format!("system clipboard unavailable: {}", e)))?;
        clipboard
            .set_text(text)
            .map_err(|e| AppError::Clipboard(format!("system clipboard write failed: {}", e)))
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> AppResult<()> {
        match Self::copy_osc52(text) {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!(error = %e, "falling back to system clipboard");
                Self::copy_system(text)
            }
        }
    }
}
