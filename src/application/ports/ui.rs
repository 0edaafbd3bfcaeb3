use std::sync::Arc;

use crate::{app_error::AppResult, domain::entities::notice::Notice};

/// Shows transient notifications to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> AppResult<()>;
}

/// Asks the user to confirm a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Sends the user to an external page (OAuth provider consent screens).
pub trait Browser: Send + Sync {
    fn open(&self, url: &str) -> AppResult<()>;
}

/// The interactive surfaces a view needs, bundled so every view is wired the same way.
#[derive(Clone)]
pub struct UiPorts {
    pub notifier: Arc<dyn Notifier>,
    pub clipboard: Arc<dyn Clipboard>,
    pub confirm: Arc<dyn Confirm>,
    pub browser: Arc<dyn Browser>,
}
