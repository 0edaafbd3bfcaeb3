//! Recording implementations of the UI ports and the credential store.

use std::sync::{Arc, Mutex};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::{
        storage::CredentialStore,
        ui::{Browser, Clipboard, Confirm, Notifier, UiPorts},
    },
    domain::entities::{credential::Credential, notice::Notice},
};

// ============================================================================
// UiPorts builders
// ============================================================================

pub fn test_ui(
    notifier: &Arc<RecordingNotifier>,
    clipboard: &Arc<FakeClipboard>,
    confirm: &Arc<ScriptedConfirm>,
) -> UiPorts {
    UiPorts {
        notifier: notifier.clone(),
        clipboard: clipboard.clone(),
        confirm: confirm.clone(),
        browser: Arc::new(RecordingBrowser::new()),
    }
}

pub fn test_ui_with_browser(
    notifier: &Arc<RecordingNotifier>,
    browser: &Arc<RecordingBrowser>,
) -> UiPorts {
    UiPorts {
        notifier: notifier.clone(),
        clipboard: Arc::new(FakeClipboard::new()),
        confirm: Arc::new(ScriptedConfirm::new(true)),
        browser: browser.clone(),
    }
}

// ============================================================================
// RecordingNotifier
// ============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

// ============================================================================
// FakeClipboard
// ============================================================================

#[derive(Default)]
pub struct FakeClipboard {
    copied: Mutex<Vec<String>>,
    failing: Mutex<bool>,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.lock().unwrap().clone()
    }
}

impl Clipboard for FakeClipboard {
    fn copy(&self, text: &str) -> AppResult<()> {
        if *self.failing.lock().unwrap() {
            return Err(AppError::Clipboard("no clipboard available".into()));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

// ============================================================================
// ScriptedConfirm
// ============================================================================

pub struct ScriptedConfirm {
    answer: Mutex<bool>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer: Mutex::new(answer),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn set_answer(&self, answer: bool) {
        *self.answer.lock().unwrap() = answer;
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        *self.answer.lock().unwrap()
    }
}

// ============================================================================
// RecordingBrowser
// ============================================================================

#[derive(Default)]
pub struct RecordingBrowser {
    opened: Mutex<Vec<String>>,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Browser for RecordingBrowser {
    fn open(&self, url: &str) -> AppResult<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

// ============================================================================
// MemoryCredentialStore
// ============================================================================

#[derive(Default)]
pub struct MemoryCredentialStore {
    credential: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(credential: Credential) -> Self {
        Self {
            credential: Mutex::new(Some(credential)),
        }
    }

    pub fn current(&self) -> Option<Credential> {
        self.credential.lock().unwrap().clone()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> AppResult<Option<Credential>> {
        Ok(self.current())
    }

    fn save(&self, credential: &Credential) -> AppResult<()> {
        *self.credential.lock().unwrap() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.credential.lock().unwrap() = None;
        Ok(())
    }
}
