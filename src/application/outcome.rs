//! Explicit result values for user-triggered actions.
//!
//! View operations never raise: every action reports what happened as a value
//! (and pushes the same message to the notifier), so callers can see the
//! failure paths in the type.

use crate::domain::entities::route::Route;

/// Why an action did not reach the API at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The user declined the confirmation prompt.
    NotConfirmed,
    /// The same action is already in flight.
    InFlight,
    /// The action's trigger is disabled in the current state.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    /// The API confirmed the action; `message` is what the user was told.
    Done { value: T, message: String },
    Failed { message: String },
    Skipped(SkipReason),
}

impl<T> Outcome<T> {
    pub fn done(value: T, message: impl Into<String>) -> Self {
        Outcome::Done {
            value,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Outcome::Failed {
            message: message.into(),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Done { message, .. } | Outcome::Failed { message } => Some(message),
            Outcome::Skipped(_) => None,
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            Outcome::Done { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Field-level validation messages for a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, msg)| msg.as_str())
    }
}

/// Result of submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The submission succeeded and the client should move to `Route`.
    Navigate(Route),
    /// The API rejected the submission; the form keeps its values.
    Failed { message: String },
}
