use luminara_types::User;

/// Who is logged in, as far as the client knows.
///
/// `Unresolved` until the session store is initialized; `Loading` while a
/// credential is being resolved into an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unresolved,
    Loading,
    Authenticated(User),
    Anonymous,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// True until the store has settled on authenticated or anonymous.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Unresolved | SessionState::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Unresolved => "unresolved",
            SessionState::Loading => "loading",
            SessionState::Authenticated(_) => "authenticated",
            SessionState::Anonymous => "anonymous",
        }
    }
}
