use crate::domain::entities::{route::Route, session::SessionState};

/// A call to action on the landing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallToAction {
    pub label: &'static str,
    pub target: Route,
}

/// Calls to action for the current session; none until it has settled.
pub fn calls_to_action(state: &SessionState) -> Vec<CallToAction> {
    match state {
        SessionState::Authenticated(_) => vec![CallToAction {
            label: "Go to Dashboard",
            target: Route::Dashboard,
        }],
        SessionState::Anonymous => vec![
            CallToAction {
                label: "Get Started",
                target: Route::Register,
            },
            CallToAction {
                label: "Sign In",
                target: Route::Login,
            },
        ],
        SessionState::Unresolved | SessionState::Loading => Vec::new(),
    }
}
