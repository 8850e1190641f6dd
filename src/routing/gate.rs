use tracing::debug;

use crate::models::Role;
use crate::session::SessionState;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// What a protected view should do for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Session not resolved yet: show a placeholder, do not redirect.
    Pending,
    Render,
    Redirect(&'static str),
}

/// Decide whether the view at `path` may render for `state`.
///
/// An empty `allowed` set admits any authenticated user. Role membership is
/// exact: `Role::Unknown` never matches. Anonymous sessions go to the login
/// screen without remembering `path`.
pub fn authorize(state: &SessionState, allowed: &[Role], path: &str) -> GateDecision {
    let decision = match state {
        SessionState::Unresolved | SessionState::Resolving => GateDecision::Pending,
        SessionState::Anonymous => GateDecision::Redirect(LOGIN_PATH),
        SessionState::Authenticated(user) => {
            if allowed.is_empty() || allowed.contains(&user.role) {
                GateDecision::Render
            } else {
                GateDecision::Redirect(DASHBOARD_PATH)
            }
        }
    };

    debug!(
        event_name = "routing.gate.decision",
        event_domain = "routing",
        path,
        session = state.label(),
        decision = ?decision,
        "route gate evaluated"
    );
    decision
}
