use crate::models::{Role, User};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing has been checked yet.
    #[default]
    Unresolved,
    /// A profile fetch is in flight.
    Resolving,
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

    pub fn role(&self) -> Option<&Role> {
        self.user().map(|user| &user.role)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// True until the first resolution has finished.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Unresolved | SessionState::Resolving)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Unresolved => "unresolved",
            SessionState::Resolving => "resolving",
            SessionState::Authenticated(_) => "authenticated",
            SessionState::Anonymous => "anonymous",
        }
    }
}

/// The flat view consumers read: the resolved user, if any, and whether
/// resolution is still underway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    pub loading: bool,
}

impl From<&SessionState> for Session {
    fn from(state: &SessionState) -> Self {
        Session {
            user: state.user().cloned(),
            loading: state.is_loading(),
        }
    }
}
