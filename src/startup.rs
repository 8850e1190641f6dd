//! Application startup.
//!
//! Builds the token store and session manager from configuration and runs the
//! initial session resolution.

use std::sync::Arc;
use tracing::info;

use crate::config::ConfigV1;
use crate::session::{SessionError, SessionManager};
use crate::state::AppContext;
use crate::store::create_store;

/// Wire up the context without touching the network.
pub fn build_context(config: Arc<ConfigV1>) -> AppContext {
    let store = create_store(&config.store);
    let session = SessionManager::from_config(&config.api, store);
    AppContext { config, session }
}

/// Build the context and resolve the session once, the way the application
/// does when it mounts.
///
/// # Errors
///
/// Returns an error only if the token store cannot be cleared after a failed
/// resolution; a rejected token simply leaves the session anonymous.
pub async fn run(config: Arc<ConfigV1>) -> Result<AppContext, SessionError> {
    let mut context = build_context(config);
    info!(
        "Starting client against {} with {} token store",
        context.config.api.base_url,
        context.session.store().name()
    );
    let state = context.session.init().await?;
    info!(
        event_name = "startup.session.resolved",
        event_domain = "startup",
        state = state.label(),
        "session resolved"
    );
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;

    #[test]
    fn test_build_context_starts_unresolved() {
        let context = build_context(Arc::new(ConfigV1::default()));
        assert_eq!(context.session.state(), &SessionState::Unresolved);
        assert_eq!(context.session.store().name(), "memory");
    }

    #[tokio::test]
    async fn test_run_without_token_is_anonymous() {
        // Memory store starts empty, so no request is made.
        let context = run(Arc::new(ConfigV1::default())).await.unwrap();
        assert_eq!(context.session.state(), &SessionState::Anonymous);
    }
}
