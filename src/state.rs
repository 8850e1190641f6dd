//! Shared application context.
//!
//! Holds what a running client needs: the loaded configuration and the
//! one session manager.

use crate::config::ConfigV1;
use crate::session::SessionManager;
use std::sync::Arc;

/// Everything the CLI (or any other front end) works against.
pub struct AppContext {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// The session, along with the API client and token store it owns.
    pub session: SessionManager,
}
