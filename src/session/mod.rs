//! Session lifecycle: `new` (unresolved) -> `init` (one resolution pass)
//! -> authenticated | anonymous -> `logout` (reset).

pub mod manager;
pub mod state;

pub use manager::{SessionError, SessionManager};
pub use state::{Session, SessionState};
