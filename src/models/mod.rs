// Re-exports so callers can do "use crate::models::*".
pub mod envelope;
pub mod resources;
pub mod statistics;
pub mod token;
pub mod user;

pub use envelope::ListEnvelope;
pub use resources::*;
pub use statistics::*;
pub use token::{Credentials, TokenPair};
pub use user::{RegistrationRequest, Role, User};
