//! Library exports for the ELMS client, shared between the binary and tests.
//!
//! The session core of the property-management frontend: a token store, an
//! API client that attaches the stored bearer token, a session manager and a
//! route authorization gate.

pub mod api;
pub mod config;
pub mod models;
pub mod routing;
pub mod session;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
