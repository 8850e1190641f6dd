//! The API gateway: one HTTP client, its interceptors, and the typed
//! endpoint groups built on top of it.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod interceptors;

pub use client::{ApiClient, ApiRequest};
pub use endpoints::RefreshedToken;
pub use error::ApiError;
pub use interceptors::{BearerInterceptor, Interceptor};
