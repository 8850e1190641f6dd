use std::sync::Arc;

use reqwest::RequestBuilder;
use tracing::{trace, warn};

use crate::store::TokenStore;

/// An Interceptor gets to adjust every outgoing request before it is sent
/// (headers only; it never sends anything itself).
pub trait Interceptor: Send + Sync {
    fn get_name(&self) -> &str;
    fn intercept(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Attaches `Authorization: Bearer <access>` whenever the store holds an access token.
/// Without a token the request goes out unauthenticated and the backend decides.
pub struct BearerInterceptor {
    store: Arc<dyn TokenStore>,
}

impl BearerInterceptor {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }
}

impl Interceptor for BearerInterceptor {
    fn get_name(&self) -> &str {
        "bearer"
    }

    fn intercept(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.access() {
            Ok(Some(token)) => {
                trace!(
                    event_name = "api.interceptor.bearer.attached",
                    event_domain = "api",
                    "attaching bearer token"
                );
                request.bearer_auth(token)
            }
            Ok(None) => {
                trace!(
                    event_name = "api.interceptor.bearer.absent",
                    event_domain = "api",
                    "no access token stored; sending unauthenticated"
                );
                request
            }
            Err(e) => {
                warn!(
                    event_name = "api.interceptor.bearer.store_error",
                    event_domain = "api",
                    store = self.store.name(),
                    error = %e,
                    "could not read access token; sending unauthenticated"
                );
                request
            }
        }
    }
}
