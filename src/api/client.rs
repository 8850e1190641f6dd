use std::sync::Arc;

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::endpoints::{AuthApi, FinanceApi, MaintenanceApi, PropertiesApi, TenantsApi, UnitsApi};
use super::error::ApiError;
use super::interceptors::{BearerInterceptor, Interceptor};
use crate::config::ApiConfig;
use crate::models::ListEnvelope;
use crate::store::TokenStore;

/// The one HTTP client of the application: a base URL plus an interceptor chain
/// that runs on every authenticated request.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    interceptors: Vec<Box<dyn Interceptor>>,
}

impl ApiClient {
    /// A client whose requests carry the access token currently held by `store`.
    pub fn new(config: &ApiConfig, store: Arc<dyn TokenStore>) -> Self {
        Self::without_interceptors(config).with_interceptor(Box::new(BearerInterceptor::new(store)))
    }

    pub fn without_interceptors(config: &ApiConfig) -> Self {
        debug!("Creating API client for base URL '{}'", config.base_url);
        ApiClient {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            interceptors: Vec::new(),
        }
    }

    pub fn with_interceptor(mut self, interceptor: Box<dyn Interceptor>) -> Self {
        debug!("Registering '{}' interceptor", interceptor.get_name());
        self.interceptors.push(interceptor);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// A request that goes through the interceptor chain.
    pub fn request(&self, method: Method, path: &str) -> ApiRequest {
        let url = self.url(path);
        let builder = self
            .interceptors
            .iter()
            .fold(self.http.request(method.clone(), &url), |builder, interceptor| {
                interceptor.intercept(builder)
            });
        ApiRequest { method, url, builder }
    }

    /// A request that bypasses the interceptors (token issue, registration).
    pub fn plain_request(&self, method: Method, path: &str) -> ApiRequest {
        let url = self.url(path);
        let builder = self.http.request(method.clone(), &url);
        ApiRequest { method, url, builder }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path).send().await
    }

    /// GET a list endpoint and normalize its envelope into a plain Vec.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        self.request(Method::GET, path).send_list().await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path).json(body).send().await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path).json(body).send().await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::DELETE, path).send_empty().await
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn properties(&self) -> PropertiesApi<'_> {
        PropertiesApi::new(self)
    }

    pub fn units(&self) -> UnitsApi<'_> {
        UnitsApi::new(self)
    }

    pub fn tenants(&self) -> TenantsApi<'_> {
        TenantsApi::new(self)
    }

    pub fn finance(&self) -> FinanceApi<'_> {
        FinanceApi::new(self)
    }

    pub fn maintenance(&self) -> MaintenanceApi<'_> {
        MaintenanceApi::new(self)
    }
}

/// A request that has been addressed (and intercepted) but not sent yet.
pub struct ApiRequest {
    method: Method,
    url: String,
    builder: RequestBuilder,
}

impl ApiRequest {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.builder = self.builder.json(body);
        self
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.builder = self.builder.multipart(form);
        self
    }

    /// Send and decode a JSON body.
    pub async fn send<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let url = self.url.clone();
        let response = self.execute().await?;
        let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            url,
            message: e.to_string(),
        })
    }

    /// Send and normalize a list response (bare array or `{results: [...]}`).
    pub async fn send_list<T: DeserializeOwned>(self) -> Result<Vec<T>, ApiError> {
        self.send::<ListEnvelope<T>>()
            .await
            .map(ListEnvelope::into_items)
    }

    /// Send and ignore whatever body comes back (e.g. 204 on delete).
    pub async fn send_empty(self) -> Result<(), ApiError> {
        self.execute().await.map(|_| ())
    }

    async fn execute(self) -> Result<Response, ApiError> {
        let ApiRequest { method, url, builder } = self;
        debug!(
            event_name = "api.request.sent",
            event_domain = "api",
            method = %method,
            url = url.as_str(),
            "sending request"
        );

        let response = builder.send().await.map_err(|source| {
            warn!(
                event_name = "api.request.transport_error",
                event_domain = "api",
                method = %method,
                url = url.as_str(),
                error = %source,
                "request failed before a response arrived"
            );
            ApiError::Transport {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        debug!(
            event_name = "api.response.received",
            event_domain = "api",
            method = %method,
            url = url.as_str(),
            status = status.as_u16(),
            "response received"
        );
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(
                    event_name = "api.response.body_unreadable",
                    event_domain = "api",
                    method = %method,
                    url = url.as_str(),
                    status = status.as_u16(),
                    error = %e,
                    "could not read error body"
                );
                String::new()
            }
        };
        Err(ApiError::from_status(url, status, body))
    }
}
