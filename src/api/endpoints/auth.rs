use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::{ApiClient, ApiError};
use crate::models::{Credentials, RegistrationRequest, TokenPair, User};

const TOKEN_PATH: &str = "auth/token/";
const TOKEN_REFRESH_PATH: &str = "auth/token/refresh/";
const REGISTER_PATH: &str = "users/register/";
const PROFILE_PATH: &str = "users/profile/";

/// Response of `auth/token/refresh/`. The backend only sends a new refresh
/// token when it rotates them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RefreshedToken {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Token issue, registration and the current user's profile.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token pair. Sent without interceptors.
    pub async fn issue_token(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.client
            .plain_request(Method::POST, TOKEN_PATH)
            .json(credentials)
            .send()
            .await
    }

    /// Exchange a refresh token for a new access token. Sent without interceptors.
    pub async fn refresh_token(&self, refresh: &str) -> Result<RefreshedToken, ApiError> {
        self.client
            .plain_request(Method::POST, TOKEN_REFRESH_PATH)
            .json(&json!({ "refresh": refresh }))
            .send()
            .await
    }

    /// Create an account. The backend echoes the created user back.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<Value, ApiError> {
        self.client
            .plain_request(Method::POST, REGISTER_PATH)
            .json(request)
            .send()
            .await
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        self.client.get(PROFILE_PATH).await
    }
}
