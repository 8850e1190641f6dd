use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::state::{Session, SessionState};
use crate::api::{ApiClient, ApiError};
use crate::config::ApiConfig;
use crate::models::{Credentials, RegistrationRequest, TokenPair, User};
use crate::store::{StoreError, TokenStore};

#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend call failed; the error is passed through unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("no refresh token stored")]
    NoRefreshToken,
}

/// Owns the session: the token store, the API client reading from it, and
/// the resolved state. There is one per application and it is passed around
/// explicitly; every transition goes through `&mut self`.
///
/// After any `check_auth`, `login` or `logout` completes, a user is present
/// exactly when an access token is stored.
pub struct SessionManager {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    state: SessionState,
}

impl SessionManager {
    /// `client` should read its bearer token from the same `store`.
    pub fn new(client: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        SessionManager {
            client,
            store,
            state: SessionState::Unresolved,
        }
    }

    /// Build the API client from config, wired to `store`.
    pub fn from_config(config: &ApiConfig, store: Arc<dyn TokenStore>) -> Self {
        let client = ApiClient::new(config, store.clone());
        Self::new(client, store)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Session {
        Session::from(&self.state)
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user()
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// The start-up resolution pass. Only the first call does any work.
    pub async fn init(&mut self) -> Result<&SessionState, SessionError> {
        if self.state == SessionState::Unresolved {
            info!("Resolving session at start-up...");
            self.check_auth().await?;
        }
        Ok(&self.state)
    }

    /// Resolve the session from whatever token is stored.
    ///
    /// No token: anonymous. A token: fetch the profile; on any failure both
    /// tokens are cleared and the session becomes anonymous. If the returned
    /// future is dropped mid-fetch the state goes back to `Unresolved`, so a
    /// later `init` tries again.
    pub async fn check_auth(&mut self) -> Result<&SessionState, SessionError> {
        let token_present = match self.store.access() {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(
                    event_name = "session.check_auth.store_unreadable",
                    event_domain = "session",
                    store = self.store.name(),
                    error = %e,
                    "token store unreadable; resetting session"
                );
                self.state = SessionState::Anonymous;
                self.store.clear()?;
                return Ok(&self.state);
            }
        };

        if !token_present {
            debug!(
                event_name = "session.check_auth.no_token",
                event_domain = "session",
                "no access token stored"
            );
            self.state = SessionState::Anonymous;
            return Ok(&self.state);
        }

        let resolving = Resolving::enter(&mut self.state);
        match self.client.auth().profile().await {
            Ok(user) => {
                info!(
                    event_name = "session.check_auth.authenticated",
                    event_domain = "session",
                    username = user.username.as_str(),
                    role = user.role.as_str(),
                    "session resolved"
                );
                resolving.settle(SessionState::Authenticated(user));
            }
            Err(e) => {
                warn!(
                    event_name = "session.check_auth.profile_failed",
                    event_domain = "session",
                    error = %e,
                    "profile fetch failed; clearing tokens"
                );
                resolving.settle(SessionState::Anonymous);
                self.store.clear()?;
            }
        }
        Ok(&self.state)
    }

    /// Issue tokens for `credentials`, store them, then resolve the profile.
    /// A failing token request is returned as-is and leaves the session untouched.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<TokenPair, SessionError> {
        debug!(
            event_name = "session.login.attempt",
            event_domain = "session",
            username = credentials.username.as_str(),
            "requesting tokens"
        );
        let pair = self.client.auth().issue_token(credentials).await?;
        self.store.save(&pair)?;
        self.check_auth().await?;
        info!(
            event_name = "session.login.completed",
            event_domain = "session",
            username = credentials.username.as_str(),
            state = self.state.label(),
            "login completed"
        );
        Ok(pair)
    }

    /// Forget the tokens and the user. No network call.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.state = SessionState::Anonymous;
        self.store.clear()?;
        info!(
            event_name = "session.logout",
            event_domain = "session",
            "session reset"
        );
        Ok(())
    }

    /// Create an account. The session itself is not touched; the caller logs
    /// in afterwards if it wants to.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<Value, SessionError> {
        if !request.passwords_match() {
            return Err(SessionError::PasswordMismatch);
        }
        let created = self.client.auth().register(request).await?;
        info!(
            event_name = "session.register.completed",
            event_domain = "session",
            username = request.username.as_str(),
            role = request.role.as_str(),
            "account registered"
        );
        Ok(created)
    }

    /// Trade the stored refresh token for a new access token. Only ever
    /// called explicitly; a failure logs the session out.
    pub async fn refresh_access(&mut self) -> Result<(), SessionError> {
        let refresh = self.store.refresh()?.ok_or(SessionError::NoRefreshToken)?;
        match self.client.auth().refresh_token(&refresh).await {
            Ok(refreshed) => {
                let pair = TokenPair {
                    access: refreshed.access,
                    refresh: refreshed.refresh.unwrap_or(refresh),
                };
                self.store.save(&pair)?;
                debug!(
                    event_name = "session.refresh.completed",
                    event_domain = "session",
                    "access token refreshed"
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    event_name = "session.refresh.failed",
                    event_domain = "session",
                    error = %e,
                    "refresh rejected; logging out"
                );
                self.logout()?;
                Err(e.into())
            }
        }
    }

    /// Views report failed endpoint calls here. A 401 means the token is no
    /// good anymore, so the session is reset and the gate will send the user
    /// to the login screen. Returns whether the session was reset.
    pub fn handle_api_error(&mut self, error: &ApiError) -> bool {
        if !error.is_unauthorized() {
            return false;
        }
        if let Err(e) = self.logout() {
            warn!(
                event_name = "session.handle_api_error.clear_failed",
                event_domain = "session",
                error = %e,
                "could not clear tokens after 401"
            );
        }
        true
    }
}

/// Holds the state at `Resolving` for the duration of a profile fetch.
/// Dropped without `settle` (the fetch was cancelled), it puts the state back
/// to `Unresolved`.
struct Resolving<'a> {
    state: &'a mut SessionState,
    settled: bool,
}

impl<'a> Resolving<'a> {
    fn enter(state: &'a mut SessionState) -> Self {
        *state = SessionState::Resolving;
        Resolving {
            state,
            settled: false,
        }
    }

    fn settle(mut self, outcome: SessionState) {
        *self.state = outcome;
        self.settled = true;
    }
}

impl Drop for Resolving<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!(
                event_name = "session.check_auth.cancelled",
                event_domain = "session",
                "profile fetch dropped; session back to unresolved"
            );
            *self.state = SessionState::Unresolved;
        }
    }
}
