//! Authentication endpoints and session lifecycle.
//!
//! The backend owns accounts; this module holds the client-visible session
//! (token + expiry) and the cached `UserProfile` projection it gates. Session
//! changes are published on a `watch` channel so consumers receive them by
//! explicit subscription instead of reading ambient global state.

use std::path::PathBuf;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use indiegrid_catalog::UserProfile;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::client::{check_status, ApiClient};
use crate::config::session_cache_path;
use crate::error::ApiError;
use crate::types::TokenResponse;

// ── Session ─────────────────────────────────────────────────────────────────

/// An authenticated session as cached on disk between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn from_token(resp: TokenResponse) -> Self {
        Self {
            access_token: resp.access_token,
            user_id: resp.user.id,
            email: resp.user.email,
            expires_at: Utc::now() + ChronoDuration::seconds(resp.expires_in),
        }
    }

    pub fn expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

// ── Auth endpoints ──────────────────────────────────────────────────────────

impl ApiClient {
    /// Password sign-in against the backend's token endpoint.
    pub async fn sign_in_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        let resp = self
            .http()
            .post(self.url("/auth/v1/token?grant_type=password"))
            .header("apikey", &self.backend().api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Create an account. The backend signs the new user in directly.
    pub async fn sign_up_request(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        let resp = self
            .http()
            .post(self.url("/auth/v1/signup"))
            .header("apikey", &self.backend().api_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": { "username": username },
            }))
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Authorization URL for an OAuth provider.
    ///
    /// The browser round-trip completes out-of-band; a non-browser frontend
    /// can only hand the URL to the user.
    pub fn authorize_url(&self, provider: &str) -> String {
        self.url(&format!("/auth/v1/authorize?provider={provider}"))
    }

    /// Invalidate the token server-side. A failure here is not fatal to the
    /// local sign-out.
    pub async fn sign_out_request(&self, access_token: &str) -> Result<(), ApiError> {
        let resp = self
            .http()
            .post(self.url("/auth/v1/logout"))
            .header("apikey", &self.backend().api_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }
}

// ── Session manager ─────────────────────────────────────────────────────────

/// Owns the current session and the cached profile projection.
///
/// Created once at startup and passed to consumers explicitly. `subscribe`
/// is the on-session-changed surface; sign-out clears the projection and
/// notifies every watcher.
pub struct SessionManager {
    session: Option<Session>,
    profile: Option<UserProfile>,
    tx: watch::Sender<Option<Session>>,
    cache_path: PathBuf,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_cache_path(session_cache_path())
    }

    /// Tests point this at a temp directory.
    pub fn with_cache_path(cache_path: PathBuf) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            session: None,
            profile: None,
            tx,
            cache_path,
        }
    }

    /// Subscribe to session changes. The receiver yields the current value
    /// immediately and every replacement afterwards.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The cached profile projection, valid only while signed in.
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.expired())
    }

    /// Sign in with email and password; fetches the profile projection.
    pub async fn sign_in(
        &mut self,
        client: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<&UserProfile, ApiError> {
        let token = client.sign_in_password(email, password).await?;
        self.install(client, Session::from_token(token)).await
    }

    /// Create an account and sign in.
    pub async fn sign_up(
        &mut self,
        client: &ApiClient,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<&UserProfile, ApiError> {
        let token = client.sign_up_request(username, email, password).await?;
        self.install(client, Session::from_token(token)).await
    }

    /// Sign out: best-effort server invalidation, then clear local state and
    /// the cached projection, and notify watchers.
    pub async fn sign_out(&mut self, client: &ApiClient) {
        if let Some(session) = self.session.take() {
            if let Err(e) = client.sign_out_request(&session.access_token).await {
                log::warn!("server-side sign-out failed (clearing locally): {e}");
            }
        }
        self.profile = None;
        if let Err(e) = std::fs::remove_file(&self.cache_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("could not remove session cache: {e}");
            }
        }
        let _ = self.tx.send(None);
    }

    /// Restore the cached session at startup.
    ///
    /// Returns `true` when a live session was restored. An expired or
    /// unreadable cache is treated as signed-out, never as an error.
    pub async fn restore(&mut self, client: &ApiClient) -> bool {
        let cached: Option<Session> = std::fs::read_to_string(&self.cache_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok());
        let Some(session) = cached else {
            return false;
        };
        if session.expired() {
            log::debug!("cached session expired at {}", session.expires_at);
            let _ = std::fs::remove_file(&self.cache_path);
            return false;
        }
        match self.install(client, session).await {
            Ok(_) => true,
            Err(e) => {
                log::warn!("session restore failed: {e}");
                self.session = None;
                self.profile = None;
                false
            }
        }
    }

    /// Adopt a new session: fetch the profile projection, persist the token,
    /// publish the change.
    async fn install(
        &mut self,
        client: &ApiClient,
        session: Session,
    ) -> Result<&UserProfile, ApiError> {
        let profile = client
            .fetch_profile(&session.user_id, &session.access_token)
            .await?;
        if let Some(parent) = self.cache_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.cache_path, serde_json::to_string(&session)?)?;
        let _ = self.tx.send(Some(session.clone()));
        self.session = Some(session);
        Ok(self.profile.insert(profile))
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
