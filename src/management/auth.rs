use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config::Settings, error::ResolveError, spotify::auth::request_client_credentials_token,
    types::SpotifyAccessToken,
};

/// Seconds before expiry at which a cached token is no longer handed out.
pub const TOKEN_SAFETY_MARGIN_SECS: i64 = 15;

/// Process-wide cache for the Spotify client-credentials token.
///
/// Cloning shares the same cell. The lock is held only to read or replace
/// the token, never across the exchange itself: concurrent callers that all
/// see a stale token each fetch a fresh one and the last write wins.
#[derive(Debug, Clone, Default)]
pub struct TokenManager {
    token: Arc<Mutex<Option<SpotifyAccessToken>>>,
}

impl TokenManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: SpotifyAccessToken) -> Self {
        TokenManager {
            token: Arc::new(Mutex::new(Some(token))),
        }
    }

    /// Returns a usable access token, exchanging credentials when the cached
    /// one is absent or about to expire.
    pub async fn get_valid_token(
        &self,
        client: &Client,
        settings: &Settings,
    ) -> Result<String, ResolveError> {
        if let Some(token) = self.cached_valid_token(Utc::now()).await {
            return Ok(token);
        }

        let fresh = request_client_credentials_token(client, settings).await?;
        let access_token = fresh.access_token.clone();
        *self.token.lock().await = Some(fresh);

        Ok(access_token)
    }

    async fn cached_valid_token(&self, now: DateTime<Utc>) -> Option<String> {
        let cached = self.token.lock().await;
        cached
            .as_ref()
            .filter(|t| !is_expiring(t, now))
            .map(|t| t.access_token.clone())
    }

    pub async fn current_token(&self) -> Option<SpotifyAccessToken> {
        self.token.lock().await.clone()
    }
}

/// True once `now` is within the safety margin of the token's expiry.
pub fn is_expiring(token: &SpotifyAccessToken, now: DateTime<Utc>) -> bool {
    now + Duration::seconds(TOKEN_SAFETY_MARGIN_SECS) >= token.expires_at
}
