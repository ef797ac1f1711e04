//! Configuration management for scrobble-slots.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. Lookups follow a simple order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)
//!
//! Secrets have no defaults. A missing Last.fm key makes lookups fail with
//! a server misconfiguration error, missing Spotify credentials only disable
//! enrichment.

use dotenv;
use std::{env, path::PathBuf};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_MARKET: &str = "US";

/// Loads environment variables from `.env` files.
///
/// Creates the local data directory (`scrobble-slots/` under the platform
/// data dir) if needed and loads `.env` from there, then from the working
/// directory. Variables already present in the environment are never
/// overwritten, and a missing file is not an error.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("scrobble-slots/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns the address the HTTP service binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    non_empty_var("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the Last.fm API key (`LASTFM_API_KEY`), if set.
///
/// The key stays on the server; it is never echoed back to clients.
pub fn lastfm_api_key() -> Option<String> {
    non_empty_var("LASTFM_API_KEY")
}

/// Returns the Last.fm API root (`LASTFM_API_URL`).
pub fn lastfm_api_url() -> String {
    non_empty_var("LASTFM_API_URL").unwrap_or_else(|| DEFAULT_LASTFM_API_URL.to_string())
}

/// Returns the Spotify client id (`SPOTIFY_API_AUTH_CLIENT_ID`), if set.
pub fn spotify_client_id() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify client secret (`SPOTIFY_API_AUTH_CLIENT_SECRET`), if set.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    non_empty_var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Returns the Spotify token exchange URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    non_empty_var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string())
}

/// Returns the market used to restrict Spotify searches (`SPOTIFY_MARKET`).
pub fn spotify_market() -> String {
    non_empty_var("SPOTIFY_MARKET").unwrap_or_else(|| DEFAULT_SPOTIFY_MARKET.to_string())
}

/// Snapshot of every setting the resolvers need.
///
/// Built once at startup from the environment and shared read-only. Tests
/// construct it directly to point the resolvers at local fake upstreams.
#[derive(Debug, Clone)]
pub struct Settings {
    pub lastfm_api_key: Option<String>,
    pub lastfm_api_url: String,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub spotify_api_url: String,
    pub spotify_token_url: String,
    pub spotify_market: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            lastfm_api_key: lastfm_api_key(),
            lastfm_api_url: lastfm_api_url(),
            spotify_client_id: spotify_client_id(),
            spotify_client_secret: spotify_client_secret(),
            spotify_api_url: spotify_apiurl(),
            spotify_token_url: spotify_apitoken_url(),
            spotify_market: spotify_market(),
        }
    }

    /// Client id and secret, only when both are configured.
    pub fn spotify_credentials(&self) -> Option<(&str, &str)> {
        match (&self.spotify_client_id, &self.spotify_client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lastfm_api_key: None,
            lastfm_api_url: DEFAULT_LASTFM_API_URL.to_string(),
            spotify_client_id: None,
            spotify_client_secret: None,
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            spotify_token_url: DEFAULT_SPOTIFY_API_TOKEN_URL.to_string(),
            spotify_market: DEFAULT_SPOTIFY_MARKET.to_string(),
        }
    }
}
