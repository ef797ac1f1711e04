//! # Last.fm Integration Module
//!
//! Thin client over the two Last.fm Web API methods the slot machine needs:
//!
//! - `user.getinfo` ([`user`]) for the total scrobble count, which bounds the
//!   index space
//! - `user.getrecenttracks` ([`tracks`]) for one page of listening history,
//!   most recent first, 200 records per page
//!
//! Every call goes through [`lastfm_get`], which attaches the server-held
//! API key and translates Last.fm's error envelope (`{"error": 6, "message":
//! "User not found"}`) and transport failures into [`ResolveError`]. The key
//! never leaves the server.

pub mod tracks;
pub mod user;

use reqwest::Client;
use serde_json::Value;

use crate::{config::Settings, error::ResolveError, types::LastfmErrorResponse};

/// Last.fm error code for an unknown user.
const LASTFM_USER_NOT_FOUND: u32 = 6;

pub(crate) async fn lastfm_get(
    client: &Client,
    settings: &Settings,
    method: &str,
    user: &str,
    extra: &[(&str, String)],
) -> Result<Value, ResolveError> {
    let Some(api_key) = settings.lastfm_api_key.as_deref() else {
        return Err(ResolveError::ServerMisconfigured("LASTFM_API_KEY is not set"));
    };

    let mut params: Vec<(&str, String)> = vec![
        ("method", method.to_string()),
        ("user", user.to_string()),
        ("api_key", api_key.to_string()),
        ("format", "json".to_string()),
    ];
    params.extend(extra.iter().cloned());

    let response = client
        .get(&settings.lastfm_api_url)
        .query(&params)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    let json: Option<Value> = serde_json::from_str(&body).ok();

    // Last.fm occasionally reports errors inside a 200 body
    let lastfm_error = json
        .as_ref()
        .filter(|v| v.get("error").is_some())
        .and_then(|v| serde_json::from_value::<LastfmErrorResponse>(v.clone()).ok());

    if let Some(err) = lastfm_error {
        if status == reqwest::StatusCode::NOT_FOUND || err.error == LASTFM_USER_NOT_FOUND {
            return Err(ResolveError::UpstreamNotFound(user.to_string()));
        }
        return Err(ResolveError::UpstreamError {
            status: Some(status.as_u16()),
            message: format!("Last.fm error {}: {}", err.error, err.message),
        });
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ResolveError::UpstreamNotFound(user.to_string()));
    }

    if !status.is_success() {
        return Err(ResolveError::UpstreamError {
            status: Some(status.as_u16()),
            message: format!("Last.fm {} responded with {}", method, status),
        });
    }

    json.ok_or_else(|| {
        ResolveError::MalformedUpstreamData(format!("Last.fm {} returned non-JSON body", method))
    })
}
