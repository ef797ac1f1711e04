use reqwest::Client;

use crate::{config::Settings, error::ResolveError, lastfm::lastfm_get, types::UserInfoResponse};

/// Retrieves a user's total scrobble count from `user.getinfo`.
///
/// Last.fm reports the playcount as a numeric string; anything that does not
/// parse as an unsigned integer is treated as malformed upstream data.
///
/// # Errors
///
/// - `MissingParameter` for a blank username, before any request is made
/// - `UpstreamNotFound` when Last.fm does not know the user
/// - `UpstreamError` for other non-success responses and transport failures
/// - `MalformedUpstreamData` when `user.playcount` is missing or not numeric
/// - `ServerMisconfigured` when no API key is configured
pub async fn get_playcount(
    client: &Client,
    settings: &Settings,
    user: &str,
) -> Result<u64, ResolveError> {
    let user = user.trim();
    if user.is_empty() {
        return Err(ResolveError::MissingParameter("user"));
    }

    let json = lastfm_get(client, settings, "user.getinfo", user, &[]).await?;
    let info: UserInfoResponse = serde_json::from_value(json)
        .map_err(|e| ResolveError::MalformedUpstreamData(e.to_string()))?;

    parse_playcount(info.user.playcount.as_deref())
}

fn parse_playcount(raw: Option<&str>) -> Result<u64, ResolveError> {
    let Some(raw) = raw else {
        return Err(ResolveError::MalformedUpstreamData(
            "user.playcount is missing".to_string(),
        ));
    };

    raw.trim().parse::<u64>().map_err(|_| {
        ResolveError::MalformedUpstreamData(format!("user.playcount is not numeric: {:?}", raw))
    })
}
