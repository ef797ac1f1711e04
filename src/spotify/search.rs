use reqwest::Client;

use crate::{
    config::Settings,
    error::ResolveError,
    management::TokenManager,
    types::{SearchResponse, SpotifyMatch},
    utils, warning,
};

/// Looks up the Spotify counterpart of a scrobble, swallowing every failure.
///
/// Empty artist or title short-circuits to `None` without touching the
/// network. Any error behind this point is logged and becomes `None`.
pub async fn enrich(
    client: &Client,
    settings: &Settings,
    tokens: &TokenManager,
    artist: &str,
    title: &str,
) -> Option<SpotifyMatch> {
    let artist = artist.trim();
    let title = title.trim();
    if artist.is_empty() || title.is_empty() {
        return None;
    }

    match try_enrich(client, settings, tokens, artist, title).await {
        Ok(found) => found,
        Err(ResolveError::MissingCredentials) => None,
        Err(e) => {
            warning!("Spotify lookup for {} - {} failed: {}", artist, title, e);
            None
        }
    }
}

async fn try_enrich(
    client: &Client,
    settings: &Settings,
    tokens: &TokenManager,
    artist: &str,
    title: &str,
) -> Result<Option<SpotifyMatch>, ResolveError> {
    let token = tokens.get_valid_token(client, settings).await?;
    let normalized = utils::normalize_title(title);
    search_track(client, settings, &token, &normalized, artist).await
}

/// Searches for one track by title and artist in the configured market.
///
/// Returns `Ok(None)` when the search has no hits.
pub async fn search_track(
    client: &Client,
    settings: &Settings,
    token: &str,
    title: &str,
    artist: &str,
) -> Result<Option<SpotifyMatch>, ResolveError> {
    let api_url = format!("{uri}/search", uri = settings.spotify_api_url);
    let query = utils::search_query(title, artist);

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .query(&[
            ("q", query.as_str()),
            ("type", "track"),
            ("limit", "1"),
            ("market", settings.spotify_market.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ResolveError::UpstreamError {
            status: Some(status.as_u16()),
            message: format!("Spotify search responded with {}", status),
        });
    }

    let res = response.json::<SearchResponse>().await?;
    let Some(hit) = res.tracks.and_then(|t| t.items.into_iter().next()) else {
        return Ok(None);
    };

    let url = hit
        .external_urls
        .and_then(|u| u.spotify)
        .unwrap_or_else(|| format!("https://open.spotify.com/track/{}", hit.id));

    Ok(Some(SpotifyMatch {
        id: hit.id,
        url,
        preview_url: hit.preview_url,
        name: hit.name,
        artists: hit.artists.into_iter().map(|a| a.name).collect(),
    }))
}
