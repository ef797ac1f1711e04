use reqwest::Client;

use crate::{
    config::Settings,
    error::ResolveError,
    lastfm::lastfm_get,
    types::{RecentTracksResponse, ScrobbleRecord},
    utils::HISTORY_PAGE_SIZE,
};

/// Retrieves one page of a user's listening history, most recent first.
///
/// Records are returned exactly as Last.fm lists them. On the first page
/// that includes the now-playing entry, which carries no timestamp.
pub async fn get_recent_tracks_page(
    client: &Client,
    settings: &Settings,
    user: &str,
    page: u64,
) -> Result<Vec<ScrobbleRecord>, ResolveError> {
    let json = lastfm_get(
        client,
        settings,
        "user.getrecenttracks",
        user,
        &[
            ("limit", HISTORY_PAGE_SIZE.to_string()),
            ("page", page.to_string()),
        ],
    )
    .await?;

    let response: RecentTracksResponse = serde_json::from_value(json)
        .map_err(|e| ResolveError::MalformedUpstreamData(e.to_string()))?;

    Ok(response
        .recenttracks
        .track
        .into_vec()
        .into_iter()
        .map(ScrobbleRecord::from)
        .collect())
}
