//! Index-to-track resolution pipeline.
//!
//! [`Resolver`] owns everything a request needs: one HTTP client, the
//! settings snapshot and the shared Spotify token cache. A track lookup
//! issues at most three sequential outbound calls (history page, token
//! exchange when the cache is stale, search).
//!
//! The playcount used to validate an index is a snapshot. If the user
//! scrobbles between the playcount fetch and the page fetch, the same `n`
//! lands on a different record, or on none at all (`TrackNotFound`).

use std::sync::Arc;

use reqwest::Client;

use crate::{
    config::Settings,
    error::ResolveError,
    lastfm,
    management::TokenManager,
    spotify,
    types::{SpotifyMatch, TrackByIndexResponse},
    utils,
};

#[derive(Debug, Clone)]
pub struct Resolver {
    client: Client,
    settings: Arc<Settings>,
    tokens: TokenManager,
}

impl Resolver {
    pub fn new(settings: Settings) -> Self {
        Self::with_tokens(settings, TokenManager::new())
    }

    pub fn with_tokens(settings: Settings, tokens: TokenManager) -> Self {
        Resolver {
            client: Client::new(),
            settings: Arc::new(settings),
            tokens,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Total scrobble count of `user`, the upper bound for valid indices.
    pub async fn playcount(&self, user: &str) -> Result<u64, ResolveError> {
        lastfm::user::get_playcount(&self.client, &self.settings, user).await
    }

    /// Resolves the `n`-th most recent scrobble of `user`.
    ///
    /// The index is validated against `max_playcount` before anything is
    /// fetched. Enrichment is best effort: its outcome only decides whether
    /// `spotify` is `None`.
    pub async fn track_by_index(
        &self,
        user: &str,
        n: u64,
        max_playcount: u64,
    ) -> Result<TrackByIndexResponse, ResolveError> {
        let user = user.trim();
        if user.is_empty() {
            return Err(ResolveError::MissingParameter("user"));
        }
        let position = utils::page_position(n, max_playcount)?;

        let records = lastfm::tracks::get_recent_tracks_page(
            &self.client,
            &self.settings,
            user,
            position.page,
        )
        .await?;

        let Some(track) = records.into_iter().nth(position.offset) else {
            return Err(ResolveError::TrackNotFound { n });
        };

        let spotify = self.enrich(&track.artist, &track.name).await;

        Ok(TrackByIndexResponse { track, spotify })
    }

    /// Best-effort Spotify match for an artist and title. Never fails.
    pub async fn enrich(&self, artist: &str, title: &str) -> Option<SpotifyMatch> {
        spotify::search::enrich(&self.client, &self.settings, &self.tokens, artist, title).await
    }

    /// Pulls the lever: fetches the bound, draws a random index and resolves it.
    ///
    /// Returns the drawn index alongside the result.
    pub async fn spin(&self, user: &str) -> Result<(u64, TrackByIndexResponse), ResolveError> {
        let max_playcount = self.playcount(user).await?;
        let Some(n) = utils::random_index(max_playcount) else {
            return Err(ResolveError::InvalidIndex(format!(
                "{} has no scrobbles to spin",
                user.trim()
            )));
        };

        let resolved = self.track_by_index(user, n, max_playcount).await?;
        Ok((n, resolved))
    }
}
