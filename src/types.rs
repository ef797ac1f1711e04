use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One play event from a user's Last.fm history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrobbleRecord {
    pub artist: String,
    pub name: String,
    pub album: String,
    pub images: Vec<TrackImage>,
    /// Unix seconds; absent for the currently playing track.
    pub timestamp: Option<i64>,
    pub now_playing: bool,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackImage {
    pub size: String,
    pub url: String,
}

/// Best-effort Spotify counterpart of a scrobble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotifyMatch {
    pub id: String,
    pub url: String,
    pub preview_url: Option<String>,
    pub name: String,
    pub artists: Vec<String>,
}

/// Client-credentials access token with its absolute expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotifyAccessToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Where a reverse-chronological index lands in the paged history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePosition {
    /// 1-based page number.
    pub page: u64,
    /// 0-based offset inside the page.
    pub offset: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaycountResponse {
    pub max_playcount: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackByIndexResponse {
    pub track: ScrobbleRecord,
    pub spotify: Option<SpotifyMatch>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub index: u64,
    pub artist: String,
    pub name: String,
    pub album: String,
    pub scrobbled: String,
    pub spotify: String,
}

// Last.fm wire types

#[derive(Debug, Clone, Deserialize)]
pub struct LastfmErrorResponse {
    pub error: u32,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoResponse {
    pub user: UserInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub name: Option<String>,
    pub playcount: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTracksResponse {
    pub recenttracks: RecentTracks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTracks {
    #[serde(default)]
    pub track: OneOrMany<LastfmTrack>,
}

/// Last.fm collapses single-element lists into a bare object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastfmTrack {
    pub name: String,
    pub artist: LastfmText,
    pub album: LastfmText,
    #[serde(default)]
    pub image: Vec<LastfmImage>,
    pub url: Option<String>,
    pub date: Option<LastfmDate>,
    #[serde(rename = "@attr")]
    pub attr: Option<LastfmTrackAttr>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastfmText {
    #[serde(rename = "#text", default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastfmImage {
    pub size: String,
    #[serde(rename = "#text", default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastfmDate {
    pub uts: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastfmTrackAttr {
    pub nowplaying: Option<String>,
}

impl From<LastfmTrack> for ScrobbleRecord {
    fn from(t: LastfmTrack) -> Self {
        let now_playing = t
            .attr
            .as_ref()
            .and_then(|a| a.nowplaying.as_deref())
            .is_some_and(|v| v == "true");

        ScrobbleRecord {
            artist: t.artist.text,
            name: t.name,
            album: t.album.text,
            images: t
                .image
                .into_iter()
                .filter(|i| !i.url.is_empty())
                .map(|i| TrackImage {
                    size: i.size,
                    url: i.url,
                })
                .collect(),
            timestamp: t.date.and_then(|d| d.uts.parse().ok()),
            now_playing,
            url: t.url.filter(|u| !u.is_empty()),
        }
    }
}

// Spotify wire types

#[derive(Debug, Clone, Deserialize)]
pub struct ClientCredentialsResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<SearchTracks>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchTracks {
    #[serde(default)]
    pub items: Vec<SearchTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchTrack {
    pub id: String,
    pub name: String,
    pub preview_url: Option<String>,
    pub external_urls: Option<ExternalUrls>,
    #[serde(default)]
    pub artists: Vec<SearchArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchArtist {
    pub name: String,
}
