use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Everything that can go wrong while resolving a playcount or a track.
///
/// Validation variants are produced before any outbound call. Upstream
/// variants are produced at the boundary of each Last.fm/Spotify call, so
/// no transport or decode error escapes untranslated.
///
/// `MissingCredentials` only ever occurs inside enrichment, which collapses
/// every error into "no match".
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A required query parameter was absent or blank.
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    /// The index is not a number in `1..=maxPlaycount`.
    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    /// Last.fm says the user does not exist.
    #[error("User not found: {0}")]
    UpstreamNotFound(String),

    /// The computed page has no record at the computed offset.
    #[error("Track not found at index {n}")]
    TrackNotFound { n: u64 },

    /// Non-success upstream response, or a transport failure (`status: None`).
    #[error("Upstream error: {message}")]
    UpstreamError {
        status: Option<u16>,
        message: String,
    },

    /// Upstream answered, but not with the shape we rely on.
    #[error("Malformed upstream data: {0}")]
    MalformedUpstreamData(String),

    /// A required secret is not configured.
    #[error("Server misconfigured: {0}")]
    ServerMisconfigured(&'static str),

    /// Spotify client id/secret are not configured.
    #[error("Spotify client credentials are not configured")]
    MissingCredentials,
}

impl ResolveError {
    pub fn status(&self) -> StatusCode {
        match self {
            ResolveError::MissingParameter(_) | ResolveError::InvalidIndex(_) => {
                StatusCode::BAD_REQUEST
            }
            ResolveError::UpstreamNotFound(_) | ResolveError::TrackNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            ResolveError::UpstreamError { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ResolveError::MalformedUpstreamData(_)
            | ResolveError::ServerMisconfigured(_)
            | ResolveError::MissingCredentials => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        // request URLs carry the Last.fm api_key
        let err = err.without_url();
        if err.is_decode() {
            return ResolveError::MalformedUpstreamData(err.to_string());
        }
        ResolveError::UpstreamError {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
