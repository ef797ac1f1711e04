//! # API Module
//!
//! HTTP endpoints consumed by the slot machine UI. Each handler validates
//! its query string, delegates to [`crate::resolver::Resolver`] and renders
//! either the JSON result or `{ "error": "..." }` with the status chosen by
//! [`crate::error::ResolveError::status`].
//!
//! ## Endpoints
//!
//! - [`playcount`] - `GET /playcount?user=<name>` returns `{ "maxPlaycount": n }`
//! - [`track_by_index`] - `GET /track-by-index?user=<name>&n=<int>&maxPlaycount=<int>`
//!   returns `{ "track": {...}, "spotify": {...} | null }`
//! - [`health`] - `GET /health` returns status and crate version
//!
//! Successful lookups carry a public cache directive: history and Spotify
//! data are both stable over minutes.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use scrobble_slots::{api, config::Settings, resolver::Resolver};
//!
//! let app = Router::new()
//!     .route("/playcount", get(api::playcount))
//!     .route("/track-by-index", get(api::track_by_index))
//!     .layer(Extension(Resolver::new(Settings::from_env())));
//! ```

mod health;
mod playcount;
mod track;

use std::collections::HashMap;

pub use health::health;
pub use playcount::playcount;
pub use track::track_by_index;

use crate::error::ResolveError;

pub const CACHE_CONTROL_VALUE: &str = "public, max-age=300, stale-while-revalidate=600";

fn required_param<'a>(
    params: &'a HashMap<String, String>,
    name: &'static str,
) -> Result<&'a str, ResolveError> {
    params
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or(ResolveError::MissingParameter(name))
}
