//! # Spotify Integration Module
//!
//! Best-effort enrichment of scrobbles with Spotify catalogue data. A
//! scrobble only carries artist, title and album, so the track is looked up
//! through the Web API search endpoint and the single best hit is returned.
//!
//! ## Authentication
//!
//! [`auth`] implements the OAuth 2.0 client-credentials grant. No user is
//! involved: the service authenticates as itself with the configured client
//! id and secret. The resulting token is cached process-wide by
//! [`crate::management::TokenManager`] and reused until it is 15 seconds
//! away from expiry.
//!
//! ## Search
//!
//! [`search`] normalizes the title (edition qualifiers such as
//! "- Remastered 2011" or "(feat. X)" are stripped), issues a field-filtered
//! query restricted to one result in the configured market and maps the hit
//! into a [`crate::types::SpotifyMatch`].
//!
//! ## Failure policy
//!
//! Enrichment must never turn a successful scrobble lookup into a failure.
//! [`search::enrich`] is the boundary: every error behind it (missing
//! credentials, token exchange failure, non-success search, no hits) is
//! logged and collapsed into `None`. Nothing is retried.

pub mod auth;
pub mod search;
