use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::resolver::Resolver;

/// `GET /health`, also reports which upstreams are configured.
pub async fn health(Extension(resolver): Extension<Resolver>) -> Json<Value> {
    let settings = resolver.settings();
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "lastfm": settings.lastfm_api_key.is_some(),
        "spotify": settings.spotify_credentials().is_some(),
    }))
}
