use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr};

use crate::{api, info, resolver::Resolver, warning};

pub fn router(resolver: Resolver) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/playcount", get(api::playcount))
        .route("/track-by-index", get(api::track_by_index))
        .layer(Extension(resolver))
}

pub async fn start_api_server(resolver: Resolver, addr: &str) -> crate::Res<()> {
    if resolver.settings().lastfm_api_key.is_none() {
        warning!("LASTFM_API_KEY is not set, every lookup will fail");
    }
    if resolver.settings().spotify_credentials().is_none() {
        warning!("Spotify client credentials are not set, enrichment is disabled");
    }

    let addr = SocketAddr::from_str(addr)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(resolver)).await?;
    Ok(())
}
