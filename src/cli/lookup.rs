use tabled::Table;

use crate::{
    cli::spinner,
    config::{self, Settings},
    error,
    resolver::Resolver,
    success,
    types::{TrackByIndexResponse, TrackTableRow},
    utils, warning,
};

fn resolver() -> Resolver {
    let settings = Settings::from_env();
    if settings.lastfm_api_key.is_none() {
        error!("LASTFM_API_KEY is not set. Add it to your .env file.");
    }
    if settings.spotify_credentials().is_none() {
        warning!("Spotify client credentials are not set, skipping Spotify lookups.");
    }
    Resolver::new(settings)
}

pub async fn playcount(user: String) {
    let resolver = resolver();

    let pb = spinner(format!("Fetching playcount for {}...", user));
    let result = resolver.playcount(&user).await;
    pb.finish_and_clear();

    match result {
        Ok(count) => success!("{} has {} scrobbles", user, count),
        Err(e) => error!("Cannot fetch playcount. Err: {}", e),
    }
}

pub async fn track(user: String, n: u64, max_playcount: Option<u64>) {
    let resolver = resolver();

    let pb = spinner(format!("Resolving scrobble #{} of {}...", n, user));
    let max_playcount = match max_playcount {
        Some(max) => max,
        None => match resolver.playcount(&user).await {
            Ok(max) => max,
            Err(e) => {
                pb.finish_and_clear();
                error!("Cannot fetch playcount. Err: {}", e);
            }
        },
    };

    let result = resolver.track_by_index(&user, n, max_playcount).await;
    pb.finish_and_clear();

    match result {
        Ok(resolved) => print_track(n, &resolved),
        Err(e) => error!("Cannot resolve scrobble #{}. Err: {}", n, e),
    }
}

pub async fn spin(user: String, open: bool) {
    let resolver = resolver();

    let pb = spinner(format!("Spinning the reels for {}...", user));
    let result = resolver.spin(&user).await;
    pb.finish_and_clear();

    let (n, resolved) = match result {
        Ok(spun) => spun,
        Err(e) => error!("Spin failed. Err: {}", e),
    };

    print_track(n, &resolved);

    if open {
        match &resolved.spotify {
            Some(found) => {
                if webbrowser::open(&found.url).is_err() {
                    warning!(
                        "Failed to open browser. Please navigate to the following URL manually:\n{}",
                        found.url
                    )
                }
            }
            None => warning!("No Spotify match to open."),
        }
    }
}

pub async fn serve(addr: Option<String>) {
    let addr = addr.unwrap_or_else(config::server_addr);
    let resolver = Resolver::new(Settings::from_env());

    if let Err(e) = crate::server::start_api_server(resolver, &addr).await {
        error!("Server stopped. Err: {}", e);
    }
}

fn print_track(n: u64, resolved: &TrackByIndexResponse) {
    let track = &resolved.track;
    let row = TrackTableRow {
        index: n,
        artist: track.artist.clone(),
        name: track.name.clone(),
        album: track.album.clone(),
        scrobbled: utils::format_timestamp(track.timestamp),
        spotify: resolved
            .spotify
            .as_ref()
            .map(|s| s.url.clone())
            .unwrap_or_else(|| "-".to_string()),
    };

    println!("{}", Table::new(vec![row]));
}
