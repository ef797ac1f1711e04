#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use scrobble_slots::config::Settings;

pub const ARTIST: &str = "The Band";

#[derive(Debug, Clone, Copy)]
pub enum SearchMode {
    Hit,
    HitWithoutUrl,
    Empty,
    Status(u16),
}

/// Behaviour of the fake Last.fm and Spotify APIs.
#[derive(Debug, Clone)]
pub struct FakeConfig {
    pub playcount: String,
    pub total_scrobbles: u64,
    pub token_expires_in: i64,
    pub search: SearchMode,
}

impl Default for FakeConfig {
    fn default() -> Self {
        FakeConfig {
            playcount: "500".to_string(),
            total_scrobbles: 500,
            token_expires_in: 3600,
            search: SearchMode::Hit,
        }
    }
}

#[derive(Default)]
pub struct Calls {
    pub lastfm: AtomicUsize,
    pub token: AtomicUsize,
    pub search: AtomicUsize,
    pub pages: Mutex<Vec<u64>>,
    pub search_queries: Mutex<Vec<String>>,
}

struct FakeState {
    config: FakeConfig,
    calls: Arc<Calls>,
}

pub struct FakeUpstream {
    pub base: String,
    pub calls: Arc<Calls>,
}

impl FakeUpstream {
    pub async fn start(config: FakeConfig) -> Self {
        let calls = Arc::new(Calls::default());
        let state = Arc::new(FakeState {
            config,
            calls: Arc::clone(&calls),
        });

        let app = Router::new()
            .route("/lastfm", get(lastfm))
            .route("/spotify/token", post(token))
            .route("/spotify/v1/search", get(search))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeUpstream {
            base: format!("http://{}", addr),
            calls,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            lastfm_api_key: Some("lastfm-key".to_string()),
            lastfm_api_url: format!("{}/lastfm", self.base),
            spotify_client_id: Some("client-id".to_string()),
            spotify_client_secret: Some("client-secret".to_string()),
            spotify_api_url: format!("{}/spotify/v1", self.base),
            spotify_token_url: format!("{}/spotify/token", self.base),
            spotify_market: "US".to_string(),
        }
    }

    pub fn lastfm_calls(&self) -> usize {
        self.calls.lastfm.load(Ordering::SeqCst)
    }

    pub fn token_calls(&self) -> usize {
        self.calls.token.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.calls.search.load(Ordering::SeqCst)
    }

    pub fn pages(&self) -> Vec<u64> {
        self.calls.pages.lock().unwrap().clone()
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.calls.search_queries.lock().unwrap().clone()
    }
}

/// Title of the fake record at a page/offset; carries a remaster suffix so
/// enrichment has something to normalize.
pub fn record_title(page: u64, offset: u64) -> String {
    format!("p{}-o{} - Remastered 2011", page, offset)
}

async fn lastfm(
    State(state): State<Arc<FakeState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.calls.lastfm.fetch_add(1, Ordering::SeqCst);

    if params.get("api_key").map(String::as_str) != Some("lastfm-key") {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": 10, "message": "Invalid API key"})),
        )
            .into_response();
    }

    let user = params.get("user").cloned().unwrap_or_default();
    match user.as_str() {
        "ghost" => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"error": 6, "message": "User not found"})),
            )
                .into_response();
        }
        "flaky" => return (StatusCode::SERVICE_UNAVAILABLE, "try later").into_response(),
        "envelope" => {
            return Json(json!({"error": 8, "message": "Operation failed"})).into_response();
        }
        _ => {}
    }

    match params.get("method").map(String::as_str) {
        Some("user.getinfo") => {
            if user == "broken" {
                return Json(json!({"user": {"name": user}})).into_response();
            }
            Json(json!({"user": {"name": user, "playcount": state.config.playcount}}))
                .into_response()
        }
        Some("user.getrecenttracks") => {
            let page: u64 = params
                .get("page")
                .and_then(|p| p.parse().ok())
                .unwrap_or(1);
            let limit: u64 = params
                .get("limit")
                .and_then(|l| l.parse().ok())
                .unwrap_or(50);
            state.calls.pages.lock().unwrap().push(page);

            let start = (page - 1) * limit;
            let end = (page * limit).min(state.config.total_scrobbles);
            let tracks: Vec<Value> = (start..end.max(start))
                .map(|i| {
                    let offset = i - start;
                    json!({
                        "name": record_title(page, offset),
                        "artist": {"mbid": "", "#text": ARTIST},
                        "album": {"mbid": "", "#text": "The Album"},
                        "image": [
                            {"size": "small", "#text": "https://img.example/s.png"},
                            {"size": "extralarge", "#text": "https://img.example/xl.png"}
                        ],
                        "url": format!("https://www.last.fm/music/The+Band/_/p{}-o{}", page, offset),
                        "date": {"uts": (1_700_000_000 - i).to_string(), "#text": ""}
                    })
                })
                .collect();

            Json(json!({"recenttracks": {"track": tracks}})).into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": 3, "message": "Invalid Method"})),
        )
            .into_response(),
    }
}

async fn token(State(state): State<Arc<FakeState>>, headers: HeaderMap) -> Response {
    let count = state.calls.token.fetch_add(1, Ordering::SeqCst) + 1;

    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Basic "));
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid_client"})))
            .into_response();
    }

    Json(json!({
        "access_token": format!("token-{}", count),
        "token_type": "Bearer",
        "expires_in": state.config.token_expires_in
    }))
    .into_response()
}

async fn search(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.calls.search.fetch_add(1, Ordering::SeqCst);

    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer token-"));
    if !bearer {
        return (StatusCode::UNAUTHORIZED, "missing token").into_response();
    }

    if let Some(q) = params.get("q") {
        state.calls.search_queries.lock().unwrap().push(q.clone());
    }

    match state.config.search {
        SearchMode::Hit => Json(json!({
            "tracks": {"items": [{
                "id": "4uLU6hMCjMI75M1A2tKUQC",
                "name": "Matched Song",
                "preview_url": null,
                "external_urls": {"spotify": "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"},
                "artists": [{"name": "The Band"}, {"name": "Guest"}]
            }]}
        }))
        .into_response(),
        SearchMode::HitWithoutUrl => Json(json!({
            "tracks": {"items": [{
                "id": "abc123",
                "name": "Matched Song",
                "preview_url": "https://p.scdn.co/mp3-preview/abc",
                "artists": [{"name": "The Band"}]
            }]}
        }))
        .into_response(),
        SearchMode::Empty => Json(json!({"tracks": {"items": []}})).into_response(),
        SearchMode::Status(code) => {
            (StatusCode::from_u16(code).unwrap(), "search failed").into_response()
        }
    }
}
