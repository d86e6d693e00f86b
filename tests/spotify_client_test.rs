use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Query, RawQuery, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
};
use kaiheartradio::{
    config::Config,
    spotify::{SpotifyApi, SpotifyClient},
    types::SongListing,
};
use serde_json::{Value, json};

const TRACKS_PATH: &str = "/v1/users/kai/playlists/list/tracks";

// What the fake Spotify service answers with, and what it was asked
#[derive(Default)]
struct Recorded {
    refresh_token_reply: Option<String>,
    add_status: u16,
    playlist: Vec<Option<String>>,
    token_calls: Vec<(String, HashMap<String, String>)>,
    search_calls: Vec<(String, String)>,
    head_calls: Vec<(usize, usize)>,
    add_calls: Vec<String>,
}

type Shared = Arc<Mutex<Recorded>>;

fn header(headers: &HeaderMap) -> String {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn token(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    state.token_calls.push((header(&headers), form));

    let mut body = json!({
        "access_token": format!("access-{}", state.token_calls.len()),
        "token_type": "Bearer",
        "expires_in": 3600,
    });
    if let Some(refresh_token) = &state.refresh_token_reply {
        body["refresh_token"] = json!(refresh_token);
    }
    Json(body)
}

async fn search(
    State(state): State<Shared>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    state
        .search_calls
        .push((header(&headers), query.unwrap_or_default()));

    Json(json!({
        "tracks": { "total": 1, "items": [{ "uri": "spotify:track:T1" }] }
    }))
}

async fn playlist_head(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    let offset: usize = params.get("offset").map_or(0, |v| v.parse().unwrap());
    let limit: usize = params.get("limit").map_or(20, |v| v.parse().unwrap());
    state.head_calls.push((offset, limit));

    let items: Vec<Value> = state
        .playlist
        .iter()
        .skip(offset)
        .take(limit.min(100))
        .map(|uri| match uri {
            Some(uri) => json!({ "track": { "uri": uri } }),
            None => json!({ "track": null }),
        })
        .collect();
    Json(json!({ "items": items }))
}

async fn add(State(state): State<Shared>, RawQuery(query): RawQuery) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.add_calls.push(query.unwrap_or_default());

    let status = StatusCode::from_u16(state.add_status).unwrap();
    (status, Json(json!({ "snapshot_id": "snap-1" })))
}

// Starts the fake service on a random local port and returns its base URL
async fn spawn_spotify(state: Shared) -> String {
    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/search", get(search))
        .route(TRACKS_PATH, get(playlist_head).post(add))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config_text(base: &str) -> String {
    format!(
        r#"# test config
[spotify_hosts]
account_host = "{base}/api/"
api_host = "{base}/v1/"

[spotify_credentials]
client_id = "c"
client_secret = "s"
# keep me
refresh_token = "refresh-1"

[spotify_user_info]
user_id = "kai"
playlist_id = "list"
"#
    )
}

fn temp_config_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "kaiheartradio-client-{}-{}.toml",
        name,
        std::process::id()
    ));
    std::fs::write(&path, content).unwrap();
    path
}

async fn setup(name: &str, recorded: Recorded) -> (SpotifyClient, Shared, PathBuf) {
    let state = Arc::new(Mutex::new(Recorded {
        add_status: 201,
        ..recorded
    }));
    let base = spawn_spotify(state.clone()).await;
    let path = temp_config_file(name, &config_text(&base));
    let config = Config::load(path.clone()).await.unwrap();
    (SpotifyClient::new(config), state, path)
}

fn ids(prefix: &str, count: usize) -> Vec<Option<String>> {
    (0..count)
        .map(|i| Some(format!("spotify:track:{}{}", prefix, i)))
        .collect()
}

#[tokio::test]
async fn test_access_token_is_cached_between_calls() {
    let (mut spotify, state, path) = setup("cache", Recorded::default()).await;
    let song = SongListing::new("Take Five", "Dave & Co");

    assert_eq!(spotify.search_track(&song).await.as_deref(), Some("T1"));
    assert_eq!(spotify.search_track(&song).await.as_deref(), Some("T1"));
    spotify.playlist_head(1).await.unwrap();

    let state = state.lock().unwrap();
    assert_eq!(state.token_calls.len(), 1);
    assert!(
        state
            .search_calls
            .iter()
            .all(|(auth, _)| auth == "Bearer access-1")
    );

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_token_request_uses_basic_client_credentials() {
    let (mut spotify, state, path) = setup("basic", Recorded::default()).await;

    spotify.playlist_head(1).await.unwrap();

    let state = state.lock().unwrap();
    let (auth, form) = &state.token_calls[0];
    assert_eq!(auth, "Basic Yzpz");
    assert_eq!(form["grant_type"], "refresh_token");
    assert_eq!(form["refresh_token"], "refresh-1");

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_search_query_uses_track_and_artist_filters() {
    let (mut spotify, state, path) = setup("search", Recorded::default()).await;

    spotify
        .search_track(&SongListing::new("Take Five", "Dave & Co"))
        .await;

    let state = state.lock().unwrap();
    assert_eq!(
        state.search_calls[0].1,
        "q=track%3ATake+Five+artist%3ADave+%26+Co&type=track&limit=1"
    );

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_add_tracks_sends_position_and_joined_uris() {
    let (mut spotify, state, path) = setup("add", Recorded::default()).await;

    let track_ids = vec!["A".to_string(), "B".to_string()];
    spotify.add_tracks(&track_ids, 0).await.unwrap();

    let state = state.lock().unwrap();
    assert_eq!(
        state.add_calls,
        vec!["position=0&uris=spotify%3Atrack%3AA%2Cspotify%3Atrack%3AB".to_string()]
    );

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_rate_limited_add_counts_as_sent() {
    let (mut spotify, state, path) = setup("ratelimit", Recorded::default()).await;
    state.lock().unwrap().add_status = 429;

    let result = spotify.add_tracks(&["A".to_string()], 0).await;

    assert!(result.is_ok());
    assert_eq!(state.lock().unwrap().add_calls.len(), 1);

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_rotated_refresh_token_is_written_to_config() {
    let recorded = Recorded {
        refresh_token_reply: Some("rotated".to_string()),
        ..Recorded::default()
    };
    let (mut spotify, _state, path) = setup("rotated", recorded).await;

    spotify.playlist_head(1).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("refresh_token = \"rotated\""));
    assert!(content.contains("# keep me"));

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_unchanged_refresh_token_is_not_written() {
    let recorded = Recorded {
        refresh_token_reply: Some("refresh-1".to_string()),
        ..Recorded::default()
    };
    let (mut spotify, _state, path) = setup("unchanged", recorded).await;

    // changed on disk after loading; a write-back would put refresh-1 back
    let edited = std::fs::read_to_string(&path)
        .unwrap()
        .replace("refresh-1", "edited-elsewhere");
    std::fs::write(&path, &edited).unwrap();

    spotify.playlist_head(1).await.unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), edited);

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_playlist_head_reads_past_one_page() {
    let mut playlist = ids("A", 120);
    playlist[3] = None;
    let recorded = Recorded {
        playlist,
        ..Recorded::default()
    };
    let (mut spotify, state, path) = setup("paging", recorded).await;

    let head = spotify.playlist_head(150).await.unwrap();

    // one unavailable track is left out
    assert_eq!(head.len(), 119);
    assert_eq!(head[0], "A0");
    assert_eq!(head[3], "A4");
    assert_eq!(head[118], "A119");
    assert_eq!(state.lock().unwrap().head_calls, vec![(0, 100), (100, 50)]);

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_playlist_head_stops_at_limit() {
    let recorded = Recorded {
        playlist: ids("A", 250),
        ..Recorded::default()
    };
    let (mut spotify, state, path) = setup("limit", recorded).await;

    let head = spotify.playlist_head(150).await.unwrap();

    assert_eq!(head.len(), 150);
    assert_eq!(head[149], "A149");
    assert_eq!(state.lock().unwrap().head_calls, vec![(0, 100), (100, 50)]);

    std::fs::remove_file(path).unwrap();
}
