use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::STANDARD};

pub const SPOTIFY_TRACK_NAMESPACE: &str = "spotify:track:";

/// Joins a configured host (with or without a trailing slash) and an endpoint.
pub fn join_url(host: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        host.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Returns the bare catalog id of a Spotify uri (`spotify:track:ABC` -> `ABC`).
///
/// Ids without a namespace are returned unchanged.
pub fn strip_namespace(uri: &str) -> &str {
    uri.rsplit(':').next().unwrap_or(uri)
}

/// Returns the `spotify:track:` uri for a bare track id.
pub fn track_uri(track_id: &str) -> String {
    format!("{}{}", SPOTIFY_TRACK_NAMESPACE, track_id)
}

/// Trims the text and collapses inner whitespace runs to single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Builds the `Authorization` header value for HTTP Basic authentication.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", credentials)
}

/// True when every id of `batch` occurs somewhere in `head`.
pub fn is_batch_present(batch: &[String], head: &[String]) -> bool {
    let head: HashSet<&str> = head.iter().map(String::as_str).collect();
    batch.iter().all(|id| head.contains(id.as_str()))
}

/// URL of a Marketplace listing page. Page `None` is the bare first page.
pub fn page_url(base: &str, page: Option<u32>) -> String {
    match page {
        Some(page) => format!("{}?page={}", base, page),
        None => base.to_string(),
    }
}

/// URLs visited by a bootstrap over `pages` pages, oldest first.
///
/// Numbered pages run from `pages` down to 1, followed by the bare first page
/// so the newest songs end up at the head of the playlist.
pub fn bootstrap_urls(base: &str, pages: u32) -> Vec<String> {
    (1..=pages)
        .rev()
        .map(|page| page_url(base, Some(page)))
        .chain(std::iter::once(page_url(base, None)))
        .collect()
}
