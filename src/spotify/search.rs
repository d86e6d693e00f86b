use reqwest::Client;

use crate::{
    Res,
    config::Config,
    types::{SearchResponse, SongListing},
    utils,
};

/// Searches the catalog for a track by exact title and artist fields.
///
/// Only the best ranked result is requested. Returns the raw response body so
/// the caller can log it if it turns out to be malformed.
pub async fn search_track(
    client: &Client,
    config: &Config,
    token: &str,
    song: &SongListing,
) -> Res<String> {
    let query = format!("track:{} artist:{}", song.title, song.artist);
    let body = client
        .get(config.api_url("search"))
        .query(&[("q", query.as_str()), ("type", "track"), ("limit", "1")])
        .bearer_auth(token)
        .send()
        .await?
        .text()
        .await?;
    Ok(body)
}

/// Reads the track id out of a search response.
///
/// Returns `Ok(None)` when the search matched nothing and `Err` when the body
/// is not a search response. The id is returned without its `spotify:track:`
/// namespace.
pub fn parse_search_response(body: &str) -> Result<Option<String>, String> {
    let response: SearchResponse = serde_json::from_str(body).map_err(|e| e.to_string())?;
    let tracks = response
        .tracks
        .ok_or_else(|| "missing key `tracks`".to_string())?;

    if tracks.total == Some(0) {
        return Ok(None);
    }

    Ok(tracks
        .items
        .first()
        .map(|track| utils::strip_namespace(&track.uri).to_string()))
}
