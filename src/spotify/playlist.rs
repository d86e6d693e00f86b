use reqwest::{Client, StatusCode};

use super::PLAYLIST_PAGE_LIMIT;
use crate::{
    Res,
    config::Config,
    debug,
    types::{AddTrackToPlaylistResponse, PlaylistTracksResponse},
    utils, warning,
};

fn tracks_endpoint(config: &Config) -> String {
    config.api_url(&format!(
        "users/{user_id}/playlists/{playlist_id}/tracks",
        user_id = config.user_id,
        playlist_id = config.playlist_id
    ))
}

/// Fetches the first `limit` tracks of the target playlist.
///
/// The service returns at most [`PLAYLIST_PAGE_LIMIT`] items per request, so
/// larger heads are read page by page with `offset`. Reading stops early when
/// a page comes back short, i.e. the playlist has fewer than `limit` items.
///
/// # Errors
///
/// Fails on network errors, non-success responses and unexpected bodies.
pub async fn get_playlist_head(
    client: &Client,
    config: &Config,
    token: &str,
    limit: usize,
) -> Res<Vec<String>> {
    let mut head = Vec::with_capacity(limit);
    let mut offset = 0;

    while offset < limit {
        let page_size = (limit - offset).min(PLAYLIST_PAGE_LIMIT);
        let body = client
            .get(tracks_endpoint(config))
            .query(&[("limit", page_size), ("offset", offset)])
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let page: PlaylistTracksResponse = serde_json::from_str(&body)?;
        let received = page.items.len();
        head.extend(track_ids(page));

        if received < page_size {
            break;
        }
        offset += page_size;
    }

    Ok(head)
}

/// Reads the bare track ids out of a playlist tracks response, in order.
///
/// Unavailable tracks (`"track": null`) are left out.
pub fn parse_playlist_head(body: &str) -> Res<Vec<String>> {
    let response: PlaylistTracksResponse = serde_json::from_str(body)?;
    Ok(track_ids(response))
}

fn track_ids(response: PlaylistTracksResponse) -> Vec<String> {
    response
        .items
        .into_iter()
        .filter_map(|item| item.track)
        .map(|track| utils::strip_namespace(&track.uri).to_string())
        .collect()
}

/// Inserts tracks into the target playlist at `position`.
///
/// A 429 Too Many Requests response is only logged; the request is not
/// retried. Other non-success responses are logged the same way.
///
/// # Errors
///
/// Only network errors are returned.
pub async fn add_tracks(
    client: &Client,
    config: &Config,
    token: &str,
    track_ids: &[String],
    position: usize,
) -> Res<()> {
    for track_id in track_ids {
        debug!("Adding id {}", track_id);
    }

    let uris = track_ids
        .iter()
        .map(|id| utils::track_uri(id))
        .collect::<Vec<_>>()
        .join(",");
    let position = position.to_string();

    let response = client
        .post(tracks_endpoint(config))
        .query(&[("position", position.as_str()), ("uris", uris.as_str())])
        .bearer_auth(token)
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        warning!("Got status code 429; rate limited by Spotify. Tracks were not added.");
        return Ok(());
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warning!("Adding tracks failed with status {}: {}", status, body);
        return Ok(());
    }

    match response.json::<AddTrackToPlaylistResponse>().await {
        Ok(resp) => debug!("Playlist snapshot is now {}", resp.snapshot_id),
        Err(e) => debug!("Could not read add tracks response: {}", e),
    }
    Ok(())
}
