//! # Spotify Integration Module
//!
//! This module is the integration layer between Kai Heart Radio and the
//! Spotify Web API. It covers the three operations the playlist sync needs
//! plus the token exchange that authorizes them.
//!
//! ## Architecture
//!
//! ```text
//! Synchronizer (sync)
//!          ↓
//! SpotifyApi trait
//!          ↓
//! SpotifyClient
//!     ├── Authentication (refresh token exchange)
//!     ├── Search (title + artist to track id)
//!     └── Playlist Operations (read head, insert at position)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Refresh token exchange with Basic client credentials
//! - `GET /search` - Single best track match for a title and artist
//! - `GET /users/{user_id}/playlists/{playlist_id}/tracks` - Current playlist head
//! - `POST /users/{user_id}/playlists/{playlist_id}/tracks` - Insert tracks
//!
//! ## Error Handling
//!
//! Resolution never fails a batch: any problem while searching is logged and
//! the song is treated as unmatched. Rate limiting on inserts is logged as a
//! warning and not retried.

pub mod auth;
pub mod playlist;
pub mod search;

use std::future::Future;

use reqwest::Client;

use crate::{
    Res, config::Config, debug, management::TokenManager, types::SongListing, warning,
};

/// Maximum number of items Spotify returns or accepts per playlist request.
pub const PLAYLIST_PAGE_LIMIT: usize = 100;

/// The Spotify operations the playlist sync is built on.
pub trait SpotifyApi {
    /// Resolves a listing to the bare id of the best matching track, if any.
    fn search_track(&mut self, song: &SongListing) -> impl Future<Output = Option<String>> + Send;

    /// Returns the first `limit` track ids of the target playlist, in order.
    fn playlist_head(&mut self, limit: usize) -> impl Future<Output = Res<Vec<String>>> + Send;

    /// Inserts `track_ids` into the target playlist at `position`.
    fn add_tracks(
        &mut self,
        track_ids: &[String],
        position: usize,
    ) -> impl Future<Output = Res<()>> + Send;
}

/// Spotify Web API client bound to one config and its target playlist.
pub struct SpotifyClient {
    client: Client,
    config: Config,
    tokens: TokenManager,
}

impl SpotifyClient {
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
            tokens: TokenManager::new(),
        }
    }

    async fn token(&mut self) -> Res<String> {
        self.tokens
            .get_valid_token(&self.client, &mut self.config)
            .await
    }
}

impl SpotifyApi for SpotifyClient {
    async fn search_track(&mut self, song: &SongListing) -> Option<String> {
        let token = match self.token().await {
            Ok(token) => token,
            Err(e) => {
                warning!("Cannot search for {}: no access token. Err: {}", song.title, e);
                return None;
            }
        };

        let body = match search::search_track(&self.client, &self.config, &token, song).await {
            Ok(body) => body,
            Err(e) => {
                warning!("Search for {} by {} failed. Err: {}", song.title, song.artist, e);
                return None;
            }
        };

        match search::parse_search_response(&body) {
            Ok(Some(track_id)) => {
                debug!("Found id {} for song {}", track_id, song.title);
                Some(track_id)
            }
            Ok(None) => {
                debug!("Found no results for song {}", song.title);
                None
            }
            Err(e) => {
                warning!("Invalid result from Spotify for {}: {}\n{}", song.title, e, body);
                None
            }
        }
    }

    async fn playlist_head(&mut self, limit: usize) -> Res<Vec<String>> {
        let token = self.token().await?;
        playlist::get_playlist_head(&self.client, &self.config, &token, limit).await
    }

    async fn add_tracks(&mut self, track_ids: &[String], position: usize) -> Res<()> {
        let token = self.token().await?;
        playlist::add_tracks(&self.client, &self.config, &token, track_ids, position).await
    }
}
