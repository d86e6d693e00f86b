//! # Playlist Synchronization
//!
//! Moves the songs of Marketplace listing pages into the target playlist.
//!
//! Both modes are built on [`Synchronizer::page_to_playlist`]:
//!
//! - **Daily**: the latest day of the first page. The batch is only inserted
//!   if some of its tracks are not yet at the head of the playlist, so running
//!   the job twice on the same day adds nothing the second time.
//! - **Bootstrap**: every day of `pages` numbered pages plus the first page,
//!   oldest page first and without the head check, to fill an empty playlist
//!   with the newest songs on top.
//!
//! Tracks are always inserted at the head; existing entries are never removed
//! or reordered.

use crate::{
    debug,
    marketplace::{PageSource, extract_listings},
    spotify::{PLAYLIST_PAGE_LIMIT, SpotifyApi},
    success,
    types::{ExtractMode, SyncOutcome},
    utils, warning,
};

/// Synchronizes listing pages from a [`PageSource`] into a playlist through a
/// [`SpotifyApi`].
pub struct Synchronizer<P, S> {
    pages: P,
    spotify: S,
}

impl<P, S> Synchronizer<P, S>
where
    P: PageSource,
    S: SpotifyApi,
{
    pub fn new(pages: P, spotify: S) -> Self {
        Self { pages, spotify }
    }

    pub fn pages(&self) -> &P {
        &self.pages
    }

    pub fn spotify(&self) -> &S {
        &self.spotify
    }

    /// Adds the latest day's songs from the first page, unless they are
    /// already at the head of the playlist.
    pub async fn daily(&mut self) -> SyncOutcome {
        let url = self.pages.page_url(None);
        self.page_to_playlist(&url, ExtractMode::LatestDay).await
    }

    /// Adds every song from `pages` numbered pages and the first page.
    ///
    /// Intended for an empty playlist: nothing is checked for duplicates.
    /// Pages are processed from `pages` down to 1 and then the bare first
    /// page, so the newest songs end up first. Returns one outcome per page in
    /// processing order.
    pub async fn bootstrap(&mut self, pages: u32) -> Vec<(String, SyncOutcome)> {
        let urls = utils::bootstrap_urls(self.pages.base_url(), pages);
        let mut outcomes = Vec::with_capacity(urls.len());

        for url in urls {
            debug!("Bootstrapping from {}", url);
            let outcome = self.page_to_playlist(&url, ExtractMode::AllDays).await;
            outcomes.push((url, outcome));
        }
        outcomes
    }

    /// Adds the songs of one page to the playlist.
    ///
    /// With [`ExtractMode::LatestDay`] the batch is skipped when all of its
    /// tracks are found among the first tracks of the playlist (as many as the
    /// batch holds). [`ExtractMode::AllDays`] always inserts.
    pub async fn page_to_playlist(&mut self, url: &str, mode: ExtractMode) -> SyncOutcome {
        let html = self.pages.fetch(url).await;
        let songs = extract_listings(&html, mode);
        if songs.is_empty() {
            debug!("No songs found on {}", url);
            return SyncOutcome::NoListings;
        }

        let mut track_ids = Vec::with_capacity(songs.len());
        for song in &songs {
            if let Some(track_id) = self.spotify.search_track(song).await {
                track_ids.push(track_id);
            }
        }

        if track_ids.is_empty() {
            debug!("None of the {} songs on {} matched a track", songs.len(), url);
            return SyncOutcome::NothingResolved;
        }

        if mode == ExtractMode::LatestDay {
            let head = match self.spotify.playlist_head(track_ids.len()).await {
                Ok(head) => head,
                Err(e) => {
                    warning!("Cannot read playlist, skipping batch. Err: {}", e);
                    return SyncOutcome::HeadUnavailable(e.to_string());
                }
            };

            if utils::is_batch_present(&track_ids, &head) {
                debug!(
                    "Songs from site {:?} are already in playlist {:?}",
                    track_ids, head
                );
                return SyncOutcome::AlreadyPresent;
            }
        }

        self.append(&track_ids).await;
        SyncOutcome::Appended(track_ids)
    }

    // Inserts at the head in chunks, keeping batch order.
    async fn append(&mut self, track_ids: &[String]) {
        for (index, chunk) in track_ids.chunks(PLAYLIST_PAGE_LIMIT).enumerate() {
            let position = index * PLAYLIST_PAGE_LIMIT;
            match self.spotify.add_tracks(chunk, position).await {
                Ok(()) => success!("Sent {} tracks to playlist: {}", chunk.len(), chunk.join(", ")),
                Err(e) => warning!("Failed to add tracks to playlist. Err: {}", e),
            }
        }
    }
}
