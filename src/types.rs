use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A song as listed on the Marketplace page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongListing {
    pub title: String,
    pub artist: String,
}

impl SongListing {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

/// Which day-sections of a page to read listings from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Only the first (most recent) day-section.
    LatestDay,
    /// Every day-section on the page.
    AllDays,
}

#[derive(Tabled)]
pub struct ListingTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub title: String,
    pub artist: String,
}

/// A cached access token.
#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<SearchTracks>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchTracks {
    pub total: Option<u64>,
    #[serde(default)]
    pub items: Vec<TrackUri>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    // null for tracks that are no longer available
    pub track: Option<TrackUri>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

/// What happened when one page was synchronized with the playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The page had no listings (fetch failed or layout not recognized).
    NoListings,
    /// Listings were found but none matched a Spotify track.
    NothingResolved,
    /// Every resolved track is already at the head of the playlist.
    AlreadyPresent,
    /// The playlist head could not be read, so the batch was skipped.
    HeadUnavailable(String),
    /// These track ids were sent to the playlist.
    Appended(Vec<String>),
}
