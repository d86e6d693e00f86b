//! # CLI Module
//!
//! User-facing commands of Kai Heart Radio. Each command builds the clients it
//! needs from the loaded [`Config`](crate::config::Config) and reports what
//! happened through the logging macros.
//!
//! - [`daily`] - Add the latest day's songs to the playlist (the default)
//! - [`bootstrap`] - Fill an empty playlist from many listing pages
//! - [`songs`] - Show the songs on a listing page without touching Spotify
//! - [`serve`] - Run the HTTP trigger server
//!
//! ```bash
//! kaiheartradio                     # same as `kaiheartradio daily`
//! kaiheartradio -d daily            # with debug output
//! kaiheartradio bootstrap 20        # fill a new playlist from 20 pages
//! kaiheartradio songs --all         # every day on the first page
//! ```

mod bootstrap;
mod daily;
mod serve;
mod songs;

pub use bootstrap::bootstrap;
pub use daily::daily;
pub use serve::serve;
pub use songs::songs;

use crate::{info, success, types::SyncOutcome, warning};

/// Logs the outcome of synchronizing one page.
pub fn report_outcome(url: &str, outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::NoListings => info!("No songs found on {}", url),
        SyncOutcome::NothingResolved => info!("No songs from {} were found on Spotify", url),
        SyncOutcome::AlreadyPresent => info!("Songs from {} are already in the playlist", url),
        SyncOutcome::HeadUnavailable(e) => warning!("Skipped {}: {}", url, e),
        SyncOutcome::Appended(ids) => success!("Added {} tracks from {}", ids.len(), url),
    }
}
