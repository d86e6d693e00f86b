//! Kai Heart Radio Library
//!
//! This library scrapes the Marketplace "latest music" page for the songs
//! played on air and adds them to a Spotify playlist. It includes modules for
//! page scraping, Spotify API communication, playlist synchronization,
//! configuration management and the small HTTP trigger server.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the trigger server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration file and environment handling
//! - `management` - Access token lifecycle
//! - `marketplace` - Page fetching and listing extraction
//! - `server` - HTTP server exposing the daily run
//! - `spotify` - Spotify Web API client implementation
//! - `sync` - Playlist synchronization (daily and bootstrap modes)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use kaiheartradio::{
//!     config::{self, Config},
//!     marketplace::MarketplaceClient,
//!     spotify::SpotifyClient,
//!     sync::Synchronizer,
//! };
//!
//! #[tokio::main]
//! async fn main() -> kaiheartradio::Res<()> {
//!     let config = Config::load(config::config_path(None)).await?;
//!     let pages = MarketplaceClient::new(config.marketplace_url.clone());
//!     let mut sync = Synchronizer::new(pages, SpotifyClient::new(config));
//!     sync.daily().await;
//!     Ok(())
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod marketplace;
pub mod server;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Example
///
/// ```
/// use kaiheartradio::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

static DEBUG_OUTPUT: AtomicBool = AtomicBool::new(false);

/// Turns debug output of the [`debug!`] macro on or off for the whole process.
pub fn set_debug(enabled: bool) {
    DEBUG_OUTPUT.store(enabled, Ordering::Relaxed);
}

/// Returns whether [`debug!`] currently prints anything.
pub fn debug_enabled() -> bool {
    DEBUG_OUTPUT.load(Ordering::Relaxed)
}

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for run start/end markers and
/// general status updates.
///
/// # Example
///
/// ```
/// info!("Beginning run {}", chrono::Utc::now());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Added {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible, such as a missing config file at startup.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the operator should notice, such as a rate
/// limited append or a malformed search response.
///
/// # Example
///
/// ```
/// warning!("Got status 429 from Spotify, tracks may not have been added");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a dimmed detail line, only when debug output is enabled.
///
/// # Example
///
/// ```
/// debug!("found song {} by {}", title, artist);
/// ```
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    if $crate::debug_enabled() {
      use colored::Colorize;
      println!("[{}] {}", "·".dimmed(), std::format_args!($($arg)*));
    }
  })
}
