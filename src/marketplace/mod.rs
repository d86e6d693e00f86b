//! # Marketplace Module
//!
//! Fetching and reading the Marketplace "latest music" page.
//!
//! The page lists the songs played on air grouped by day, newest day first.
//! [`MarketplaceClient`] fetches the raw markup and [`listings`] turns it into
//! [`SongListing`](crate::types::SongListing)s.
//!
//! Both steps degrade instead of failing: a page that cannot be fetched is an
//! empty string, and markup without the expected structure has no listings.
//! Callers treat either case as "nothing to do".

pub mod listings;

use std::future::Future;

use reqwest::Client;

use crate::{debug, utils, warning};

pub use listings::extract_listings;

/// A source of page markup.
///
/// Implemented by [`MarketplaceClient`] for the live site; tests provide
/// in-memory pages.
pub trait PageSource {
    /// Base URL of the first listing page.
    fn base_url(&self) -> &str;

    /// Returns the markup at `url`, or an empty string if it cannot be fetched.
    fn fetch(&self, url: &str) -> impl Future<Output = String> + Send;

    /// URL of listing page `page`, or of the bare first page for `None`.
    fn page_url(&self, page: Option<u32>) -> String {
        utils::page_url(self.base_url(), page)
    }
}

/// Fetches pages from marketplace.org.
pub struct MarketplaceClient {
    client: Client,
    base_url: String,
}

impl MarketplaceClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

impl PageSource for MarketplaceClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Makes one GET attempt. Connection failures, timeouts and unreadable
    /// bodies all yield an empty string.
    async fn fetch(&self, url: &str) -> String {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warning!("Could not fetch {}: {}", url, e);
                return String::new();
            }
        };

        debug!("Fetched {} with status {}", url, response.status());

        match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warning!("Could not read page {}: {}", url, e);
                String::new()
            }
        }
    }
}
