use tabled::Table;

use crate::{
    marketplace::{MarketplaceClient, PageSource, extract_listings},
    types::{ExtractMode, ListingTableRow},
    warning,
};

/// Prints the songs listed on a Marketplace page as a table.
///
/// Nothing is searched or added; this only shows what a run would pick up.
pub async fn songs(marketplace_url: String, all_days: bool, page: Option<u32>) {
    let pages = MarketplaceClient::new(marketplace_url);
    let url = pages.page_url(page);
    let html = pages.fetch(&url).await;

    let mode = if all_days {
        ExtractMode::AllDays
    } else {
        ExtractMode::LatestDay
    };

    let listings = extract_listings(&html, mode);
    if listings.is_empty() {
        warning!("No songs found on {}", url);
        return;
    }

    let table_rows: Vec<ListingTableRow> = listings
        .into_iter()
        .enumerate()
        .map(|(i, song)| ListingTableRow {
            position: i + 1,
            title: song.title,
            artist: song.artist,
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}
