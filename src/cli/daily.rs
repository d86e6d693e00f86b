use chrono::Utc;

use crate::{
    config::Config,
    info,
    marketplace::{MarketplaceClient, PageSource},
    spotify::SpotifyClient,
    sync::Synchronizer,
};

use super::report_outcome;

pub async fn daily(config: Config) {
    info!("Beginning daily run {}", Utc::now().to_rfc3339());

    let pages = MarketplaceClient::new(config.marketplace_url.clone());
    let mut sync = Synchronizer::new(pages, SpotifyClient::new(config));
    let url = sync.pages().page_url(None);
    let outcome = sync.daily().await;
    report_outcome(&url, &outcome);

    info!("End daily run {}", Utc::now().to_rfc3339());
}
