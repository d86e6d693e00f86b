use std::time::Duration;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::Config, info, marketplace::MarketplaceClient, spotify::SpotifyClient, success,
    sync::Synchronizer, types::SyncOutcome,
};

use super::report_outcome;

pub async fn bootstrap(config: Config, pages: u32) {
    info!("Beginning bootstrap run {}", Utc::now().to_rfc3339());

    let marketplace = MarketplaceClient::new(config.marketplace_url.clone());
    let mut sync = Synchronizer::new(marketplace, SpotifyClient::new(config));

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Bootstrapping playlist from {} pages...", pages + 1));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let results = sync.bootstrap(pages).await;
    pb.finish_and_clear();

    for (url, outcome) in &results {
        report_outcome(url, outcome);
    }

    let added: usize = results
        .iter()
        .map(|(_, outcome)| match outcome {
            SyncOutcome::Appended(ids) => ids.len(),
            _ => 0,
        })
        .sum();
    success!("Bootstrap sent {} tracks from {} pages", added, results.len());

    info!("End bootstrap run {}", Utc::now().to_rfc3339());
}
