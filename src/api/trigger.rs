use axum::{Extension, response::Json};
use chrono::Utc;
use serde_json::{Value, json};

use crate::{
    cli::report_outcome, info, marketplace::PageSource, server::SharedSync, spotify::SpotifyApi,
};

/// Runs the daily sync once and returns its outcome.
///
/// No request parameters are read. Concurrent triggers wait for the running
/// one to finish.
pub async fn trigger<P, S>(Extension(shared_sync): Extension<SharedSync<P, S>>) -> Json<Value>
where
    P: PageSource + Send + Sync + 'static,
    S: SpotifyApi + Send + 'static,
{
    let mut sync = shared_sync.lock().await;

    let started_at = Utc::now().to_rfc3339();
    info!("Beginning triggered run {}", started_at);

    let url = sync.pages().page_url(None);
    let outcome = sync.daily().await;
    report_outcome(&url, &outcome);

    let finished_at = Utc::now().to_rfc3339();
    info!("End triggered run {}", finished_at);

    Json(json!({
        "started_at": started_at,
        "finished_at": finished_at,
        "result": outcome,
    }))
}
