use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{
    api,
    config::Config,
    error, info,
    marketplace::{MarketplaceClient, PageSource},
    spotify::{SpotifyApi, SpotifyClient},
    sync::Synchronizer,
};

/// The synchronizer shared by all requests. Runs are serialized by the mutex.
pub type SharedSync<P, S> = Arc<Mutex<Synchronizer<P, S>>>;

/// Builds the trigger server routes around a shared synchronizer.
pub fn router<P, S>(sync: SharedSync<P, S>) -> Router
where
    P: PageSource + Send + Sync + 'static,
    S: SpotifyApi + Send + 'static,
{
    Router::new().route("/health", get(api::health)).route(
        "/trigger",
        get(api::trigger::<P, S>)
            .post(api::trigger::<P, S>)
            .layer(Extension(sync)),
    )
}

pub async fn start_api_server(config: Config, address: Option<String>) {
    let address = address.unwrap_or_else(|| config.server_address.clone());
    let addr = match SocketAddr::from_str(&address) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address {}: {}", address, e),
    };

    let pages = MarketplaceClient::new(config.marketplace_url.clone());
    let sync = Arc::new(Mutex::new(Synchronizer::new(
        pages,
        SpotifyClient::new(config),
    )));
    let app = router(sync);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    info!("Listening on http://{}", addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server stopped: {}", e);
    }
}
