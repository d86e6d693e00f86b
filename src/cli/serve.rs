use crate::{config::Config, server::start_api_server};

pub async fn serve(config: Config, address: Option<String>) {
    start_api_server(config, address).await;
}
