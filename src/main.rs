use std::net::TcpListener;

use env_logger::Env;
use prospector::{
    configuration::get_configuration,
    services::{ModelBackend, SearchClient},
    startup::run,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let http_client = reqwest::Client::new();
    let search_client = SearchClient::new(
        http_client.clone(),
        configuration.api_keys.serpapi.clone(),
    );
    let model_backend = ModelBackend::from_settings(&configuration, http_client.clone());

    run(
        listener,
        configuration,
        http_client,
        search_client,
        model_backend,
    )?
    .await
}
