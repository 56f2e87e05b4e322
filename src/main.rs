use domain::{gateway::salesforce, store, Provider};
use log::{error, info};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    info!("Starting up Salesforce auth relay...");

    let provider: Arc<dyn Provider> = match salesforce::new_provider(&config) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!("Failed to configure the Salesforce provider: {e}");
            std::process::exit(1);
        }
    };

    let stores = store::Stores::new(&config);
    store::spawn_eviction(stores.clone(), config.store_cleanup_interval());

    let app_state = web::AppState::new(config, provider, stores);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped: {e}");
        std::process::exit(1);
    }
}
