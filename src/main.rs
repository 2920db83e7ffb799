use log::*;
use service::{config::Config, logging::Logger, AppState};
use sse::Manager;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = get_config();

    Logger::init_logger(&config);

    info!(
        "Starting notification service in {} mode",
        config.runtime_env()
    );

    // The connection registry is process-local: every stream and dispatch
    // handled by this process shares this one manager.
    let sse_manager = Arc::new(Manager::new());
    let app_state = AppState::new(config, &sse_manager);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server terminated: {e}");
        std::process::exit(1);
    }
}

fn get_config() -> Config {
    Config::new()
}
