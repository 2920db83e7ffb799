//! HTTP surface of the notification subsystem.
//!
//! Exposes the long-lived notification stream, the unicast and broadcast
//! dispatch endpoints, a health check and the OpenAPI docs.

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use log::*;
use service::config::Config;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub(crate) use service::AppState;

pub use error::{Error, Result};

mod controller;
mod error;
mod extractors;
mod params;
pub mod router;
mod sse;

#[cfg(test)]
mod test_support;

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let bind_address = app_state.config.bind_address();
    let session_layer = session_layer(&app_state.config);
    let cors_layer = cors_layer(&app_state.config);

    let app = router::define_routes(app_state)
        .layer(session_layer)
        .layer(cors_layer);

    info!("Server starting... listening for connections on http://{bind_address}");

    let listener = TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app).await
}

/// Sessions are issued by the platform's login flow; this layer only reads them.
pub(crate) fn session_layer(config: &Config) -> SessionManagerLayer<MemoryStore> {
    let expiry_seconds = i64::try_from(config.backend_session_expiry_seconds).unwrap_or(i64::MAX);

    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.is_production())
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(expiry_seconds)))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            // Credentialed CORS cannot answer with a wildcard origin.
            Ok(value) if value == "*" => {
                warn!("Ignoring wildcard CORS origin; list each allowed origin explicitly");
                None
            }
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}
