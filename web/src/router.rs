use crate::{
    controller::{health_check_controller, notification_controller},
    params, sse, AppState,
};
use axum::{
    routing::{get, post},
    Router,
};

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Content Platform Notifications API"
        ),
        paths(
            health_check_controller::health_check,
            notification_controller::send,
            notification_controller::broadcast,
            sse::handler::notification_stream,
        ),
        components(
            schemas(
                domain::notification::LocalizedText,
                domain::notification::NotificationDraft,
                domain::notification::NotificationEvent,
                domain::notification::NotificationKind,
                domain::notification::RelatedEntity,
                params::notification::SendParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "content_platform", description = "Bilingual content platform notification push API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our cookie session based authentication requirement for opening
// a notification stream for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "id",
                    "Session id cookie issued by the platform login flow",
                ))),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes(app_state.clone()))
        .merge(notification_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check_controller::health_check))
        .with_state(app_state)
}

fn notification_routes(app_state: AppState) -> Router {
    Router::new()
        // Long-lived, session-authenticated
        .route(
            "/api/notifications/stream",
            get(sse::handler::notification_stream),
        )
        .route(
            "/api/notifications/send",
            post(notification_controller::send),
        )
        .route(
            "/api/notifications/broadcast",
            post(notification_controller::broadcast),
        )
        .with_state(app_state)
}
