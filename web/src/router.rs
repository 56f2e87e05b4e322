use crate::{
    controller::{health_check_controller, oauth_controller, session_controller},
    response::{ErrorBody, LogoutResponse},
    AppState,
};
use axum::{routing::get, Router};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// Global definition of the OpenAPI document. To be rendered, a path
// and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Salesforce Auth Relay API"
        ),
        paths(
            health_check_controller::health_check,
            oauth_controller::authorize,
            oauth_controller::callback,
            session_controller::get_user,
            session_controller::logout,
        ),
        components(
            schemas(
                ErrorBody,
                LogoutResponse,
            )
        ),
        tags(
            (name = "sf_auth_relay", description = "Salesforce OAuth 2.0 + PKCE login relay")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(oauth_routes(app_state.clone()))
        .merge(session_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn oauth_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/salesforce", get(oauth_controller::authorize))
        .route(
            "/auth/salesforce/callback",
            get(oauth_controller::callback),
        )
        .with_state(app_state)
}

fn session_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/getUser", get(session_controller::get_user))
        .route("/auth/logout", get(session_controller::logout))
        .with_state(app_state)
}
