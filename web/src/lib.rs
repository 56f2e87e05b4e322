use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use domain::store::Stores;
use domain::Provider;
use log::*;
use service::config::Config;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use error::{Error, Result};

mod controller;
mod error;
mod extractors;
mod params;
mod response;
pub mod router;

// Web-level state: configuration plus the provider and the stores every
// controller works against.
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub provider: Arc<dyn Provider>,
    pub stores: Stores,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn Provider>, stores: Stores) -> Self {
        Self {
            config,
            provider,
            stores,
        }
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let interface = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let host = format!("{}:{}", interface, app_state.config.port);

    info!(
        "Server starting... listening for connections on http://{} ({} environment)",
        host,
        app_state.config.runtime_env()
    );

    let cors_layer = cors_layer(&app_state.config);
    let app = router::define_routes(app_state).layer(cors_layer);

    let listener = tokio::net::TcpListener::bind(&host).await?;
    axum::serve(listener, app).await
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin
                .trim_end_matches('/')
                .parse::<HeaderValue>()
                .inspect_err(|_| warn!("Ignoring invalid allowed origin {origin:?}"))
                .ok()
        })
        .collect();

    debug!("CORS allowed origins: {:?}", allowed_origins);

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::{routing::get, Router};
    use clap::Parser;
    use tower::ServiceExt;

    fn app() -> Router {
        let config = Config::try_parse_from([
            "sf_auth_relay",
            "--allowed-origins",
            "http://localhost:3001,https://app.example.com/",
        ])
        .unwrap();
        Router::new()
            .route("/health", get(|| async { "healthy" }))
            .layer(cors_layer(&config))
    }

    async fn allow_origin_for(origin: &str) -> Option<HeaderValue> {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origins() {
        assert_eq!(
            allow_origin_for("http://localhost:3001").await.unwrap(),
            "http://localhost:3001"
        );
        assert_eq!(
            allow_origin_for("https://app.example.com").await.unwrap(),
            "https://app.example.com"
        );
    }

    #[tokio::test]
    async fn test_cors_ignores_other_origins() {
        assert!(allow_origin_for("https://evil.example.com").await.is_none());
    }
}
