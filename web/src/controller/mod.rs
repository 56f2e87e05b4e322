use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

pub(crate) mod health_check_controller;
pub(crate) mod oauth_controller;
pub(crate) mod session_controller;

/// A `302 Found` redirect, the status browsers and the provider expect from this flow.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
