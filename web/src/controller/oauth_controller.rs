//! Controller for the Salesforce OAuth flow.
//!
//! Both endpoints are reached through browser redirects, so they take their
//! input from headers and query parameters only.

use crate::extractors::caller_origin::CallerOrigin;
use crate::params::auth::CallbackParams;
use crate::response::ErrorBody;
use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::response::IntoResponse;

use domain::login;
use log::*;

use super::found;

/// GET /auth/salesforce
///
/// Starts a login attempt and redirects the browser to Salesforce's authorization endpoint.
#[utoipa::path(
    get,
    path = "/auth/salesforce",
    responses(
        (status = 302, description = "Redirect to Salesforce OAuth"),
        (status = 500, description = "Server error (OAuth not configured)", body = ErrorBody),
    )
)]
pub async fn authorize(
    State(app_state): State<AppState>,
    CallerOrigin(origin): CallerOrigin,
) -> Result<impl IntoResponse, Error> {
    let url = login::authorize_url(
        &app_state.config,
        app_state.provider.as_ref(),
        &app_state.stores.states,
        origin.as_deref(),
    )?;
    Ok(found(&url))
}

/// GET /auth/salesforce/callback
///
/// Handles the redirect from Salesforce after the user authorizes, then sends the
/// browser back to the application it came from with the access token attached.
#[utoipa::path(
    get,
    path = "/auth/salesforce/callback",
    params(CallbackParams),
    responses(
        (status = 302, description = "Redirect to <origin>/home/?access_token=..."),
        (status = 400, description = "Missing authorization code or invalid state", body = ErrorBody),
        (status = 500, description = "Token exchange or profile fetch failed", body = ErrorBody),
    )
)]
pub async fn callback(
    State(app_state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    if let Some(error) = &params.error {
        warn!(
            "Salesforce returned authorization error {}: {}",
            error,
            params.error_description.as_deref().unwrap_or_default()
        );
    }

    let url = login::complete(
        app_state.provider.as_ref(),
        &app_state.stores,
        params.code.as_deref(),
        params.state.as_deref(),
    )
    .await?;

    Ok(found(&url))
}
