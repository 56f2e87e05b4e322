use crate::params::auth::TokenParams;
use crate::response::{ErrorBody, LogoutResponse};
use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use domain::session;

/// GET /auth/getUser
///
/// Returns the profile of the session owned by the presented access token.
#[utoipa::path(
    get,
    path = "/auth/getUser",
    params(TokenParams),
    responses(
        (status = 200, description = "Profile claims plus access_token"),
        (status = 401, description = "Token does not own a live session", body = ErrorBody),
    )
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    Query(params): Query<TokenParams>,
) -> Result<impl IntoResponse, Error> {
    let profile = session::find(&app_state.stores.sessions, params.token.as_deref())?;
    Ok(Json(profile))
}

/// GET /auth/logout
///
/// Ends the session owned by the presented access token.
#[utoipa::path(
    get,
    path = "/auth/logout",
    params(TokenParams),
    responses(
        (status = 200, description = "Session ended", body = LogoutResponse),
        (status = 400, description = "No token supplied", body = ErrorBody),
        (status = 401, description = "Token does not own a live session", body = ErrorBody),
    )
)]
pub async fn logout(
    State(app_state): State<AppState>,
    Query(params): Query<TokenParams>,
) -> Result<impl IntoResponse, Error> {
    session::logout(&app_state.stores.sessions, params.token.as_deref())?;
    Ok(Json(LogoutResponse { success: true }))
}
