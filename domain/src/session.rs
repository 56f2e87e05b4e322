//! Bearer-token gated access to stored sessions.

use crate::error::{Error, InputErrorKind};
use log::*;
use salesforce_auth::oauth::UserInfo;
use salesforce_auth::session::SessionStore;
use serde::Serialize;

/// The profile returned to the frontend: provider claims plus the bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct SessionProfile {
    #[serde(flatten)]
    pub user_info: UserInfo,
    pub access_token: String,
}

/// Return the profile of the session owned by `token`.
///
/// Missing, empty, expired or unknown tokens are all unauthorized.
pub fn find(sessions: &SessionStore, token: Option<&str>) -> Result<SessionProfile, Error> {
    let token = token.unwrap_or_default();
    let session = sessions.get(token).ok_or_else(Error::unauthorized)?;

    Ok(SessionProfile {
        user_info: session.user_info,
        access_token: token.to_string(),
    })
}

/// End the session owned by `token`.
///
/// The token goes through the same lookup as [`find`]; only its owner can end a session.
pub fn logout(sessions: &SessionStore, token: Option<&str>) -> Result<(), Error> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::input(InputErrorKind::MissingToken))?;

    let session = sessions.remove(token).ok_or_else(|| {
        debug!("Logout attempted with a token that owns no session");
        Error::unauthorized()
    })?;

    info!("Session for {} ended by logout", session.user_info.email);
    Ok(())
}
