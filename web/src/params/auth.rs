use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters the provider sends to the OAuth callback.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// Authorization code issued by Salesforce.
    pub code: Option<String>,
    /// State token issued when the login attempt started.
    pub state: Option<String>,
    /// Error code, present when the user denied access or the request was invalid.
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Bearer token presented as a query parameter.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TokenParams {
    /// Access token returned to the frontend after login.
    pub token: Option<String>,
}
