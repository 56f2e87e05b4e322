use serde::Serialize;
use utoipa::ToSchema;

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Unauthorized access")]
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// JSON body of a successful logout.
#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_error_body() {
        let body = ErrorBody::new("Authorization code not provided");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "Authorization code not provided"})
        );
    }

    #[test]
    fn test_serialize_logout_response() {
        let body = LogoutResponse { success: true };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"success":true}"#);
    }
}
