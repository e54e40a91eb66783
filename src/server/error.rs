//! Mapping of crate errors onto HTTP responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::config::MISSING_KEYS_MESSAGE;
use crate::error::Error;

/// An error rendered as `{"error": message}`
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Message shown to the client; configuration details stay in the logs
    pub fn message(&self) -> String {
        match &self.0 {
            Error::InvalidInput(message) => message.clone(),
            Error::Configuration(_) => MISSING_KEYS_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(Error::InvalidInput("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(Error::AllSourcesUnsummarizable).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError(Error::Configuration("missing: GOOGLE_CSE_ID".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_configuration_message_is_generic() {
        let err = ApiError(Error::Configuration("missing: GEMINI_API_KEY".into()));
        assert_eq!(err.message(), MISSING_KEYS_MESSAGE);
    }

    #[test]
    fn test_invalid_input_message_is_bare() {
        let err = ApiError(Error::InvalidInput("No items to export.".into()));
        assert_eq!(err.message(), "No items to export.");
    }
}
