use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::registration::errors::RegistrationError;

/// HTTP-facing error: status plus a JSON `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        let status = match &err {
            RegistrationError::Validation(_) => StatusCode::BAD_REQUEST,
            RegistrationError::DuplicateUser => StatusCode::CONFLICT,
            RegistrationError::NotFound => StatusCode::NOT_FOUND,
            RegistrationError::Hash(_) | RegistrationError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self { status, message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_errors_map_to_distinct_statuses() {
        assert_eq!(ApiError::from(RegistrationError::DuplicateUser).status, StatusCode::CONFLICT);
        assert_eq!(ApiError::from(RegistrationError::NotFound).status, StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(RegistrationError::Validation("bad".into())).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(RegistrationError::Repository("down".into())).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
