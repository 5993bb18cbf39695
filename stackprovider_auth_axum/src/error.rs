use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use stackprovider_auth::GuardError;

/// JSON error body returned by the auth API layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "BAD_REQUEST",
            message: message.into(),
        }
    }

    pub fn payload_too_large() -> Self {
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            code: "PAYLOAD_TOO_LARGE",
            message: "Request body is too large".to_string(),
        }
    }

    pub fn too_many_requests() -> Self {
        Self {
            status: StatusCode::TOO_MANY_REQUESTS,
            code: "TOO_MANY_REQUESTS",
            message: "Too many requests. Please try again later.".to_string(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_SERVER_ERROR",
            message: "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Helper trait for converting errors to an [`ApiError`]
pub(super) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, ApiError>;
}

impl<T> IntoResponseError<T> for Result<T, GuardError> {
    fn into_response_error(self) -> Result<T, ApiError> {
        self.map_err(|e| match e {
            GuardError::BadRequest(message) => ApiError::bad_request(message),
            GuardError::Store(err) => {
                tracing::error!(error = %err, "Account lookup failed during sign-in");
                ApiError::internal()
            }
        })
    }
}
