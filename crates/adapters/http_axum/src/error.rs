//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use mudstore_domain::error::{ErrorKind, MudError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps request and domain failures to an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// A service call failed.
    Domain(MudError),
    /// The request itself was malformed.
    BadRequest(String),
}

impl From<MudError> for ApiError {
    fn from(err: MudError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Domain(err) => match err.kind() {
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
                ErrorKind::BadRequest => (StatusCode::BAD_REQUEST, err.to_string()),
                ErrorKind::Conflict => (StatusCode::CONFLICT, err.to_string()),
                ErrorKind::Internal => {
                    tracing::error!(error = %err, "request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal server error".to_string(),
                    )
                }
            },
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
