use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::SERVER_ERROR;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

pub const UNAUTHORIZED: &str = "Unauthorized: IntakeQ rejected the configured API key";

/// HTTP face of a `ServiceError`; every variant renders as JSON with an `error` field.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self.0 {
            ServiceError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            ServiceError::UpstreamAuth => (StatusCode::UNAUTHORIZED, ErrorBody::new(UNAUTHORIZED)),
            ServiceError::Upstream { error, status, body } => {
                // Relay the upstream status verbatim; reqwest only yields valid codes.
                let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (code, ErrorBody::new(error).with_upstream(status, body))
            }
            ServiceError::NotFound(id) => {
                (StatusCode::NOT_FOUND, ErrorBody::new(format!("Client {id} not found")))
            }
            ServiceError::Unexpected(details) => {
                error!(error = %details, "request failed unexpectedly");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(SERVER_ERROR).with_details(details),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
