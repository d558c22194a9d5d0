use axum::{body::Bytes, extract::State, Json};
use common::types::Success;
use service::domain::{self, EmailDispatchRequest, LoginRequest};
use tracing::info;

use crate::{errors::ApiError, state::EmailState};

/// Presence check only: any non-blank username/password pair is accepted.
pub async fn login(body: Bytes) -> Result<Json<Success>, ApiError> {
    let body = domain::parse_body(&body);
    LoginRequest::from_json(&body)?;
    Ok(Json(Success::ok()))
}

pub async fn send_email(
    State(state): State<EmailState>,
    body: Bytes,
) -> Result<Json<Success>, ApiError> {
    let req = EmailDispatchRequest::from_json(&domain::parse_body(&body))?;
    let data = state.dispatcher.dispatch(&req).await?;
    info!(tracking_number = %req.tracking_number, "email dispatch forwarded");
    Ok(Json(Success::with_data(data)))
}
