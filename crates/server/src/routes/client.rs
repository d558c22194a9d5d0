use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use service::domain::ClientLookupQuery;
use tracing::info;

use crate::{errors::ApiError, state::LookupState};

/// Returns the matched IntakeQ record as-is, without a success wrapper.
pub async fn get_client(
    State(state): State<LookupState>,
    client_id: Option<Path<String>>,
) -> Result<Json<Value>, ApiError> {
    let raw = client_id.map(|Path(id)| id).unwrap_or_default();
    let query = ClientLookupQuery::parse(&raw)?;
    let record = state.intake.lookup(&query).await?;
    info!(client_id = %query.client_id(), "client lookup served");
    Ok(Json(record))
}
