use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::{EmailState, LookupState};

pub mod client;
pub mod email;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Email proxy: placeholder login and webhook dispatch.
pub fn build_email_router(state: EmailState, cors: CorsLayer, static_dir: &str) -> Router {
    let api = Router::new()
        .route("/api/login", post(email::login))
        .route("/api/send-email", post(email::send_email))
        .with_state(state);
    compose(api, cors, static_dir)
}

/// Client lookup proxy. The bare `/api/client/` route exists so an empty id
/// gets the same validation error as a malformed one.
pub fn build_lookup_router(state: LookupState, cors: CorsLayer, static_dir: &str) -> Router {
    let api = Router::new()
        .route("/api/client/", get(client::get_client))
        .route("/api/client/:client_id", get(client::get_client))
        .with_state(state);
    compose(api, cors, static_dir)
}

/// Health, static assets for unmatched paths, CORS and request tracing.
fn compose(api: Router, cors: CorsLayer, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(api)
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and upstream transport failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
