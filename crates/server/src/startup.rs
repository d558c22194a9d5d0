use axum::{http::HeaderValue, Router};
use configs::{AppConfig, CorsConfig, ServerConfig};
use service::{email::EmailDispatcher, intake::IntakeClient};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::{EmailState, LookupState};

/// Any origin unless the config lists explicit ones.
pub fn build_cors(cfg: &CorsConfig) -> CorsLayer {
    if cfg.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = cfg
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn http_client() -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("secret-proxy/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Email proxy router for the given config. An unset webhook only warns.
pub fn email_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let dispatcher = EmailDispatcher::new(http_client()?, cfg.email.endpoint.clone());
    if !dispatcher.is_configured() {
        warn!("SENDGRID_ENDPOINT is not set; /api/send-email will fail until it is configured");
    }
    Ok(routes::build_email_router(
        EmailState::new(dispatcher),
        build_cors(&cfg.cors),
        &cfg.server.static_dir,
    ))
}

/// Client lookup router for the given config. Requires the IntakeQ API key.
pub fn lookup_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let api_key = cfg
        .intake
        .api_key
        .clone()
        .ok_or_else(|| StartupError::InvalidConfig("INTAKEQ_API_KEY is required".into()))?;
    let intake = IntakeClient::new(http_client()?, cfg.intake.base_url.clone(), api_key);
    Ok(routes::build_lookup_router(
        LookupState::new(intake),
        build_cors(&cfg.cors),
        &cfg.server.static_dir,
    ))
}

pub async fn run_email(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_static_dir(&cfg.server.static_dir).await;
    let app = email_app(&cfg)?;
    serve(app, &cfg.server, "email-proxy").await
}

pub async fn run_lookup(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_static_dir(&cfg.server.static_dir).await;
    let app = lookup_app(&cfg)?;
    serve(app, &cfg.server, "client-lookup").await
}

async fn serve(app: Router, server: &ServerConfig, name: &'static str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(server.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(service = name, %addr, "listening on http://localhost:{}", addr.port());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(name))
        .await?;
    Ok(())
}

async fn shutdown_signal(name: &'static str) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(service = name, error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!(service = name, event = "shutdown_signal", "received Ctrl+C, shutting down");
}
