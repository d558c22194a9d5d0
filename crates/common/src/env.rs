//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::warn;

/// Warn when the static asset directory is missing. Returns whether it exists.
pub async fn ensure_static_dir(static_dir: &str) -> bool {
    let present = tokio::fs::metadata(static_dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !present {
        warn!(%static_dir, "static assets directory not found; static assets will 404");
    }
    present
}
