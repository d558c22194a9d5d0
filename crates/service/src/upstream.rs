//! Best-effort readers for upstream bodies.
//!
//! Both helpers swallow their error on purpose: they only run on paths where
//! the status code already decided the outcome and the body is informational.

use serde_json::Value;
use tracing::debug;

/// Body as text, or `""` when the body cannot be read.
pub async fn text_or_empty(resp: reqwest::Response) -> String {
    match resp.text().await {
        Ok(text) => text,
        Err(e) => {
            // Discarded: the caller already has the status to report.
            debug!(err = %e, "upstream body unreadable; using empty text");
            String::new()
        }
    }
}

/// Text parsed as JSON, or `{}` when it is empty or not JSON.
pub fn json_or_empty_object(text: &str) -> Value {
    match serde_json::from_str(text) {
        Ok(v) => v,
        // Discarded: a 2xx from the webhook is a success with or without a JSON body.
        Err(_) => Value::Object(Default::default()),
    }
}
