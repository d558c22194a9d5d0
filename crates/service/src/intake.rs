//! IntakeQ client search, narrowed down to a single client record.

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::ClientLookupQuery;
use crate::errors::ServiceError;
use crate::upstream;

pub const INTAKE_FAILED: &str = "IntakeQ request failed";
pub const AUTH_HEADER: &str = "X-Auth-Key";
pub const CLIENT_ID_FIELD: &str = "ClientId";

#[derive(Clone)]
pub struct IntakeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for IntakeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl IntakeClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into(), api_key: api_key.into() }
    }

    /// Search by id with full profile data and return the matching record.
    pub async fn lookup(&self, query: &ClientLookupQuery) -> Result<Value, ServiceError> {
        let client_id = query.client_id();
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("search", client_id), ("includeProfile", "true")])
            .header(AUTH_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        debug!(%client_id, status = status.as_u16(), "intake search responded");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), "intake rejected the configured api key");
            return Err(ServiceError::UpstreamAuth);
        }
        if !status.is_success() {
            let body = upstream::text_or_empty(resp).await;
            return Err(ServiceError::Upstream {
                error: INTAKE_FAILED.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        // Strict: an unparsable success body is an unexpected error.
        let records: Value = resp.json().await?;
        select_client(records, client_id)
    }
}

/// Exact-match disambiguation over a search result.
///
/// Picks the record whose `ClientId` equals `client_id` when rendered as a
/// string, else the first record. Non-arrays and empty arrays are not found.
pub fn select_client(records: Value, client_id: &str) -> Result<Value, ServiceError> {
    let mut items = match records {
        Value::Array(items) if !items.is_empty() => items,
        _ => return Err(ServiceError::NotFound(client_id.to_string())),
    };

    let index = match items.iter().position(|r| identifier(r).as_deref() == Some(client_id)) {
        Some(i) => i,
        None => {
            // TODO: confirm whether IntakeQ search can return unrelated clients; if so this should be NotFound.
            warn!(%client_id, candidates = items.len(), "no exact ClientId match; using first result");
            0
        }
    };
    Ok(items.swap_remove(index))
}

fn identifier(record: &Value) -> Option<String> {
    match record.get(CLIENT_ID_FIELD)? {
        Value::Number(n) if n.is_f64() => n.as_f64().map(render_float),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Whole floats render without a fraction (`7.0` -> `"7"`), as JSON producers expect.
fn render_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        // `+ 0.0` folds -0.0 into 0.0
        format!("{:.0}", f + 0.0)
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exact_match_wins_over_first_element() {
        let records = json!([{"ClientId": 42, "Name": "A"}, {"ClientId": 7, "Name": "B"}]);
        let picked = select_client(records, "7").unwrap();
        assert_eq!(picked, json!({"ClientId": 7, "Name": "B"}));
    }

    #[test]
    fn string_identifiers_compare_as_strings() {
        let records = json!([{"ClientId": "1"}, {"ClientId": "12"}]);
        assert_eq!(select_client(records, "12").unwrap(), json!({"ClientId": "12"}));
    }

    #[test]
    fn falls_back_to_first_when_nothing_matches() {
        let records = json!([{"ClientId": 100}, {"ClientId": 200}]);
        assert_eq!(select_client(records, "7").unwrap(), json!({"ClientId": 100}));
    }

    #[test]
    fn whole_float_ids_match_integer_query() {
        let records = json!([{"ClientId": 42.0}, {"ClientId": 7.0}]);
        assert_eq!(select_client(records, "7").unwrap(), json!({"ClientId": 7.0}));
    }

    #[test]
    fn fractional_ids_never_match() {
        let records = json!([{"ClientId": 1}, {"ClientId": 7.5}]);
        assert_eq!(select_client(records, "7").unwrap(), json!({"ClientId": 1}));
    }

    #[test]
    fn leading_zeros_do_not_match_numeric_ids() {
        let records = json!([{"ClientId": 1}, {"ClientId": 7}]);
        assert_eq!(select_client(records, "07").unwrap(), json!({"ClientId": 1}));
    }

    #[test]
    fn empty_array_is_not_found() {
        assert_eq!(select_client(json!([]), "5").unwrap_err(), ServiceError::NotFound("5".into()));
    }

    #[test]
    fn non_array_is_not_found() {
        for v in [json!({"ClientId": 5}), json!(null), json!("5")] {
            assert_eq!(select_client(v, "5").unwrap_err(), ServiceError::NotFound("5".into()));
        }
    }

    #[test]
    fn debug_does_not_leak_api_key() {
        let c = IntakeClient::new(reqwest::Client::new(), "http://x", "secret-key");
        assert!(!format!("{c:?}").contains("secret-key"));
    }
}
