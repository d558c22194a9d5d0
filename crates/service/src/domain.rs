//! Inbound request shapes and their validation rules.

use serde::Serialize;
use serde_json::Value;

use crate::errors::ServiceError;

pub const LOGIN_REQUIRED: &str = "username and password are required";
pub const EMAIL_REQUIRED: &str = "email and trackingNumber are required";
pub const CLIENT_ID_INVALID: &str = "clientId must be a numeric value";

/// Parse a raw request body leniently: anything that is not valid JSON is
/// treated like an empty body, so it fails field validation instead.
pub fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}

/// Trims Unicode whitespace plus the byte-order mark, which browsers treat as blank.
pub fn trim_blank(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// A string field that is non-empty after trimming, returned trimmed.
/// Non-string values and non-object bodies yield `None`.
pub fn required_text<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)?
        .as_str()
        .map(trim_blank)
        .filter(|s| !s.is_empty())
}

/// Placeholder credential check. Holds the values only long enough to
/// validate them; nothing is verified or stored.
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginRequest {
    pub fn from_json(body: &Value) -> Result<Self, ServiceError> {
        match (required_text(body, "username"), required_text(body, "password")) {
            (Some(username), Some(password)) => Ok(Self {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Err(ServiceError::validation(LOGIN_REQUIRED)),
        }
    }
}

/// Outbound webhook payload; fields are already trimmed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmailDispatchRequest {
    pub email: String,
    pub tracking_number: String,
}

impl EmailDispatchRequest {
    pub fn from_json(body: &Value) -> Result<Self, ServiceError> {
        match (required_text(body, "email"), required_text(body, "trackingNumber")) {
            (Some(email), Some(tracking)) => Ok(Self {
                email: email.to_string(),
                tracking_number: tracking.to_string(),
            }),
            _ => Err(ServiceError::validation(EMAIL_REQUIRED)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientLookupQuery {
    client_id: String,
}

impl ClientLookupQuery {
    /// Trimmed id made of one or more ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        let id = trim_blank(raw);
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ServiceError::validation(CLIENT_ID_INVALID));
        }
        Ok(Self { client_id: id.to_string() })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_accepts_any_non_blank_pair() {
        let req = LoginRequest::from_json(&json!({"username": " ann ", "password": "x"})).unwrap();
        assert_eq!(req.username, "ann");
        assert_eq!(req.password, "x");
    }

    #[test]
    fn login_rejects_missing_blank_or_non_string() {
        let cases = [
            json!({}),
            json!({"username": "a"}),
            json!({"password": "b"}),
            json!({"username": "", "password": "b"}),
            json!({"username": "a", "password": "   "}),
            json!({"username": "\t\n", "password": "b"}),
            json!({"username": "\u{feff}", "password": "b"}),
            json!({"username": "a", "password": " \u{feff}\u{a0} "}),
            json!({"username": 1, "password": "b"}),
            json!({"username": "a", "password": null}),
            json!(["a", "b"]),
            Value::Null,
        ];
        for body in cases {
            let err = LoginRequest::from_json(&body).unwrap_err();
            assert_eq!(err, ServiceError::validation(LOGIN_REQUIRED), "body: {body}");
        }
    }

    #[test]
    fn login_debug_hides_password() {
        let req = LoginRequest::from_json(&json!({"username": "ann", "password": "hunter2"})).unwrap();
        let rendered = format!("{req:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn email_request_trims_and_renames() {
        let req = EmailDispatchRequest::from_json(
            &json!({"email": "  a@b.com ", "trackingNumber": " 1Z999 "}),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"email": "a@b.com", "trackingNumber": "1Z999"})
        );
    }

    #[test]
    fn email_request_requires_both_fields() {
        for body in [
            json!({"email": "a@b.com"}),
            json!({"trackingNumber": "1Z"}),
            json!({"email": " ", "trackingNumber": "1Z"}),
            json!({"email": "a@b.com", "trackingNumber": 42}),
        ] {
            assert_eq!(
                EmailDispatchRequest::from_json(&body).unwrap_err(),
                ServiceError::validation(EMAIL_REQUIRED)
            );
        }
    }

    #[test]
    fn client_id_must_be_all_digits() {
        for raw in ["12a", "", "   ", "1.0", "-5", "+5", "1 2", "٣"] {
            assert!(ClientLookupQuery::parse(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn client_id_is_trimmed() {
        let q = ClientLookupQuery::parse(" 0042 ").unwrap();
        assert_eq!(q.client_id(), "0042");
        let q = ClientLookupQuery::parse("\u{feff}7").unwrap();
        assert_eq!(q.client_id(), "7");
    }

    #[test]
    fn malformed_body_parses_as_null() {
        assert_eq!(parse_body(b"{not json"), Value::Null);
        assert_eq!(parse_body(b""), Value::Null);
        assert_eq!(parse_body(br#"{"a":1}"#), json!({"a": 1}));
    }
}
