use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform JSON body for every failure response.
///
/// `status` and `body` are set when an upstream answered with a non-success
/// status; `details` carries the rendering of an unexpected error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into(), status: None, body: None, details: None }
    }

    pub fn with_upstream(mut self, status: u16, body: impl Into<String>) -> Self {
        self.status = Some(status);
        self.body = Some(body.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// `{"success": true}` with an optional `data` payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Success {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Success {
    pub fn ok() -> Self {
        Self { success: true, data: None }
    }

    pub fn with_data(data: serde_json::Value) -> Self {
        Self { success: true, data: Some(data) }
    }
}
