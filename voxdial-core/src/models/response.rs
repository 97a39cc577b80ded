//! Generic response bodies.

use serde::{Deserialize, Serialize};

/// `{ "message": ... }` acknowledgement returned by many endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human readable result.
    pub message: String,
}

/// One entry of a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Location of the offending value, e.g. `["body", "name"]`.
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    /// Error message.
    pub msg: String,
    /// Error type tag.
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ValidationErrorDetail {
    /// Renders the location as a dotted path.
    #[must_use]
    pub fn location(&self) -> String {
        self.loc
            .iter()
            .map(|part| match part {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Body of a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpValidationError {
    /// Individual failures.
    pub detail: Vec<ValidationErrorDetail>,
}

impl HttpValidationError {
    /// Flattens the details into `loc: msg, loc: msg`.
    ///
    /// ```
    /// use voxdial_core::models::HttpValidationError;
    ///
    /// let body = r#"{"detail":[{"loc":["body","call_id"],"msg":"field required","type":"missing"}]}"#;
    /// let err: HttpValidationError = serde_json::from_str(body).unwrap();
    /// assert_eq!(err.summary(), "body.call_id: field required");
    /// ```
    #[must_use]
    pub fn summary(&self) -> String {
        self.detail
            .iter()
            .map(|d| format!("{}: {}", d.location(), d.msg))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
