//! Wire format of a resource

use serde::{Deserialize, Serialize};

/// Outgoing resource object.
///
/// Optional fields are skipped entirely when unset so the server never sees
/// `null` for a toggle that is off. `headers` is always sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePayload {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incdate: Option<bool>,
    #[serde(default)]
    pub headers: Vec<String>,
}

/// Split a raw `name:value` header on its first colon.
/// A string without a colon is all name.
pub fn split_header(raw: &str) -> (String, String) {
    match raw.split_once(':') {
        Some((name, value)) => (name.to_string(), value.to_string()),
        None => (raw.to_string(), String::new()),
    }
}

pub fn join_header(name: &str, value: &str) -> String {
    format!("{}:{}", name, value)
}
