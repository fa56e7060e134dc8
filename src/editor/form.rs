//! Form State
//!
//! The editable fields of one resource, independent of how they are drawn.

use super::wire::{join_header, split_header, ResourcePayload};
use crate::error::EditorError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What to send for `ctype` when the content-type field is empty and the
/// loaded resource had no content type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CtypePolicy {
    /// Leave `ctype` out of the payload
    #[default]
    Omit,
    /// Always send `ctype`, as `""` when empty
    SendEmpty,
}

/// One editable name/value pair in the headers list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRow {
    pub name: String,
    pub value: String,
    /// Loaded as a bare name with no `:`; saved back the same way while the
    /// value stays empty
    pub bare: bool,
}

impl HeaderRow {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            bare: false,
        }
    }

    /// Wire form of the row
    pub fn to_raw(&self) -> String {
        if self.bare && self.value.is_empty() {
            self.name.clone()
        } else {
            join_header(&self.name, &self.value)
        }
    }
}

/// Current contents of the editor form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub path: String,
    pub content: String,
    pub ctype: String,
    /// The content type counts as set even when empty: the server sent one,
    /// or it was typed in
    pub ctype_present: bool,
    pub incdate: bool,
    pub expires_checked: bool,
    pub expires_visible: bool,
    pub expires: String,
    pub headers: Vec<HeaderRow>,
}

/// Text of a JSON field as a form control would show it
fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl FormState {
    /// Parse a fetched body and distribute it into the form.
    ///
    /// Parsing happens before any field is touched, so a malformed body
    /// leaves the form as it was. Keys missing from the response reset
    /// their fields.
    pub fn apply_response(&mut self, body: &str) -> Result<(), EditorError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| EditorError::MalformedResponse(e.to_string()))?;

        let Value::Object(document) = value else {
            return Err(EditorError::MalformedResponse(
                "expected a JSON object".to_string(),
            ));
        };

        self.apply_document(&document);
        Ok(())
    }

    fn apply_document(&mut self, document: &Map<String, Value>) {
        self.content = field_text(document.get("content"));
        self.ctype = field_text(document.get("ctype"));
        self.ctype_present = document.contains_key("ctype");

        if let Some(expires) = document.get("expires") {
            self.expires_checked = true;
            self.expires_visible = true;
            self.expires = field_text(Some(expires));
        } else {
            self.expires_checked = false;
            self.expires_visible = false;
            self.expires.clear();
        }

        self.incdate = document.contains_key("incdate");

        self.headers.clear();
        if let Some(headers) = document.get("headers").and_then(Value::as_array) {
            for raw in headers {
                match raw.as_str() {
                    Some(raw) => {
                        let (name, value) = split_header(raw);
                        let bare = !raw.contains(':');
                        self.headers.push(HeaderRow { name, value, bare });
                    },
                    None => tracing::warn!("Skipping non-string header entry: {}", raw),
                }
            }
        }
    }

    /// Record an edit of the content-type field; clearing it unsets it
    pub fn ctype_edited(&mut self) {
        self.ctype_present = !self.ctype.is_empty();
    }

    /// Show or hide the expiry region to match its checkbox
    pub fn toggle_expiry_visibility(&mut self) {
        self.expires_visible = self.expires_checked;
    }

    /// Flip the expiry checkbox, then sync the region
    pub fn set_expires_checked(&mut self, checked: bool) {
        self.expires_checked = checked;
        self.toggle_expiry_visibility();
    }

    pub fn add_header_row(&mut self) {
        self.headers.push(HeaderRow::default());
    }

    /// Remove the header row at `index`; returns whether one was removed
    pub fn remove_header_row(&mut self, index: usize) -> bool {
        if index < self.headers.len() {
            self.headers.remove(index);
            true
        } else {
            false
        }
    }

    /// Serialize the form into the object sent on save
    pub fn to_payload(&self, policy: CtypePolicy) -> ResourcePayload {
        let ctype = match policy {
            CtypePolicy::Omit if self.ctype.is_empty() && !self.ctype_present => None,
            _ => Some(self.ctype.clone()),
        };

        let headers = self
            .headers
            .iter()
            .filter(|row| !row.name.is_empty())
            .map(HeaderRow::to_raw)
            .collect();

        ResourcePayload {
            content: self.content.clone(),
            ctype,
            expires: self.expires_checked.then(|| self.expires.clone()),
            incdate: self.incdate.then_some(true),
            headers,
        }
    }
}
