//! Content Manager Client
//!
//! Binds the HTTP transport to a content manager server and its
//! `/content_manager_json` endpoint family.

use super::http::{Completion, HttpTransport};
use crate::editor::ResourcePayload;
use crate::error::EditorError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use url::Url;

/// Prefix of the human-facing editor pages
pub const EDITOR_PREFIX: &str = "/content_manager";

/// Prefix of the JSON endpoints
pub const JSON_PREFIX: &str = "/content_manager_json";

/// Client for one content manager server
#[derive(Clone)]
pub struct ContentManagerClient {
    pub http: HttpTransport,
    base_url: Url,
}

impl ContentManagerClient {
    /// Create a new client for the server at `base_url`
    pub fn new(base_url: &str) -> Result<Self, EditorError> {
        let base_url = Url::parse(base_url)?;
        let http = HttpTransport::new()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build the JSON endpoint URL for a resource path
    pub fn json_url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            JSON_PREFIX,
            path
        )
    }

    /// GET the representation of a resource
    pub async fn fetch(&self, path: &str) -> Completion {
        self.http
            .request(Method::GET, &self.json_url(path), None, HeaderMap::new())
            .await
    }

    /// POST a full replacement of a resource
    pub async fn store(&self, path: &str, payload: &ResourcePayload) -> Result<Completion, EditorError> {
        let body = serde_json::to_string(payload).map_err(EditorError::Encode)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(self
            .http
            .request(Method::POST, &self.json_url(path), Some(body), headers)
            .await)
    }
}

/// Derive a resource path from the location the editor was opened at.
///
/// Accepts either a full URL or a bare path; only the path component is
/// used, with the editor prefix stripped. Returns `None` when nothing is
/// left.
pub fn path_from_location(location: &str) -> Option<String> {
    let location_path = match Url::parse(location) {
        Ok(url) => url.path().to_string(),
        Err(_) => location.to_string(),
    };

    let path = location_path
        .strip_prefix(EDITOR_PREFIX)
        .unwrap_or(&location_path);

    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_url() {
        let client = ContentManagerClient::new("http://localhost:8080").unwrap();
        assert_eq!(
            client.json_url("/foo"),
            "http://localhost:8080/content_manager_json/foo"
        );

        let client = ContentManagerClient::new("http://example.com/site/").unwrap();
        assert_eq!(
            client.json_url("/a/b.html"),
            "http://example.com/site/content_manager_json/a/b.html"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ContentManagerClient::new("not a url"),
            Err(EditorError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_path_from_location() {
        assert_eq!(
            path_from_location("/content_manager/foo/bar"),
            Some("/foo/bar".to_string())
        );
        assert_eq!(
            path_from_location("http://localhost:8080/content_manager/index.html"),
            Some("/index.html".to_string())
        );
        assert_eq!(path_from_location("/content_manager"), None);
        assert_eq!(path_from_location("http://localhost:8080/content_manager"), None);
        assert_eq!(path_from_location(""), None);
    }
}
