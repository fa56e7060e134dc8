//! HTTP transport for content manager calls

use crate::error::EditorError;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and drops control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut cut = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Outcome of a finished request.
///
/// `status` is `None` when the request never got an answer from a server
/// (connection refused, DNS failure, broken body). The body is then empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub status: Option<StatusCode>,
    pub body: String,
}

impl Completion {
    fn failed() -> Self {
        Self {
            status: None,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_some_and(|s| s.is_success())
    }
}

/// Single-shot HTTP transport.
///
/// Every request resolves exactly once, after it has fully completed. There
/// is no timeout, no progress reporting and no cancellation.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new transport. This is the only fallible step.
    pub fn new() -> Result<Self, EditorError> {
        let client = Client::builder()
            .user_agent(concat!("cmedit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(EditorError::TransportUnavailable)?;

        Ok(Self { client })
    }

    /// Perform a request and wait for it to complete, successfully or not
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
        headers: HeaderMap,
    ) -> Completion {
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{} {} failed: {}", method, url, e);
                return Completion::failed();
            },
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read response body from {}: {}", url, e);
                return Completion::failed();
            },
        };

        if !status.is_success() {
            tracing::warn!("{} {} -> {} - {}", method, url, status, sanitize_for_log(&body));
        } else {
            tracing::trace!("{} {} -> {}", method, url, status);
        }

        Completion {
            status: Some(status),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(200)));
        assert!(sanitized.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("a\nb\tc"), "abc");
    }

    #[test]
    fn test_sanitize_respects_char_boundaries() {
        let body = format!("{}é{}", "a".repeat(199), "b".repeat(10));
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"a".repeat(199)));
        assert!(!sanitized.contains('é'));
    }

    #[test]
    fn test_completion_success() {
        let ok = Completion {
            status: Some(StatusCode::OK),
            body: String::new(),
        };
        let missing = Completion {
            status: Some(StatusCode::NOT_FOUND),
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!missing.is_success());
        assert!(!Completion::failed().is_success());
    }
}
