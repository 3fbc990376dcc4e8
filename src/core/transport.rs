//! HTTP Transport
//!
//! HTTP client interface and implementations for discovery and token requests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::error::{OidcError, OidcResult};

/// HTTP request definition.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: String,
    /// Request headers (lowercase names).
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<String>,
}

impl HttpRequest {
    /// GET request with no headers.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Form-encoded POST request.
    pub fn form_post(url: impl Into<String>, body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: HashMap::new(),
            body: Some(body),
        }
        .header("content-type", "application/x-www-form-urlencoded")
    }

    /// Add a header.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }
}

/// HTTP method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// HTTP response definition.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Status text.
    pub status_text: String,
    /// Response headers (lowercase names).
    pub headers: HashMap<String, String>,
    /// Response body, empty when the provider sent none.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status falls in the accepted success range (200..=228).
    pub fn is_success(&self) -> bool {
        (200..=228).contains(&self.status)
    }

    /// Whether the response carried any body.
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Status line plus body, for diagnostics.
    pub fn description(&self) -> String {
        let status_line = if self.status_text.is_empty() {
            format!("HTTP {}", self.status)
        } else {
            format!("HTTP {} {}", self.status, self.status_text)
        };

        if self.body.is_empty() {
            status_line
        } else {
            format!("{}: {}", status_line, self.body)
        }
    }
}

/// HTTP transport interface (for dependency injection).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request.
    async fn send(&self, request: HttpRequest) -> OidcResult<HttpResponse>;
}

/// Default reqwest-based HTTP transport.
///
/// Each instance owns its own connection state: no cookie store and no idle
/// connections kept for reuse, so separate clients never share a session.
pub struct ReqwestHttpTransport {
    client: reqwest::Client,
}

impl ReqwestHttpTransport {
    /// Create new transport with transport-default timeouts.
    pub fn new() -> OidcResult<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| OidcError::Transport {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestHttpTransport {
    async fn send(&self, request: HttpRequest) -> OidcResult<HttpResponse> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder.send().await.map_err(|e| OidcError::Transport {
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("")
            .to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string().to_lowercase(), v.to_string());
            }
        }

        let body = response.text().await.map_err(|e| OidcError::Transport {
            message: e.to_string(),
        })?;

        Ok(HttpResponse {
            status,
            status_text,
            headers,
            body,
        })
    }
}

/// Mock HTTP transport for testing.
///
/// Responses are returned in the order they were queued.
#[derive(Default)]
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<OidcResult<HttpResponse>>>,
    request_history: Mutex<Vec<HttpRequest>>,
}

impl MockHttpTransport {
    /// Create new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to return.
    pub fn queue_response(&self, response: HttpResponse) -> &Self {
        self.lock_responses().push_back(Ok(response));
        self
    }

    /// Queue a response with a text body.
    pub fn queue_body(&self, status: u16, body: impl Into<String>) -> &Self {
        self.queue_response(HttpResponse {
            status,
            status_text: if status == 200 { "OK" } else { "Error" }.to_string(),
            headers: HashMap::new(),
            body: body.into(),
        })
    }

    /// Queue a JSON response.
    pub fn queue_json_response<T: serde::Serialize>(&self, status: u16, body: &T) -> &Self {
        let body = serde_json::to_string(body).unwrap_or_default();
        self.queue_response(HttpResponse {
            status,
            status_text: if status == 200 { "OK" } else { "Error" }.to_string(),
            headers: [("content-type".to_string(), "application/json".to_string())]
                .into_iter()
                .collect(),
            body,
        })
    }

    /// Queue a transport-level failure.
    pub fn queue_error(&self, error: OidcError) -> &Self {
        self.lock_responses().push_back(Err(error));
        self
    }

    /// Get request history.
    pub fn get_requests(&self) -> Vec<HttpRequest> {
        self.lock_history().clone()
    }

    /// Get last request.
    pub fn get_last_request(&self) -> Option<HttpRequest> {
        self.lock_history().last().cloned()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<OidcResult<HttpResponse>>> {
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_history(&self) -> std::sync::MutexGuard<'_, Vec<HttpRequest>> {
        self.request_history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> OidcResult<HttpResponse> {
        self.lock_history().push(request);

        self.lock_responses().pop_front().unwrap_or_else(|| {
            Err(OidcError::Transport {
                message: "No mock response available".to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_is_fifo() {
        let transport = MockHttpTransport::new();
        transport.queue_json_response(200, &serde_json::json!({"first": true}));
        transport.queue_body(500, "second");

        let first = transport.send(HttpRequest::get("https://a.example")).await.unwrap();
        let second = transport.send(HttpRequest::get("https://b.example")).await.unwrap();

        assert!(first.body.contains("first"));
        assert_eq!(second.status, 500);
        assert_eq!(second.body, "second");

        let history = transport.get_requests();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].url, "https://a.example");
    }

    #[tokio::test]
    async fn test_mock_transport_exhausted() {
        let transport = MockHttpTransport::new();
        let result = transport.send(HttpRequest::get("https://example.com")).await;
        assert!(matches!(result, Err(OidcError::Transport { .. })));
    }

    #[test]
    fn test_form_post_sets_content_type() {
        let request = HttpRequest::form_post("https://idp/token", "a=b".to_string())
            .header("Authorization", "Basic xyz");
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            request.headers.get("authorization").map(String::as_str),
            Some("Basic xyz")
        );
    }

    #[test]
    fn test_response_description_and_success_range() {
        let response = HttpResponse {
            status: 228,
            status_text: String::new(),
            headers: HashMap::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        assert_eq!(response.description(), "HTTP 228");

        let response = HttpResponse {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            headers: HashMap::new(),
            body: "upstream down".to_string(),
        };
        assert!(!response.is_success());
        assert_eq!(response.description(), "HTTP 502 Bad Gateway: upstream down");
    }

    #[test]
    fn test_http_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
    }
}
