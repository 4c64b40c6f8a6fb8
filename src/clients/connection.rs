//! Authenticated connection to the Box API.
//!
//! This module provides [`BoxApiConnection`], the handle every resource
//! facade and iterator is given explicitly. It is cheap to clone; clones
//! share the same configuration and transport.

use std::sync::Arc;

use crate::clients::errors::{ApiError, HttpError};
use crate::clients::http_client::ReqwestTransport;
use crate::clients::http_request::{DataType, HttpRequest, RequestTarget};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{PreparedRequest, Transport};
use crate::config::BoxConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// An authenticated connection to the Box API.
///
/// The connection handles:
/// - URL resolution against the API or upload base URL
/// - Default headers (`Authorization`, `Accept`, `User-Agent`, `As-User`)
/// - Classifying responses into success and [`ApiError`]
///
/// It never retries: each [`send`](Self::send) is exactly one exchange.
///
/// # Thread Safety
///
/// `BoxApiConnection` is `Send + Sync` and may issue independent requests
/// from several threads.
///
/// # Example
///
/// ```rust,ignore
/// use box_sdk::{AccessToken, BoxApiConnection, BoxConfig};
/// use box_sdk::clients::{HttpMethod, HttpRequest};
///
/// let config = BoxConfig::builder()
///     .access_token(AccessToken::new("token")?)
///     .build()?;
/// let api = BoxApiConnection::new(config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "users/me").build()?;
/// let response = api.send(request)?;
/// println!("{}", response.json()?);
/// ```
#[derive(Clone, Debug)]
pub struct BoxApiConnection {
    config: Arc<BoxConfig>,
    transport: Arc<dyn Transport>,
    default_headers: Arc<Vec<(String, String)>>,
}

// Verify BoxApiConnection is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BoxApiConnection>();
};

impl BoxApiConnection {
    /// Creates a connection using the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: BoxConfig) -> Result<Self, HttpError> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a connection that sends requests through the given transport.
    #[must_use]
    pub fn with_transport(config: BoxConfig, transport: Arc<dyn Transport>) -> Self {
        let default_headers = Self::build_default_headers(&config);
        Self {
            config: Arc::new(config),
            transport,
            default_headers: Arc::new(default_headers),
        }
    }

    /// Returns the configuration for this connection.
    #[must_use]
    pub fn config(&self) -> &BoxConfig {
        &self.config
    }

    /// Returns the default headers sent with every request.
    #[must_use]
    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    /// Resolves a request's path to an absolute URL.
    #[must_use]
    pub fn resolve_url(&self, request: &HttpRequest) -> String {
        match request.target {
            RequestTarget::Api => self.config.base_url().join(&request.path),
            RequestTarget::Upload => self.config.upload_url().join(&request.path),
        }
    }

    /// Sends a request and classifies the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The exchange fails before a status is known (`Network`)
    /// - A 2xx body is not JSON (`Decode`)
    /// - The status is not 2xx (`Api`)
    pub fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.resolve_url(&request);

        let mut headers: Vec<(String, String)> = self.default_headers.as_ref().clone();
        if request.data_type() == Some(DataType::Json) {
            headers.push((
                "Content-Type".to_string(),
                DataType::Json.as_content_type().to_string(),
            ));
        }
        for (key, value) in request.extra_headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&key));
            headers.push((key, value));
        }

        tracing::debug!(method = %request.http_method.as_str(), %url, "Sending Box API request");

        let prepared = PreparedRequest {
            method: request.http_method,
            url,
            query: request.query,
            headers,
            body: request.body,
        };

        let response = self.transport.execute(prepared)?;

        if response.is_ok() {
            return Ok(response);
        }

        let error = ApiError::from_response(
            response.code,
            response.body.as_ref(),
            response.request_id(),
        );
        tracing::debug!(
            code = error.code,
            error_code = ?error.error_code,
            request_id = ?error.request_id,
            "Box API returned an error response"
        );
        Err(HttpError::Api(error))
    }

    fn build_default_headers(config: &BoxConfig) -> Vec<(String, String)> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Box Rust SDK v{SDK_VERSION}");

        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", config.access_token().as_ref()),
            ),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), user_agent),
        ];

        if let Some(user_id) = config.as_user() {
            headers.push(("As-User".to_string(), user_id.to_string()));
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpMethod, RequestBody};
    use crate::config::{AccessToken, BaseUrl};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers every request with a canned response and records what it saw.
    #[derive(Debug)]
    struct CannedTransport {
        code: u16,
        body: &'static str,
        seen: Mutex<Vec<PreparedRequest>>,
    }

    impl CannedTransport {
        fn new(code: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                code,
                body,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Transport for CannedTransport {
        fn execute(&self, request: PreparedRequest) -> Result<HttpResponse, HttpError> {
            self.seen.lock().unwrap().push(request);
            let mut headers = HashMap::new();
            headers.insert("box-request-id".to_string(), vec!["req-1".to_string()]);
            HttpResponse::from_raw(self.code, headers, self.body)
        }
    }

    fn test_config() -> BoxConfig {
        BoxConfig::builder()
            .access_token(AccessToken::new("test-token").unwrap())
            .base_url(BaseUrl::new("https://api.example.com/2.0").unwrap())
            .upload_url(BaseUrl::new("https://upload.example.com/api/2.0").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_headers_include_bearer_token() {
        let transport = CannedTransport::new(200, "{}");
        let api = BoxApiConnection::with_transport(test_config(), transport);

        let auth = api
            .default_headers()
            .iter()
            .find(|(k, _)| k == "Authorization")
            .map(|(_, v)| v.as_str());
        assert_eq!(auth, Some("Bearer test-token"));
    }

    #[test]
    fn test_user_agent_with_prefix_and_as_user() {
        let config = BoxConfig::builder()
            .access_token(AccessToken::new("t").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .as_user("42")
            .build()
            .unwrap();
        let api = BoxApiConnection::with_transport(config, CannedTransport::new(200, "{}"));

        let headers: HashMap<_, _> = api.default_headers().iter().cloned().collect();
        assert!(headers["User-Agent"].starts_with("MyApp/1.0 | Box Rust SDK v"));
        assert_eq!(headers["As-User"], "42");
    }

    #[test]
    fn test_send_resolves_api_and_upload_urls() {
        let transport = CannedTransport::new(200, "{}");
        let api = BoxApiConnection::with_transport(test_config(), transport.clone());

        let request = HttpRequest::builder(HttpMethod::Get, "folders/0")
            .build()
            .unwrap();
        api.send(request).unwrap();

        let request = HttpRequest::builder(HttpMethod::Post, "files/content")
            .target(RequestTarget::Upload)
            .json_body(json!({}))
            .build()
            .unwrap();
        api.send(request).unwrap();

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].url, "https://api.example.com/2.0/folders/0");
        assert_eq!(seen[1].url, "https://upload.example.com/api/2.0/files/content");
    }

    #[test]
    fn test_send_sets_json_content_type_and_passes_body() {
        let transport = CannedTransport::new(201, r#"{"id": "7"}"#);
        let api = BoxApiConnection::with_transport(test_config(), transport.clone());

        let request = HttpRequest::builder(HttpMethod::Post, "folders")
            .json_body(json!({"name": "New"}))
            .build()
            .unwrap();
        let response = api.send(request).unwrap();
        assert_eq!(response.json().unwrap()["id"], "7");

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].header("content-type"), Some("application/json"));
        assert_eq!(seen[0].body, Some(RequestBody::Json(json!({"name": "New"}))));
    }

    #[test]
    fn test_extra_headers_override_defaults() {
        let transport = CannedTransport::new(200, "{}");
        let api = BoxApiConnection::with_transport(test_config(), transport.clone());

        let request = HttpRequest::builder(HttpMethod::Get, "users/me")
            .header("accept", "text/plain")
            .build()
            .unwrap();
        api.send(request).unwrap();

        let seen = transport.seen.lock().unwrap();
        let accepts: Vec<_> = seen[0]
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("accept"))
            .collect();
        assert_eq!(accepts.len(), 1);
        assert_eq!(accepts[0].1, "text/plain");
    }

    #[test]
    fn test_non_2xx_becomes_api_error() {
        let transport = CannedTransport::new(
            404,
            r#"{"type":"error","status":404,"code":"not_found","message":"Not Found"}"#,
        );
        let api = BoxApiConnection::with_transport(test_config(), transport);

        let request = HttpRequest::builder(HttpMethod::Get, "folders/999")
            .build()
            .unwrap();
        let error = api.send(request).unwrap_err();

        match error {
            HttpError::Api(e) => {
                assert_eq!(e.code, 404);
                assert_eq!(e.error_code.as_deref(), Some("not_found"));
                assert_eq!(e.request_id.as_deref(), Some("req-1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_request_is_rejected_before_sending() {
        let transport = CannedTransport::new(200, "{}");
        let api = BoxApiConnection::with_transport(test_config(), transport.clone());

        let request = HttpRequest {
            http_method: HttpMethod::Put,
            path: "folders/1".to_string(),
            target: RequestTarget::Api,
            body: None,
            query: Vec::new(),
            extra_headers: Vec::new(),
        };
        assert!(matches!(
            api.send(request),
            Err(HttpError::InvalidRequest(_))
        ));
        assert!(transport.seen.lock().unwrap().is_empty());
    }
}
