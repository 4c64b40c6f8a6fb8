//! HTTP request types for the Box API SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Box API.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Box API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case wire name of the method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Content type for HTTP request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// JSON content type (`application/json`).
    Json,
    /// Multipart form content (`multipart/form-data`).
    ///
    /// The boundary is chosen by the transport, so no `Content-Type` header
    /// is set for this type ahead of time.
    Multipart,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Multipart => "multipart/form-data",
        }
    }
}

/// The file part of a multipart upload.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    /// The file name sent in the part's `Content-Disposition`.
    pub filename: String,
    /// The file content.
    pub content: Vec<u8>,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("filename", &self.filename)
            .field("len", &self.content.len())
            .finish()
    }
}

/// A multipart form body: ordered text fields followed by one optional file part.
///
/// # Example
///
/// ```rust
/// use box_sdk::clients::MultipartForm;
///
/// let form = MultipartForm::new()
///     .field("parent_id", "0")
///     .file("hello.txt", b"hello".to_vec());
///
/// assert_eq!(form.fields(), &[("parent_id".to_string(), "0".to_string())]);
/// assert_eq!(form.file_part().unwrap().filename, "hello.txt");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    fields: Vec<(String, String)>,
    file: Option<FilePart>,
}

impl MultipartForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Sets the file part, replacing any previous one.
    #[must_use]
    pub fn file(mut self, filename: impl Into<String>, content: Vec<u8>) -> Self {
        self.file = Some(FilePart {
            filename: filename.into(),
            content,
        });
        self
    }

    /// Returns the text fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Returns the value of the first text field with the given name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the file part, if one was set.
    #[must_use]
    pub const fn file_part(&self) -> Option<&FilePart> {
        self.file.as_ref()
    }
}

/// A request body.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A JSON document.
    Json(serde_json::Value),
    /// A multipart form.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Returns the content type this body is sent as.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Json(_) => DataType::Json,
            Self::Multipart(_) => DataType::Multipart,
        }
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<MultipartForm> for RequestBody {
    fn from(form: MultipartForm) -> Self {
        Self::Multipart(form)
    }
}

/// Which configured base URL a request path is relative to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestTarget {
    /// The Content API base URL.
    #[default]
    Api,
    /// The upload base URL.
    Upload,
}

/// An HTTP request to be sent to the Box API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use box_sdk::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "folders/0")
///     .query_param("fields", "name,size")
///     .build()
///     .unwrap();
///
/// let put_request = HttpRequest::builder(HttpMethod::Put, "folders/123")
///     .json_body(json!({"name": "Renamed"}))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path, relative to the base URL selected by `target`.
    pub path: String,
    /// Which base URL the path is relative to.
    pub target: RequestTarget,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// Additional headers to include in the request.
    pub extra_headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Returns the value of a query parameter, if set.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        find_pair(&self.query, key)
    }

    /// Returns the content type of the body, if there is one.
    #[must_use]
    pub fn data_type(&self) -> Option<DataType> {
        self.body.as_ref().map(RequestBody::data_type)
    }

    /// Sets a query parameter, replacing an existing value with the same key.
    pub fn set_query_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.query.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.query.push((key, value));
        }
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] if `http_method` is
    /// `Post` or `Put` but `body` is `None`.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            request: HttpRequest {
                http_method: method,
                path: path.into(),
                target: RequestTarget::Api,
                body: None,
                query: Vec::new(),
                extra_headers: Vec::new(),
            },
        }
    }

    /// Sets the request body. Its content type follows from the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json_body(self, body: serde_json::Value) -> Self {
        self.body(RequestBody::Json(body))
    }

    /// Sets a multipart body.
    #[must_use]
    pub fn multipart(self, form: MultipartForm) -> Self {
        self.body(RequestBody::Multipart(form))
    }

    /// Resolves the path against the given base URL.
    #[must_use]
    pub const fn target(mut self, target: RequestTarget) -> Self {
        self.request.target = target;
        self
    }

    /// Adds a single query parameter, replacing an existing one with the same key.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.set_query_param(key, value);
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.extra_headers.push((key.into(), value.into()));
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}

/// Returns the value of the first pair whose key is `key`.
pub(crate) fn find_pair<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "folders/0")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "folders/0");
        assert_eq!(request.target, RequestTarget::Api);
        assert!(request.body.is_none());
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_builder_creates_valid_put_request() {
        let request = HttpRequest::builder(HttpMethod::Put, "folders/5")
            .json_body(json!({"name": "New"}))
            .build()
            .unwrap();

        assert_eq!(request.body, Some(RequestBody::Json(json!({"name": "New"}))));
        assert_eq!(request.data_type(), Some(DataType::Json));
    }

    #[test]
    fn test_verify_requires_body_for_post_and_put() {
        let post = HttpRequest::builder(HttpMethod::Post, "folders").build();
        assert!(matches!(
            post,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "post"
        ));

        let put = HttpRequest::builder(HttpMethod::Put, "folders/1").build();
        assert!(matches!(
            put,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "put"
        ));
    }

    #[test]
    fn test_data_type_follows_body() {
        let json_request = HttpRequest::builder(HttpMethod::Post, "folders")
            .body(json!({"name": "x"}))
            .build()
            .unwrap();
        assert_eq!(json_request.data_type(), Some(DataType::Json));

        let form_request = HttpRequest::builder(HttpMethod::Post, "files/content")
            .body(MultipartForm::new().field("parent_id", "0"))
            .build()
            .unwrap();
        assert_eq!(form_request.data_type(), Some(DataType::Multipart));

        let get_request = HttpRequest::builder(HttpMethod::Get, "folders/0")
            .build()
            .unwrap();
        assert_eq!(get_request.data_type(), None);
    }

    #[test]
    fn test_find_pair_returns_first_match() {
        let pairs = vec![
            ("limit".to_string(), "10".to_string()),
            ("offset".to_string(), "0".to_string()),
            ("limit".to_string(), "20".to_string()),
        ];

        assert_eq!(find_pair(&pairs, "limit"), Some("10"));
        assert_eq!(find_pair(&pairs, "offset"), Some("0"));
        assert_eq!(find_pair(&pairs, "fields"), None);
    }

    #[test]
    fn test_query_param_replaces_existing_key() {
        let request = HttpRequest::builder(HttpMethod::Get, "folders/0/items")
            .query_param("limit", "100")
            .query_param("offset", "0")
            .query_param("limit", "50")
            .build()
            .unwrap();

        assert_eq!(request.query.len(), 2);
        assert_eq!(request.query_value("limit"), Some("50"));
        assert_eq!(request.query_value("offset"), Some("0"));
    }

    #[test]
    fn test_multipart_request_targets_upload() {
        let form = MultipartForm::new()
            .field("parent_id", "0")
            .file("a.txt", b"abc".to_vec());
        let request = HttpRequest::builder(HttpMethod::Post, "files/content")
            .target(RequestTarget::Upload)
            .multipart(form)
            .build()
            .unwrap();

        assert_eq!(request.target, RequestTarget::Upload);
        assert_eq!(request.data_type(), Some(DataType::Multipart));
        match request.body {
            Some(RequestBody::Multipart(form)) => {
                assert_eq!(form.get_field("parent_id"), Some("0"));
                assert_eq!(form.file_part().unwrap().content, b"abc");
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_file_part_debug_hides_content() {
        let part = FilePart {
            filename: "a.bin".to_string(),
            content: vec![1, 2, 3],
        };
        let debug = format!("{part:?}");
        assert!(debug.contains("a.bin"));
        assert!(debug.contains("len: 3"));
    }
}
