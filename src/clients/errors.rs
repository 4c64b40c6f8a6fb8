//! HTTP-specific error types for the Box API SDK.
//!
//! - [`ApiError`]: A well-formed response with a non-2xx status
//! - [`InvalidHttpRequestError`]: A request that failed validation before sending
//! - [`HttpError`]: Unified error type for every HTTP exchange
//!
//! Nothing in this crate retries or swallows these errors; every failure
//! reaches the caller unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use box_sdk::clients::HttpError;
//!
//! match api.send(request) {
//!     Ok(response) => println!("Success: {:?}", response.body),
//!     Err(HttpError::Api(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// Error returned when the API answers with a non-2xx status.
///
/// Box error bodies look like
/// `{"type": "error", "status": 404, "code": "not_found", "message": "...", "request_id": "..."}`.
/// The fields are lifted out when present; the whole body is kept in
/// [`body`](Self::body).
///
/// # Example
///
/// ```rust
/// use box_sdk::clients::ApiError;
/// use serde_json::json;
///
/// let body = json!({"type": "error", "status": 409, "code": "item_name_in_use", "message": "Item with the same name already exists"});
/// let error = ApiError::from_response(409, Some(&body), None);
///
/// assert_eq!(error.code, 409);
/// assert_eq!(error.error_code.as_deref(), Some("item_name_in_use"));
/// assert!(error.to_string().contains("409"));
/// ```
#[derive(Debug, Clone, Error)]
#[error("The API returned an error code [{code}]: {message}")]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The server-provided message, or a generic one when the body has none.
    pub message: String,
    /// The machine-readable error code (e.g. `item_name_in_use`), if provided.
    pub error_code: Option<String>,
    /// Request ID for support tickets, from the body or `box-request-id` header.
    pub request_id: Option<String>,
    /// The parsed error body, when it was valid JSON.
    pub body: Option<Value>,
}

impl ApiError {
    /// Builds an `ApiError` from a response status, parsed body and header request ID.
    #[must_use]
    pub fn from_response(code: u16, body: Option<&Value>, header_request_id: Option<&str>) -> Self {
        let field = |name: &str| {
            body.and_then(|b| b.get(name))
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };

        let message = field("message")
            .or_else(|| field("raw_body"))
            .unwrap_or_else(|| format!("HTTP status {code}"));
        let request_id = field("request_id").or_else(|| header_request_id.map(ToString::to_string));

        Self {
            code,
            message,
            error_code: field("code"),
            request_id,
            body: body.cloned(),
        }
    }
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error before any status was known.
    ///
    /// Custom [`Transport`](crate::clients::Transport) implementations build
    /// this with [`HttpError::network`].
    #[error("Network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A successful response carried a body that is not valid JSON.
    #[error("Could not decode JSON response body (status {code}): {source}")]
    Decode {
        /// The HTTP status code of the response.
        code: u16,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A JSON body was required but the response had none.
    #[error("Expected a JSON response body but the response (status {code}) was empty")]
    EmptyBody {
        /// The HTTP status code of the response.
        code: u16,
    },
}

impl HttpError {
    /// Wraps a transport failure that happened before any status was known.
    ///
    /// # Example
    ///
    /// ```rust
    /// use box_sdk::HttpError;
    /// use std::io;
    ///
    /// let error = HttpError::network(io::Error::new(io::ErrorKind::TimedOut, "read timed out"));
    /// assert_eq!(error.to_string(), "Network error: read timed out");
    /// ```
    pub fn network(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Network(source.into())
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        Self::network(error)
    }
}
