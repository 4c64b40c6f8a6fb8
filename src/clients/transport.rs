//! The seam between the connection and the wire.
//!
//! [`BoxApiConnection`](crate::clients::BoxApiConnection) resolves URLs,
//! merges headers and classifies responses; a [`Transport`] only performs the
//! exchange. [`ReqwestTransport`](crate::clients::ReqwestTransport) is the
//! default; tests and embedders can supply their own.

use std::fmt;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{find_pair, HttpMethod, RequestBody};
use crate::clients::http_response::HttpResponse;

/// A fully resolved request, ready to be put on the wire.
#[derive(Clone, Debug)]
pub struct PreparedRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL, without query string.
    pub url: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// All headers to send, defaults included.
    pub headers: Vec<(String, String)>,
    /// The request body, if any.
    pub body: Option<RequestBody>,
}

impl PreparedRequest {
    /// Returns the value of a query parameter, if present.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        find_pair(&self.query, key)
    }

    /// Returns the value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Performs one HTTP exchange.
///
/// Implementations must send exactly one request per call and must not
/// retry. Any status code is a successful exchange at this level; only
/// failures before a status is known (connection refused, timeout, I/O)
/// are errors. The returned response must be fully buffered so that no
/// connection resource outlives the call.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends the request and returns the buffered response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] on transport failure, or
    /// [`HttpError::Decode`] if a 2xx body is not valid JSON.
    fn execute(&self, request: PreparedRequest) -> Result<HttpResponse, HttpError>;
}
