//! HTTP response types for the Box API SDK.
//!
//! An [`HttpResponse`] is fully buffered: the transport reads the whole body
//! before handing the response over, so the underlying connection is already
//! released by the time a caller sees it. Operations that ignore the body
//! (delete, move, rename) can simply drop the response.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::errors::HttpError;

/// An HTTP response from the Box API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-case name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body, `None` when the response had no body.
    pub body: Option<Value>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Option<Value>) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Creates a response from a status code, headers and raw body text.
    ///
    /// An empty body becomes `None`. A non-JSON body on an error status is
    /// kept as `{"raw_body": text}` so it can still be surfaced in an
    /// [`ApiError`](crate::clients::ApiError).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] if a 2xx response carries a body that is
    /// not valid JSON.
    pub fn from_raw(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body_text: &str,
    ) -> Result<Self, HttpError> {
        if body_text.trim().is_empty() {
            return Ok(Self::new(code, headers, None));
        }

        let body = match serde_json::from_str(body_text) {
            Ok(value) => value,
            Err(source) if is_success(code) => return Err(HttpError::Decode { code, source }),
            Err(_) => serde_json::json!({ "raw_body": body_text }),
        };

        Ok(Self::new(code, headers, Some(body)))
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        is_success(self.code)
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `box-request-id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("box-request-id")
    }

    /// Returns the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::EmptyBody`] if the response had no body.
    pub fn json(&self) -> Result<&Value, HttpError> {
        self.body
            .as_ref()
            .ok_or(HttpError::EmptyBody { code: self.code })
    }

    /// Consumes the response and returns the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::EmptyBody`] if the response had no body.
    pub fn into_json(self) -> Result<Value, HttpError> {
        self.body.ok_or(HttpError::EmptyBody { code: self.code })
    }
}

const fn is_success(code: u16) -> bool {
    code >= 200 && code <= 299
}
