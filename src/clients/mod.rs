//! HTTP client types for Box API communication.
//!
//! This module provides the request/response layer every resource facade
//! and iterator is built on.
//!
//! # Overview
//!
//! - [`BoxApiConnection`]: The authenticated connection, passed explicitly to every call
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A fully buffered response from the API
//! - [`HttpMethod`]: Supported HTTP methods
//! - [`DataType`]: Content types for request bodies
//! - [`MultipartForm`]: Multipart upload bodies
//! - [`Transport`]: The pluggable exchange layer, with [`ReqwestTransport`] as default
//!
//! # Retry Behavior
//!
//! There is none. Each call to [`BoxApiConnection::send`] performs exactly
//! one exchange and every failure is returned to the caller.

mod connection;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use connection::{BoxApiConnection, SDK_VERSION};
pub use errors::{ApiError, HttpError, InvalidHttpRequestError};
pub use http_client::{ReqwestTransport, FILE_PART_NAME};
pub use http_request::{
    DataType, FilePart, HttpMethod, HttpRequest, HttpRequestBuilder, MultipartForm, RequestBody,
    RequestTarget,
};
pub use http_response::HttpResponse;
pub use transport::{PreparedRequest, Transport};
