//! Blocking HTTP transport backed by `reqwest`.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, RequestBody};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{PreparedRequest, Transport};

/// Name of the multipart part that carries file content.
pub const FILE_PART_NAME: &str = "file";

/// The default [`Transport`], a thin wrapper over a blocking `reqwest` client.
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync`; the inner client pools connections
/// and may be shared by many threads.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = Client::builder().use_rustls_tls();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wraps an existing `reqwest` blocking client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn build_form(form: crate::clients::MultipartForm) -> Form {
        let mut multipart = Form::new();
        for (name, value) in form.fields() {
            multipart = multipart.text(name.clone(), value.clone());
        }
        if let Some(file) = form.file_part() {
            let part = Part::bytes(file.content.clone()).file_name(file.filename.clone());
            multipart = multipart.part(FILE_PART_NAME, part);
        }
        multipart
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: PreparedRequest) -> Result<HttpResponse, HttpError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut req_builder = self.client.request(method, &request.url);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        match request.body {
            Some(RequestBody::Json(body)) => {
                req_builder = req_builder.body(body.to_string());
            }
            Some(RequestBody::Multipart(form)) => {
                req_builder = req_builder.multipart(Self::build_form(form));
            }
            None => {}
        }

        let res = req_builder.send()?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        // Reading the body to the end hands the connection back to the pool.
        let body_text = res.text()?;

        HttpResponse::from_raw(code, headers, &body_text)
    }
}
