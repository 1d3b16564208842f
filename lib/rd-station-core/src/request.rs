//! Outbound HTTP request building.
//!
//! # Example
//!
//! ```
//! use rd_station_core::{Method, Request};
//!
//! let url = "https://crm.rdstation.com/api/v1/deals?token=t".parse().unwrap();
//! let request = Request::builder(Method::Get, url)
//!     .header("Accept", "application/json")
//!     .build();
//! assert!(request.body().is_none());
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::Method;
use crate::body::JSON_CONTENT_TYPE;

/// An HTTP request with method, URL, headers, and optional body.
///
/// Built fresh for every call and consumed by the transport.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL, including the `token` query parameter.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request URL with the `token` query parameter masked, for logging.
    #[must_use]
    pub fn redacted_url(&self) -> String {
        crate::endpoint::redact_token(&self.url)
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets a raw body.
    #[must_use]
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets an already-encoded JSON body and its content type.
    #[must_use]
    pub fn json_bytes(self, body: Bytes) -> Self {
        self.header("Content-Type", JSON_CONTENT_TYPE).body(body)
    }

    /// Serializes a value as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if serialization fails.
    pub fn json<T: serde::Serialize + ?Sized>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self.json_bytes(body))
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> url::Url {
        url::Url::parse(s).expect("valid URL")
    }

    #[test]
    fn request_builder_basic() {
        let request = Request::builder(Method::Get, url("https://crm.example.com/api/v1/deals"))
            .header("Accept", "application/json")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url().as_str(), "https://crm.example.com/api/v1/deals");
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert!(request.body().is_none());
    }

    #[test]
    fn request_builder_json() {
        #[derive(serde::Serialize)]
        struct Deal {
            name: String,
        }

        let request = Request::builder(Method::Post, url("https://crm.example.com/deals"))
            .json(&Deal {
                name: "New deal".to_string(),
            })
            .expect("json")
            .build();

        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(
            request.body().map(Bytes::as_ref),
            Some(br#"{"name":"New deal"}"#.as_slice())
        );
    }

    #[test]
    fn request_redacted_url_hides_token() {
        let request = Request::builder(
            Method::Get,
            url("https://crm.example.com/deals?page=1&token=secret"),
        )
        .build();

        let redacted = request.redacted_url();
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("page=1"));
    }
}
