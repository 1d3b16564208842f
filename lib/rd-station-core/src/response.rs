//! Inbound HTTP response handling.
//!
//! A [`Response`] holds the status and headers plus the body as an unread
//! stream of chunks, so the caller decides whether (and how) to consume it.
//! Dropping the response releases the body and its underlying connection.

use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures_core::Stream;
use futures_util::{StreamExt, stream};

use crate::error::Cause;

/// Boxed error produced by a body stream.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A response body: chunks of bytes arriving over time.
pub type ResponseBody = Pin<Box<dyn Stream<Item = Result<Bytes, BoxError>> + Send>>;

/// Status codes accepted by most calls.
pub const OK: &[u16] = &[200];

/// Status codes accepted by creation calls.
pub const OK_OR_CREATED: &[u16] = &[200, 201];

/// HTTP response with status, headers, and a streaming body.
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: ResponseBody,
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl Response {
    /// Creates a new response around a body stream.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: ResponseBody) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Creates a response whose body is already buffered.
    #[must_use]
    pub fn from_bytes(status: u16, body: impl Into<Bytes>) -> Self {
        let chunk: Bytes = body.into();
        Self::new(
            status,
            HashMap::new(),
            Box::pin(stream::once(async move { Ok(chunk) })),
        )
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is one of `accepted`.
    #[must_use]
    pub fn is_accepted(&self, accepted: &[u16]) -> bool {
        accepted.contains(&self.status)
    }

    /// Consume into the body stream.
    #[must_use]
    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    /// Read the whole body.
    ///
    /// The stream is dropped when this returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns the cause of the first chunk that failed to arrive.
    pub async fn bytes(self) -> Result<Bytes, Cause> {
        let mut body = self.body;
        let mut collected = BytesMut::new();

        while let Some(chunk) = body.next().await {
            collected.extend_from_slice(&chunk.map_err(Cause::new)?);
        }

        Ok(collected.freeze())
    }

    /// Read the whole body as text, replacing invalid UTF-8 sequences.
    ///
    /// # Errors
    ///
    /// Returns the cause of the first chunk that failed to arrive.
    pub async fn text(self) -> Result<String, Cause> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
