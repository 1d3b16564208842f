//! Error types for the RD Station client.
//!
//! Every failure leaving the request pipeline is one of the [`Error`]
//! variants. Raw transport or JSON library errors are always wrapped.

use std::fmt;

use derive_more::{Display, Error, From};

// ============================================================================
// Cause
// ============================================================================

/// Boxed underlying cause of a transport or body-read failure.
pub struct Cause(Box<dyn std::error::Error + Send + Sync + 'static>);

impl Cause {
    /// Wrap any error (or message) as a cause.
    pub fn new(error: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self(error.into())
    }

    /// Borrow the wrapped error.
    #[must_use]
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }

    /// Consume into the wrapped error.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.0
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Cause {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Classified error for RD Station operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The input could not be used to build a request
    /// (e.g. a query value that is not a flat record).
    #[display("invalid input: {_0}")]
    #[from(skip)]
    InvalidInput(#[error(not(source))] String),

    /// The request body could not be encoded as JSON.
    #[display("JSON serialization error: {_0}")]
    #[from]
    Serialization(serde_json::Error),

    /// The call did not produce a response: connection, TLS, protocol,
    /// cancellation or deadline failure.
    #[display("transport error: {_0}")]
    #[from(skip)]
    Transport(Cause),

    /// The body of a rejected response could not be read.
    #[display("failed to read response body (status: {status}): {source}")]
    #[from(skip)]
    BodyRead {
        /// HTTP status code of the rejected response.
        status: u16,
        /// Underlying read failure.
        source: Cause,
    },

    /// The API answered with a status outside of the accepted set.
    #[display("API returned status {status}: {body}")]
    #[from(skip)]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, verbatim.
        #[error(not(source))]
        body: String,
    },

    /// The response body could not be decoded into the target type.
    #[display("failed to decode response at '{path}': {source}")]
    #[from(skip)]
    Decode {
        /// JSON path to the failing field (e.g. `deals[0].deal_stage.id`).
        path: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The configured base URL is not a valid URL.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a transport error from any cause.
    #[must_use]
    pub fn transport(cause: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self::Transport(Cause::new(cause))
    }

    /// Create a body read error.
    #[must_use]
    pub fn body_read(
        status: u16,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self::BodyRead {
            status,
            source: Cause::new(cause),
        }
    }

    /// Create an API error carrying the raw body.
    #[must_use]
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error with path context.
    #[must_use]
    pub fn decode(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is a transport error.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the API rejected the call.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns `true` if the response could not be decoded.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns the HTTP status code for API and body read errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::BodyRead { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a 404 Not Found API error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.is_api() && self.status() == Some(404)
    }

    /// Returns the raw body of an API error.
    #[must_use]
    pub fn api_body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}
