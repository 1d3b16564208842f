//! Transport abstraction.
//!
//! [`HttpClient`] performs exactly one HTTP round-trip and hands back the
//! response with its body still unread. The request pipeline in the
//! `rd-station` crate is generic over it, which is also how tests plug in
//! in-memory transports.

use std::future::Future;
use std::sync::Arc;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations must be safe to share between concurrent calls
/// (typically by sharing a connection pool).
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response head and body stream.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] when no response is received
    /// (connection, TLS or protocol failure).
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).execute(request)
    }
}

impl<C: HttpClient> HttpClient for &C {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).execute(request)
    }
}
