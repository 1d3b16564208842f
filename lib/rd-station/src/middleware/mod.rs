//! Tower middleware for the HTTP transport.
//!
//! Layers wrap the transport service through [`crate::HyperClientBuilder::layer`].
//! They see every round-trip after the request is built, with the `token`
//! parameter already in the URL, and before the body is read.
//!
//! # Example
//!
//! ```ignore
//! use rd_station::HyperClient;
//! use rd_station::middleware::LoggingLayer;
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
