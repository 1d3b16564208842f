//! Typed async client for the RD Station CRM API.
//!
//! Resource operations ([`RdStationClient::list_deals`],
//! [`RdStationClient::create_contact`], ...) run through one request
//! pipeline that builds the URL with the `token` parameter, encodes the
//! JSON payload, checks the status against the operation's accepted set,
//! and decodes the response or reports a classified [`Error`].
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use rd_station::prelude::*;
//!
//! let client = RdStationClient::from_env()?;
//! let ctx = CallContext::new().with_timeout(Duration::from_secs(10));
//!
//! let filter = ListDealsFilter {
//!     limit: 5,
//!     page: 1,
//!     order: "name".to_string(),
//!     direction: Some(Direction::Asc),
//!     ..Default::default()
//! };
//! let page = client.list_deals(&ctx, &filter).await?;
//! ```
//!
//! Query records derive their encoding:
//!
//! ```ignore
//! use rd_station::Query;
//!
//! #[derive(Default, Query)]
//! struct SearchFilter {
//!     #[query(rename = "q")]
//!     name: String,
//!     page: u32,
//!     tags: Vec<String>,
//! }
//! ```

// Lets the derive's `::rd_station::` paths resolve inside this crate
extern crate self as rd_station;

mod client;
mod config;
mod connector;
mod context;
pub mod middleware;
pub mod prelude;
mod resources;
mod transport;

pub use client::RdStationClient;
pub use config::{
    BASE_URL_ENV, ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, PoolConfig, TOKEN_ENV,
};
pub use context::{CallContext, Cancellation, Interrupt};
pub use resources::*;
pub use transport::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use rd_station_core::{
    BoxError, Cause, EndpointTemplate, Error, HttpClient, JSON_CONTENT_TYPE, Method, OK,
    OK_OR_CREATED, QueryElement, QueryField, Request, RequestBuilder, Response, ResponseBody,
    Result, TOKEN_PARAM, ToQueryPairs, append_query, build_url, encode_pairs, from_json,
    redact_token, to_json, to_query_string, to_query_string_from, to_query_string_value,
};

// Re-export http types for status codes and headers
pub use rd_station_core::{StatusCode, header};

// Re-export the derive macro
pub use rd_station_macro::Query;
