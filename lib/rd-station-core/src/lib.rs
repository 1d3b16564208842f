//! Core types and traits for the RD Station CRM client.
//!
//! This crate provides the transport-agnostic building blocks:
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - outbound requests
//! - [`Response`] - inbound response with a streaming body
//! - [`Error`] and [`Result`] - classified errors
//! - [`HttpClient`] - transport trait executing one round-trip
//! - [`ToQueryPairs`], [`QueryField`], [`QueryElement`] - query string encoding
//! - [`EndpointTemplate`] - endpoint paths with placeholders

mod body;
mod client;
mod endpoint;
mod error;
mod method;
pub mod prelude;
mod query;
mod request;
mod response;

pub use body::{JSON_CONTENT_TYPE, from_json, to_json};
pub use client::HttpClient;
pub use endpoint::{EndpointTemplate, TOKEN_PARAM, append_query, build_url, redact_token};
pub use error::{Cause, Error, Result};
pub use method::Method;
pub use query::{
    QueryElement, QueryField, ToQueryPairs, encode_pairs, to_query_string, to_query_string_from,
    to_query_string_value,
};
pub use request::{Request, RequestBuilder};
pub use response::{BoxError, OK, OK_OR_CREATED, Response, ResponseBody};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
