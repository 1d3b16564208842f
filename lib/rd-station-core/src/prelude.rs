//! Prelude module for convenient imports.
//!
//! ```ignore
//! use rd_station_core::prelude::*;
//! ```

pub use crate::{
    EndpointTemplate, Error, HttpClient, Method, OK, OK_OR_CREATED, QueryElement, QueryField,
    Request, RequestBuilder, Response, Result, ToQueryPairs, to_query_string,
};
