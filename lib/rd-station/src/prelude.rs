//! Prelude module for convenient imports.
//!
//! ```ignore
//! use rd_station::prelude::*;
//! ```

pub use crate::{
    CallContext, Cancellation, ClientConfig, Direction, Error, HttpClient, HyperClient,
    ListContactsFilter, ListDealsFilter, Method, Query, QueryElement, RdStationClient, Result,
    StatusCode, ToQueryPairs,
};
pub use serde::{Deserialize, Serialize};
