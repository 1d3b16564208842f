//! RD Station CRM resources.
//!
//! Each operation is a thin wrapper over the request pipeline: an endpoint,
//! an optional payload, a target type, and the accepted statuses.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};

use crate::QueryElement;

mod contacts;
mod deals;

pub use contacts::*;
pub use deals::*;

/// Sort direction of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending, the API default.
    Desc,
}

impl QueryElement for Direction {
    fn to_query_value(&self) -> Cow<'_, str> {
        match self {
            Self::Asc => Cow::Borrowed("asc"),
            Self::Desc => Cow::Borrowed("desc"),
        }
    }
}

/// Decode `null` as the default value, the same as an absent field.
fn null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
