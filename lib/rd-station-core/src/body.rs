//! JSON body encoding and decoding.

use bytes::Bytes;

use crate::{Error, Result};

/// MIME type of every request and response body exchanged with the CRM.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if the value cannot be represented as JSON
/// (e.g. a map with non-string keys).
///
/// # Example
///
/// ```
/// use rd_station_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Deal { name: String }
///
/// let deal = Deal { name: "Renewal".to_string() };
/// let bytes = to_json(&deal).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Renewal"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Error::Serialization)
}

/// Deserialize JSON bytes with path-aware errors.
///
/// A malformed body or a shape mismatch both yield [`Error::Decode`], with
/// the path to the failing field (empty for syntax errors at the root).
/// Only the first JSON document is read; anything after it is ignored.
///
/// # Example
///
/// ```
/// use rd_station_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Deal { id: String }
///
/// let deal: Deal = from_json(br#"{"id":"abc"}"#).expect("deserialize");
/// assert_eq!(deal, Deal { id: "abc".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        let path = e.path().to_string();
        Error::decode(path, e.into_inner())
    })
}
