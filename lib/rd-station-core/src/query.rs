//! Query string encoding for listing filters.
//!
//! A filter record is turned into `(name, value)` pairs, one field at a
//! time in declaration order, skipping fields that hold their zero value:
//!
//! | Field kind | Emitted when | Value |
//! |------------|--------------|-------|
//! | text | non-empty | as is |
//! | integer | non-zero | base 10 |
//! | boolean | `true` | `"true"` |
//! | sequence | for each element | [`QueryElement::to_query_value`] |
//! | `Option<T>` | `Some` | the inner value, even if zero |
//! | float | never | - |
//!
//! Records usually get their [`ToQueryPairs`] implementation from
//! `#[derive(Query)]`. Values only known at runtime go through
//! [`to_query_string_value`].

use std::borrow::Cow;

use serde_json::Value;
use url::form_urlencoded;

use crate::{Error, Result};

/// Types that can be converted to query parameter pairs.
///
/// This is automatically implemented by the `#[derive(Query)]` macro.
///
/// # Example
///
/// ```ignore
/// use rd_station::Query;
///
/// #[derive(Query)]
/// struct ListDealsFilter {
///     #[query(rename = "limit")]
///     limit: String,
///     #[query(rename = "page")]
///     page: String,
///     win: Option<bool>,
/// }
/// ```
pub trait ToQueryPairs {
    /// Convert this value to query parameter pairs, in field order.
    fn to_query_pairs(&self) -> Vec<(String, String)>;
}

impl<T: ToQueryPairs + ?Sized> ToQueryPairs for &T {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        (**self).to_query_pairs()
    }
}

/// A record field that knows how to contribute to a query string.
pub trait QueryField {
    /// Append this field's pairs (possibly none) under `key`.
    fn append_to(&self, key: &str, pairs: &mut Vec<(String, String)>);
}

/// An element of a sequence field.
///
/// Element types convert to text explicitly; there is no fallback to
/// `Debug` formatting. Implement this for domain types used in filters.
pub trait QueryElement {
    /// Text of this element in the query string.
    fn to_query_value(&self) -> Cow<'_, str>;
}

fn push(pairs: &mut Vec<(String, String)>, key: &str, value: impl Into<String>) {
    pairs.push((key.to_string(), value.into()));
}

// Text

impl QueryField for str {
    fn append_to(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        if !self.is_empty() {
            push(pairs, key, self);
        }
    }
}

impl QueryField for String {
    fn append_to(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        self.as_str().append_to(key, pairs);
    }
}

impl QueryField for Cow<'_, str> {
    fn append_to(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        self.as_ref().append_to(key, pairs);
    }
}

impl<T: QueryField + ?Sized> QueryField for &T {
    fn append_to(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        (**self).append_to(key, pairs);
    }
}

impl QueryElement for str {
    fn to_query_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl QueryElement for String {
    fn to_query_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl QueryElement for &str {
    fn to_query_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl QueryElement for char {
    fn to_query_value(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

// Integers

macro_rules! integer_query_impls {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryField for $ty {
                fn append_to(&self, key: &str, pairs: &mut Vec<(String, String)>) {
                    if *self != 0 {
                        push(pairs, key, self.to_string());
                    }
                }
            }

            impl QueryElement for $ty {
                fn to_query_value(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

integer_query_impls!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Booleans

impl QueryField for bool {
    fn append_to(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        if *self {
            push(pairs, key, "true");
        }
    }
}

impl QueryElement for bool {
    fn to_query_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }
}

// Floats are not query-encodable and contribute nothing.

impl QueryField for f32 {
    fn append_to(&self, _key: &str, _pairs: &mut Vec<(String, String)>) {}
}

impl QueryField for f64 {
    fn append_to(&self, _key: &str, _pairs: &mut Vec<(String, String)>) {}
}

// Sequences

impl<T: QueryElement> QueryField for [T] {
    fn append_to(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        for item in self {
            push(pairs, key, item.to_query_value());
        }
    }
}

impl<T: QueryElement> QueryField for Vec<T> {
    fn append_to(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        self.as_slice().append_to(key, pairs);
    }
}

// Optional values: present means sent, even when zero or empty.

impl<T: QueryElement> QueryField for Option<T> {
    fn append_to(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        if let Some(value) = self {
            push(pairs, key, value.to_query_value());
        }
    }
}

/// Encode a record as a URL query string (without the leading `?`).
///
/// # Example
///
/// ```ignore
/// let filter = ListDealsFilter { limit: 5, ..Default::default() };
/// assert_eq!(rd_station::to_query_string(&filter), "limit=5");
/// ```
#[must_use]
pub fn to_query_string<T: ToQueryPairs + ?Sized>(value: &T) -> String {
    encode_pairs(value.to_query_pairs())
}

/// Encode pairs with `application/x-www-form-urlencoded` rules.
#[must_use]
pub fn encode_pairs<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Encode any serializable flat record as a query string.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if the value cannot be represented as
/// JSON, or [`Error::InvalidInput`] if it is not a flat record.
pub fn to_query_string_from<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    to_query_string_value(&value)
}

/// Encode a JSON object whose fields are primitives or sequences of
/// primitives.
///
/// Strings, integers and booleans follow the same zero-value rules as
/// [`QueryField`]; `null` and floating point numbers are skipped, at the
/// top level and inside sequences alike.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the value is not an object, if a
/// field holds a nested object, or if a sequence holds a non-primitive
/// element.
///
/// # Example
///
/// ```
/// use rd_station_core::to_query_string_value;
/// use serde_json::json;
///
/// let query = to_query_string_value(&json!({"q": "Ana", "page": 0, "ids": [1, 2]})).unwrap();
/// assert_eq!(query, "q=Ana&ids=1&ids=2");
///
/// assert!(to_query_string_value(&json!(["not", "a", "record"])).is_err());
/// ```
pub fn to_query_string_value(value: &Value) -> Result<String> {
    let Value::Object(fields) = value else {
        return Err(Error::invalid_input(format!(
            "query input must be a record, got {}",
            kind_name(value)
        )));
    };

    let mut pairs = Vec::new();
    for (name, field) in fields {
        match field {
            Value::String(text) => text.append_to(name, &mut pairs),
            Value::Bool(flag) => flag.append_to(name, &mut pairs),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    int.append_to(name, &mut pairs);
                } else if let Some(int) = number.as_u64() {
                    int.append_to(name, &mut pairs);
                }
            }
            Value::Array(items) => {
                for item in items.iter().filter(|item| !item.is_f64()) {
                    let text = primitive_text(item).ok_or_else(|| {
                        Error::invalid_input(format!(
                            "sequence field '{name}' holds a non-primitive {}",
                            kind_name(item)
                        ))
                    })?;
                    pairs.push((name.clone(), text));
                }
            }
            Value::Object(_) => {
                return Err(Error::invalid_input(format!(
                    "field '{name}' is a nested record"
                )));
            }
            Value::Null => {}
        }
    }

    Ok(encode_pairs(pairs))
}

fn primitive_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_query_value().into_owned()),
        Value::Number(number) => Some(number.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "record",
    }
}
