//! Procedural macros for the RD Station CRM client.
//!
//! - `#[derive(Query)]` - turn a filter record into query string pairs
//!
//! # Example
//!
//! ```ignore
//! use rd_station::Query;
//!
//! #[derive(Query)]
//! pub struct ListContactsFilter {
//!     #[query(rename = "q")]
//!     pub name: String,
//!     pub limit: u32,
//! }
//! ```

mod query_derive;

use proc_macro::TokenStream;

/// Derive the `ToQueryPairs` trait for a struct with named fields.
///
/// Each field is encoded through its `QueryField` implementation, in
/// declaration order: empty text, zero integers, `false` and empty
/// sequences are left out.
///
/// # Field Attributes
///
/// - `#[query(rename = "name")]` - parameter name in the query string.
///   An empty name or `"-"` falls back to the field name.
/// - `#[query(skip)]` - never encode this field.
///
/// # Example
///
/// ```ignore
/// use rd_station::Query;
///
/// #[derive(Query)]
/// struct ListDealsFilter {
///     #[query(rename = "limit")]
///     page_size: String,    // becomes "limit"
///     deal_stage_id: String, // stays "deal_stage_id"
///     #[query(skip)]
///     notes: Vec<Note>,     // never sent
/// }
/// ```
#[proc_macro_derive(Query, attributes(query))]
pub fn derive_query(input: TokenStream) -> TokenStream {
    query_derive::expand_query_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
