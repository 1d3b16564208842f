//! Endpoint templates and URL assembly.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::{Error, Result};

/// Characters escaped in path segments and query values: everything but
/// RFC 3986 unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Name of the query parameter carrying the API token.
pub const TOKEN_PARAM: &str = "token";

/// An endpoint path relative to the API base URL, such as `deals/{id}`.
///
/// Placeholders are substituted positionally by [`EndpointTemplate::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointTemplate(&'static str);

impl EndpointTemplate {
    /// Create a new endpoint template.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// Get the template string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Substitute each `{..}` placeholder, in order, with a percent-encoded
    /// argument.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the number of arguments does not
    /// match the number of placeholders, or a placeholder is not closed.
    ///
    /// # Example
    ///
    /// ```
    /// use rd_station_core::EndpointTemplate;
    ///
    /// let endpoint = EndpointTemplate::new("deals/{id}").render(&["a b"]).unwrap();
    /// assert_eq!(endpoint, "deals/a%20b");
    /// ```
    pub fn render(&self, args: &[&str]) -> Result<String> {
        let mut rendered = String::with_capacity(self.0.len());
        let mut args = args.iter();
        let mut rest = self.0;

        while let Some(start) = rest.find('{') {
            let (head, tail) = rest.split_at(start);
            rendered.push_str(head);
            let end = tail.find('}').ok_or_else(|| {
                Error::invalid_input(format!("unclosed placeholder in endpoint '{}'", self.0))
            })?;
            let arg = args.next().ok_or_else(|| {
                Error::invalid_input(format!("missing argument for endpoint '{}'", self.0))
            })?;
            rendered.extend(utf8_percent_encode(arg, COMPONENT));
            rest = tail.get(end + 1..).unwrap_or_default();
        }
        rendered.push_str(rest);

        if args.next().is_some() {
            return Err(Error::invalid_input(format!(
                "too many arguments for endpoint '{}'",
                self.0
            )));
        }
        Ok(rendered)
    }
}

impl std::fmt::Display for EndpointTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EndpointTemplate {
    fn as_ref(&self) -> &str {
        self.0
    }
}

/// Append an encoded query string to an endpoint, if not empty.
#[must_use]
pub fn append_query(endpoint: &str, query: &str) -> String {
    if query.is_empty() {
        endpoint.to_string()
    } else {
        format!("{endpoint}?{query}")
    }
}

/// Build the full call URL: `{base}/{endpoint}` followed by the token
/// parameter, introduced by `&` when the endpoint already carries a query
/// string and by `?` otherwise.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the result is not a valid URL.
pub fn build_url(base: &Url, endpoint: &str, token: &str) -> Result<Url> {
    let base = base.as_str().trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    let token = utf8_percent_encode(token, COMPONENT);

    let raw = format!("{base}/{endpoint}{separator}{TOKEN_PARAM}={token}");
    Url::parse(&raw).map_err(|e| Error::invalid_input(format!("invalid endpoint '{endpoint}': {e}")))
}

/// Render a URL with the token parameter masked.
#[must_use]
pub fn redact_token(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == TOKEN_PARAM {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://crm.rdstation.com/api/v1").expect("valid URL")
    }

    #[test]
    fn render_substitutes_in_order() {
        let template = EndpointTemplate::new("deals/{deal_id}/products/{id}");
        assert_eq!(
            template.render(&["d1", "p/2"]).expect("render"),
            "deals/d1/products/p%2F2"
        );
        assert_eq!(template.as_str(), "deals/{deal_id}/products/{id}");
    }

    #[test]
    fn render_checks_arity() {
        let template = EndpointTemplate::new("contacts/{id}");
        assert!(template.render(&[]).is_err());
        assert!(template.render(&["a", "b"]).is_err());
        assert_eq!(
            EndpointTemplate::new("contacts").render(&[]).expect("render"),
            "contacts"
        );
    }

    #[test]
    fn append_query_skips_empty() {
        assert_eq!(append_query("deals", ""), "deals");
        assert_eq!(append_query("deals", "page=1"), "deals?page=1");
    }

    #[test]
    fn build_url_uses_question_mark_without_query() {
        let url = build_url(&base(), "deals", "abc").expect("url");
        assert_eq!(url.as_str(), "https://crm.rdstation.com/api/v1/deals?token=abc");
    }

    #[test]
    fn build_url_uses_ampersand_with_query() {
        let url = build_url(&base(), "deals?page=1&limit=5", "abc").expect("url");
        assert_eq!(
            url.as_str(),
            "https://crm.rdstation.com/api/v1/deals?page=1&limit=5&token=abc"
        );
    }

    #[test]
    fn build_url_normalizes_slashes_and_encodes_token() {
        let base = Url::parse("https://crm.rdstation.com/api/v1/").expect("valid URL");
        let url = build_url(&base, "/contacts", "a&b=c").expect("url");
        assert_eq!(
            url.as_str(),
            "https://crm.rdstation.com/api/v1/contacts?token=a%26b%3Dc"
        );
        let token = url
            .query_pairs()
            .find(|(k, _)| k == TOKEN_PARAM)
            .map(|(_, v)| v.into_owned());
        assert_eq!(token.as_deref(), Some("a&b=c"));
    }

    #[test]
    fn redact_token_masks_value() {
        let url = build_url(&base(), "deals?page=2", "secret").expect("url");
        let redacted = redact_token(&url);
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("page=2"));
        assert!(redacted.contains("token="));
    }
}
