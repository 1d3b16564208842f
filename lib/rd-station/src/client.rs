//! The RD Station CRM client and its request pipeline.
//!
//! Every resource operation goes through [`RdStationClient::request`]:
//!
//! 1. the payload, if any, is encoded as JSON;
//! 2. the URL is `{base_url}/{endpoint}` plus the `token` parameter;
//! 3. one round-trip runs on the transport, raced against the
//!    [`CallContext`];
//! 4. the status is checked against the operation's accepted set;
//! 5. the body is either decoded into the target type or returned verbatim
//!    in [`Error::Api`].
//!
//! The response body is consumed or dropped before the call returns.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, info, info_span, warn};
use url::Url;

use crate::{
    CallContext, ClientConfig, Error, HttpClient, HyperClient, JSON_CONTENT_TYPE, Method, OK,
    OK_OR_CREATED, Request, Result, ToQueryPairs, append_query, build_url, from_json, header,
    to_json, to_query_string,
};

/// Typed client for the RD Station CRM API.
///
/// Cheap to clone: clones share the transport and its connection pool.
///
/// # Example
///
/// ```ignore
/// use rd_station::{CallContext, ListDealsFilter, RdStationClient};
///
/// let client = RdStationClient::from_env()?;
/// let filter = ListDealsFilter { limit: 5, ..Default::default() };
/// let deals = client.list_deals(&CallContext::new(), &filter).await?;
/// ```
#[derive(Clone)]
pub struct RdStationClient<C = HyperClient> {
    http: C,
    base_url: Url,
    token: Arc<str>,
}

impl<C> std::fmt::Debug for RdStationClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RdStationClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"***")
            .finish_non_exhaustive()
    }
}

impl RdStationClient {
    /// Client for `token` against the default base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Ok(Self::from_config(ClientConfig::new(token)?))
    }

    /// Client configured from the environment, see [`ClientConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds no usable configuration.
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }

    /// Client using the hyper transport with the configured pool settings.
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        let http = HyperClient::from_config(&config);
        Self::with_http_client(config, http)
    }
}

impl<C: HttpClient> RdStationClient<C> {
    /// Client using a custom transport.
    #[must_use]
    pub fn with_http_client(config: ClientConfig, http: C) -> Self {
        Self {
            http,
            base_url: config.base_url,
            token: config.token.into(),
        }
    }

    /// The API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying transport.
    #[must_use]
    pub const fn http_client(&self) -> &C {
        &self.http
    }

    /// Run one API call.
    ///
    /// `endpoint` is relative to the base URL and may already carry a query
    /// string. The call succeeds only when the response status is one of
    /// `accepted`; the body is then decoded as `T`.
    ///
    /// # Errors
    ///
    /// - [`Error::Serialization`] if `body` cannot be encoded;
    /// - [`Error::InvalidInput`] if the URL cannot be built;
    /// - [`Error::Transport`] on network failure, cancellation, or deadline;
    /// - [`Error::BodyRead`] if a rejected response body cannot be read;
    /// - [`Error::Api`] for any status outside `accepted`;
    /// - [`Error::Decode`] if an accepted body is not a valid `T`.
    pub async fn request<B, T>(
        &self,
        ctx: &CallContext,
        body: Option<&B>,
        method: Method,
        endpoint: &str,
        accepted: &[u16],
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let span = info_span!("rd_station_request", %method, endpoint);
        self.run(ctx, body, method, endpoint, accepted)
            .instrument(span)
            .await
    }

    async fn run<B, T>(
        &self,
        ctx: &CallContext,
        body: Option<&B>,
        method: Method,
        endpoint: &str,
        accepted: &[u16],
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body.map(to_json).transpose()?;
        let url = build_url(&self.base_url, endpoint, &self.token)?;

        let mut builder = Request::builder(method, url)
            .header(header::CONTENT_TYPE.as_str(), JSON_CONTENT_TYPE)
            .header(header::ACCEPT.as_str(), JSON_CONTENT_TYPE);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let request = builder.build();

        debug!("sending request");
        let start = Instant::now();

        let outcome = match ctx.run(self.exchange(request, accepted)).await {
            Ok(outcome) => outcome,
            Err(interrupt) => Err(Error::transport(interrupt)),
        };

        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        match outcome {
            Ok((status, value)) => {
                info!(status, elapsed_ms, "request completed");
                Ok(value)
            }
            Err(err) => {
                warn!(status = ?err.status(), error = %err, elapsed_ms, "request failed");
                Err(err)
            }
        }
    }

    /// One round-trip: send, check the status, consume the body.
    async fn exchange<T: DeserializeOwned>(
        &self,
        request: Request,
        accepted: &[u16],
    ) -> Result<(u16, T)> {
        let response = self.http.execute(request).await?;
        let status = response.status();

        if !response.is_accepted(accepted) {
            return match response.text().await {
                Ok(body) => Err(Error::api(status, body)),
                Err(cause) => Err(Error::body_read(status, cause.into_inner())),
            };
        }

        // A body cut short is as unusable as a malformed one
        let bytes = response.bytes().await.map_err(|cause| {
            Error::decode("", serde_json::Error::io(std::io::Error::other(cause.into_inner())))
        })?;
        let value = from_json(&bytes)?;
        Ok((status, value))
    }

    /// `GET endpoint?query`, accepting `200 OK`.
    ///
    /// # Errors
    ///
    /// See [`RdStationClient::request`].
    pub async fn get<Q, T>(&self, ctx: &CallContext, endpoint: &str, query: &Q) -> Result<T>
    where
        Q: ToQueryPairs + ?Sized,
        T: DeserializeOwned,
    {
        let endpoint = append_query(endpoint, &to_query_string(query));
        self.request::<(), T>(ctx, None, Method::Get, &endpoint, OK)
            .await
    }

    /// `POST endpoint` with a JSON body, accepting `200 OK` or `201 Created`.
    ///
    /// # Errors
    ///
    /// See [`RdStationClient::request`].
    pub async fn post<B, T>(&self, ctx: &CallContext, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(ctx, Some(body), Method::Post, endpoint, OK_OR_CREATED)
            .await
    }

    /// `PUT endpoint` with a JSON body, accepting `200 OK`.
    ///
    /// # Errors
    ///
    /// See [`RdStationClient::request`].
    pub async fn put<B, T>(&self, ctx: &CallContext, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(ctx, Some(body), Method::Put, endpoint, OK)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let client = RdStationClient::new("very-secret").expect("client");
        let debug = format!("{client:?}");
        assert!(debug.contains("crm.rdstation.com"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(RdStationClient::new("").is_err());
    }
}
