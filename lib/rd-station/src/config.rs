//! Client configuration types.

use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Default RD Station CRM API base URL.
pub const DEFAULT_BASE_URL: &str = "https://crm.rdstation.com/api/v1";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "RD_STATION_TOKEN";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "RD_STATION_BASE_URL";

/// Configuration for [`crate::RdStationClient`].
///
/// The token is never printed by the `Debug` implementation.
#[derive(Clone)]
pub struct ClientConfig {
    /// API base URL, such as `https://crm.rdstation.com/api/v1`.
    pub base_url: Url,
    /// API token, sent as the `token` query parameter.
    pub token: String,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"***")
            .field("pool_idle_per_host", &self.pool_idle_per_host)
            .field("pool_idle_timeout", &self.pool_idle_timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Configuration for `token` against the default base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder().token(token).build()
    }

    /// Read the configuration from `RD_STATION_TOKEN` and the optional
    /// `RD_STATION_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the token is missing or empty, and
    /// [`Error::InvalidUrl`] if the base URL does not parse.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| Error::invalid_input(format!("{TOKEN_ENV} is not set")))?;

        let mut builder = Self::builder().token(token);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Clone, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    token: Option<String>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl std::fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("pool_idle_per_host", &self.pool_idle_per_host)
            .field("pool_idle_timeout", &self.pool_idle_timeout)
            .finish()
    }
}

impl ClientConfigBuilder {
    /// Set the API base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API token.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the token is missing or empty, and
    /// [`Error::InvalidUrl`] if the base URL does not parse.
    pub fn build(self) -> Result<ClientConfig> {
        let token = self.token.unwrap_or_default();
        if token.is_empty() {
            return Err(Error::invalid_input("API token must not be empty"));
        }

        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let pool = PoolConfig::default();

        Ok(ClientConfig {
            base_url,
            token,
            pool_idle_per_host: self.pool_idle_per_host.unwrap_or(pool.idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(pool.idle_timeout),
        })
    }
}

/// Connection pool settings of the HTTP transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum idle connections per host.
    pub idle_per_host: usize,
    /// Idle connection timeout.
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            idle_per_host: 32,
            idle_timeout: Duration::from_secs(90),
        }
    }
}

impl From<&ClientConfig> for PoolConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            idle_per_host: config.pool_idle_per_host,
            idle_timeout: config.pool_idle_timeout,
        }
    }
}
