//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::Key;
use camino::Utf8PathBuf;
use crudhub::domain::TokenLifetimes;
use crudhub::inbound::http::state::CookiePolicy;
use crudhub::outbound::persistence::DbPool;
use crudhub::outbound::security::SigningSecret;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Where file-backed adapters keep their data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub nlu_data_path: Utf8PathBuf,
    pub upload_root: Utf8PathBuf,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookies: CookiePolicy,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: StoragePaths,
    pub(crate) token_secret: SigningSecret,
    pub(crate) lifetimes: TokenLifetimes,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Configuration with in-memory repositories and default token lifetimes.
    #[must_use]
    pub fn new(
        key: Key,
        cookies: CookiePolicy,
        bind_addr: SocketAddr,
        storage: StoragePaths,
        token_secret: SigningSecret,
    ) -> Self {
        Self {
            key,
            cookies,
            bind_addr,
            storage,
            token_secret,
            lifetimes: TokenLifetimes::default(),
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Back the user, member, employee and intent repositories with PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_token_lifetimes(mut self, lifetimes: TokenLifetimes) -> Self {
        self.lifetimes = lifetimes;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
