//! Blocking HTTP client using hyper-util.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::header::USER_AGENT;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::{TokioExecutor, TokioTimer},
};
use tokio::runtime::Runtime;
use tracing::trace;

use crate::{
    Error, HttpClient, Request, Response, Result,
    config::{ClientConfig, ClientConfigBuilder},
    connector::https_connector,
};

type Inner = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Blocking HTTP client with connection pooling and TLS.
///
/// Requests run on a private single-threaded tokio runtime owned by the
/// client; clones share the runtime and the connection pool. The response
/// body is fully buffered before [`HttpClient::execute`] returns, so the
/// whole exchange is bounded by [`ClientConfig::timeout`].
///
/// # Panics
///
/// `execute` panics when called from inside an async task, like any nested
/// tokio `block_on`. Use `tokio::task::spawn_blocking` there.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use tongs::{HttpClientExt, HyperClient, parsers};
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(5))
///     .build()?;
///
/// let mut ip = String::new();
/// client.get("https://api.ipify.org", "", &[], &[], &mut [parsers::text(&mut ip)])?;
/// # Ok::<(), tongs::Error>(())
/// ```
#[derive(Clone)]
pub struct HyperClient {
    inner: Inner,
    runtime: Arc<Runtime>,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Create a new client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .enable_time()
            .build()?;

        let inner = Client::builder(TokioExecutor::new())
            .pool_timer(TokioTimer::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector(&config));

        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
            config,
        })
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn build_hyper_request(&self, request: Request) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(user_agent) = &self.config.user_agent
            && !headers.keys().any(|name| name.eq_ignore_ascii_case(USER_AGENT.as_str()))
        {
            builder = builder.header(USER_AGENT, user_agent.as_str());
        }

        builder
            .body(body.map_or_else(Full::default, Full::new))
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    async fn send(&self, request: http::Request<Full<Bytes>>) -> Result<Response> {
        let response = self
            .inner
            .request(request)
            .await
            .map_err(map_hyper_error)?;

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(Response::new(parts.status.as_u16(), parts.headers, body))
    }
}

impl HttpClient for HyperClient {
    fn execute(&self, request: Request) -> Result<Response> {
        let hyper_request = self.build_hyper_request(request)?;
        let timeout = self.config.timeout;

        trace!(
            method = %hyper_request.method(),
            uri = %hyper_request.uri(),
            "executing request"
        );
        self.runtime.block_on(async {
            tokio::time::timeout(timeout, self.send(hyper_request))
                .await
                .map_err(|_| Error::Timeout)?
        })
    }
}

#[allow(clippy::needless_pass_by_value)]
fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
    let msg = match std::error::Error::source(&err) {
        Some(source) => format!("{err}: {source}"),
        None => err.to_string(),
    };
    let lower = msg.to_ascii_lowercase();

    if lower.contains("tls") || lower.contains("certificate") || lower.contains("handshake") {
        return Error::tls(msg);
    }
    if lower.contains("timed out") {
        return Error::Timeout;
    }

    Error::connection(msg)
}

/// Builder for [`HyperClient`].
#[derive(Debug, Default)]
pub struct HyperClientBuilder {
    config: ClientConfigBuilder,
}

impl HyperClientBuilder {
    /// Set the whole-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Set the default `User-Agent`.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.user_agent(user_agent);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HyperClient> {
        HyperClient::with_config(self.config.build())
    }
}
