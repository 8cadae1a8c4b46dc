//! Request/response logging.
//!
//! Logs each exchange with the `tracing` crate inside an `http_request` span.

use std::time::Instant;

use tracing::{Level, debug, info, span, warn};

use crate::{HttpClient, Request, Response, Result};

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (request/response details).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

/// Client decorator that logs requests and responses.
///
/// # Example
///
/// ```no_run
/// use tongs::{HyperClient, middleware::Logging};
///
/// let client = Logging::new(HyperClient::new()?);
/// # Ok::<(), tongs::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Logging<C> {
    inner: C,
    level: LogLevel,
}

impl<C> Logging<C> {
    /// Log summaries at info level.
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }

    /// Log details, including request and response headers, at debug level.
    #[must_use]
    pub const fn debug(inner: C) -> Self {
        Self {
            inner,
            level: LogLevel::Debug,
        }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// The wrapped client.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: HttpClient> HttpClient for Logging<C> {
    fn execute(&self, request: Request) -> Result<Response> {
        let method = request.method();
        let url = request.url().to_string();

        let span = span!(Level::INFO, "http_request", %method, %url);
        let _entered = span.enter();
        let start = Instant::now();

        match self.level {
            LogLevel::Debug => {
                debug!(headers = ?request.headers(), "sending request");
            }
            LogLevel::Info => {
                info!("sending request");
            }
        }

        let result = self.inner.execute(request);
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &result {
            Ok(response) => {
                let status = response.status();
                if response.is_success() {
                    info!(status, elapsed_ms, "request completed");
                } else {
                    warn!(status, elapsed_ms, "request completed with HTTP error status");
                }
                if self.level == LogLevel::Debug {
                    debug!(headers = ?response.headers(), "response headers");
                }
            }
            Err(err) => {
                warn!(error = %err, elapsed_ms, "request failed");
            }
        }

        result
    }
}
