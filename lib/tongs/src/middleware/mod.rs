//! Client decorators.
//!
//! Middleware wraps any [`HttpClient`] and is itself an [`HttpClient`], so
//! decorators stack. The outermost decorator sees the request first.
//!
//! - [`Logging`] - logs requests/responses using `tracing`
//! - [`BasicAuth`] - adds `Authorization: Basic <base64>` header
//!
//! # Example
//!
//! ```no_run
//! use tongs::{HyperClient, middleware::MiddlewareExt};
//!
//! let client = HyperClient::new()?
//!     .with_basic_auth("user", "secret")
//!     .with_logging();
//! # Ok::<(), tongs::Error>(())
//! ```

mod basic_auth;
mod logging;

pub use basic_auth::BasicAuth;
pub use logging::{LogLevel, Logging};

use crate::HttpClient;

/// Wrap a client in middleware with method chaining.
pub trait MiddlewareExt: HttpClient + Sized {
    /// Log each exchange at info level.
    fn with_logging(self) -> Logging<Self> {
        Logging::new(self)
    }

    /// Log each exchange at debug level, headers included.
    fn with_debug_logging(self) -> Logging<Self> {
        Logging::debug(self)
    }

    /// Authenticate every request with HTTP Basic credentials.
    fn with_basic_auth(self, username: impl AsRef<str>, password: impl AsRef<str>) -> BasicAuth<Self> {
        BasicAuth::new(self, username, password)
    }
}

impl<C: HttpClient> MiddlewareExt for C {}
