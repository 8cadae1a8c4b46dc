//! HTTP client traits.
//!
//! - [`HttpClient`] - executes one request, the only thing a transport must provide
//! - [`HttpClientExt`] - execute and dispatch the response to parsers in one call
//!
//! Implement [`HttpClient`] for custom transports, decorators, or test doubles.

use std::sync::Arc;

use tracing::trace;

use crate::{Method, Parser, Request, RequestBuilder, Response, Result, make_get, resolve, url};

/// Core HTTP client trait.
///
/// Implementations are synchronous: `execute` returns once the status and
/// headers are available and the body can be read.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request
    fn execute(&self, request: Request) -> Result<Response>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn execute(&self, request: Request) -> Result<Response> {
        (**self).execute(request)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for Box<C> {
    fn execute(&self, request: Request) -> Result<Response> {
        (**self).execute(request)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    fn execute(&self, request: Request) -> Result<Response> {
        (**self).execute(request)
    }
}

/// Execute `request` with `client` and hand the response to `parsers`.
///
/// Transport failures and parser outcomes are both annotated with the request
/// method and URL path, see [`crate::Error::Request`]. A root path is
/// reported as empty, so the message reads `GET: ...`.
pub fn perform<C>(request: Request, client: &C, parsers: &mut [Parser<'_>]) -> Result<()>
where
    C: HttpClient + ?Sized,
{
    let method = request.method();
    let path = match request.url().path() {
        "/" => String::new(),
        path => path.to_owned(),
    };
    trace!(%method, %path, "performing request");

    let response = client
        .execute(request)
        .map_err(|err| err.in_request(method, path.clone()))?;
    resolve(response, parsers).map_err(|err| err.in_request(method, path))
}

/// Extension trait for [`HttpClient`] with request-and-dispatch shortcuts.
pub trait HttpClientExt: HttpClient {
    /// Execute `request` and dispatch the response, see [`perform`].
    fn perform(&self, request: Request, parsers: &mut [Parser<'_>]) -> Result<()> {
        perform(request, self, parsers)
    }

    /// GET `base` + `path` with query `params`.
    fn get(
        &self,
        base: &str,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
        parsers: &mut [Parser<'_>],
    ) -> Result<()> {
        let request = make_get(base, path, params)?
            .headers(headers.iter().copied())
            .build();
        self.perform(request, parsers)
    }

    /// POST `params` as a URL-encoded form to `base` + `path`.
    fn post_form(
        &self,
        base: &str,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
        parsers: &mut [Parser<'_>],
    ) -> Result<()> {
        self.perform(form_request(Method::Post, base, path, params, headers)?, parsers)
    }

    /// PUT `params` as a URL-encoded form to `base` + `path`.
    fn put_form(
        &self,
        base: &str,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
        parsers: &mut [Parser<'_>],
    ) -> Result<()> {
        self.perform(form_request(Method::Put, base, path, params, headers)?, parsers)
    }
}

impl<T: HttpClient + ?Sized> HttpClientExt for T {}

fn form_request(
    method: Method,
    base: &str,
    path: &str,
    params: &[(&str, &str)],
    headers: &[(&str, &str)],
) -> Result<Request> {
    // Headers first, so a caller-supplied Content-Type survives `form`.
    Ok(RequestBuilder::new(method, url(base, path, &[])?)
        .headers(headers.iter().copied())
        .form(params)?
        .build())
}
