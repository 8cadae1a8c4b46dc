//! Basic authentication.
//!
//! Adds an `Authorization: Basic <base64(user:pass)>` header to every request.

use std::sync::Arc;

use http::header::AUTHORIZATION;

use crate::{HttpClient, Request, Response, Result, basic_auth_value};

/// Client decorator that adds basic authentication to requests.
///
/// An `Authorization` header already on the request is replaced.
#[derive(Debug, Clone)]
pub struct BasicAuth<C> {
    inner: C,
    header_value: Arc<str>,
}

impl<C> BasicAuth<C> {
    /// Wrap `inner`, authenticating as `username`.
    pub fn new(inner: C, username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        Self {
            inner,
            header_value: Arc::from(basic_auth_value(username.as_ref(), password.as_ref())),
        }
    }
}

impl<C: HttpClient> HttpClient for BasicAuth<C> {
    fn execute(&self, mut request: Request) -> Result<Response> {
        request.set_header(AUTHORIZATION.as_str(), &*self.header_value);
        self.inner.execute(request)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use http::HeaderMap;
    use tongs_core::Method;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Option<Request>>);

    impl HttpClient for Recorder {
        fn execute(&self, request: Request) -> Result<Response> {
            *self.0.lock().expect("lock") = Some(request);
            Ok(Response::new(204, HeaderMap::new(), ""))
        }
    }

    #[test]
    fn basic_auth_encodes_correctly() {
        let auth = BasicAuth::new(Recorder::default(), "user", "pass");
        assert_eq!(&*auth.header_value, "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn replaces_existing_authorization() {
        let auth = BasicAuth::new(Recorder::default(), "user", "pass");
        let request = Request::builder(Method::Get, "http://localhost/".parse().expect("url"))
            .header("authorization", "Bearer stale")
            .build();

        auth.execute(request).expect("response");

        let recorded = auth.inner.0.lock().expect("lock").take().expect("request");
        assert_eq!(recorded.headers().len(), 1);
        assert_eq!(recorded.header("Authorization"), Some("Basic dXNlcjpwYXNz"));
    }
}
