//! HTTP request building.
//!
//! Use [`Request::builder`] or one of the `make_*` helpers to construct
//! requests with headers, query parameters, and bodies.
//!
//! # Example
//!
//! ```
//! use tongs_core::{Method, Request};
//!
//! let request = Request::builder(Method::Get, "https://api.example.com".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .query("page", "1")
//!     .build();
//! assert_eq!(request.header("accept"), Some("application/json"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::{ContentType, Method, basic_auth_value};

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// Reassemble a request from its parts.
    #[must_use]
    pub fn from_parts(
        method: Method,
        url: url::Url,
        headers: HashMap<String, String>,
        body: Option<Bytes>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name).map(|(_, value)| value.as_str())
    }

    /// Set a header, replacing any value under the same name in any case.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        insert_header(&mut self.headers, name.into(), value.into());
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any value under the same name in any case.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert_header(&mut self.headers, name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            insert_header(&mut self.headers, name.into(), value.into());
        }
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Appends multiple query parameters to the URL.
    #[must_use]
    pub fn query_pairs<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        {
            let mut query = self.url.query_pairs_mut();
            for (name, value) in pairs {
                query.append_pair(name.as_ref(), value.as_ref());
            }
        }
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body.
    ///
    /// `Content-Type` is set to `application/json` unless already present.
    pub fn json<T: serde::Serialize + ?Sized>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self.default_content_type(ContentType::Json).body(body))
    }

    /// Set a form-urlencoded body.
    ///
    /// `Content-Type` is set to `application/x-www-form-urlencoded` unless
    /// already present.
    pub fn form<T: serde::Serialize + ?Sized>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_form(value)?;
        Ok(self
            .default_content_type(ContentType::FormUrlEncoded)
            .body(body))
    }

    /// Set an `Authorization` header for HTTP Basic authentication.
    #[must_use]
    pub fn basic_auth(self, username: &str, password: &str) -> Self {
        self.header(AUTHORIZATION.as_str(), basic_auth_value(username, password))
    }

    fn default_content_type(mut self, content_type: ContentType) -> Self {
        if find_header(&self.headers, CONTENT_TYPE.as_str()).is_none() {
            self.headers
                .insert("Content-Type".to_string(), content_type.as_str().to_string());
        }
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

fn find_header<'a>(
    headers: &'a HashMap<String, String>,
    name: &str,
) -> Option<(&'a String, &'a String)> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
}

fn insert_header(headers: &mut HashMap<String, String>, name: String, value: String) {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
    headers.insert(name, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> url::Url {
        url::Url::parse("https://api.example.com/users").expect("valid URL")
    }

    #[test]
    fn request_builder_basic() {
        let request = Request::builder(Method::Get, base())
            .header("Accept", "application/json")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url().as_str(), "https://api.example.com/users");
        assert_eq!(request.header("accept"), Some("application/json"));
        assert!(request.body().is_none());
    }

    #[test]
    fn headers_replace_case_insensitively() {
        let request = Request::builder(Method::Get, base())
            .header("x-token", "a")
            .headers([("X-Token", "b")])
            .build();

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("X-TOKEN"), Some("b"));
    }

    #[test]
    fn request_builder_with_query() {
        let request = Request::builder(Method::Get, base())
            .query("page", "1")
            .query_pairs([("limit", "10")])
            .build();

        assert_eq!(
            request.url().as_str(),
            "https://api.example.com/users?page=1&limit=10"
        );
    }

    #[test]
    fn json_sets_content_type() {
        #[derive(serde::Serialize)]
        struct User {
            name: String,
        }

        let request = Request::builder(Method::Post, base())
            .json(&User {
                name: "test".to_string(),
            })
            .expect("json")
            .build();

        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(
            request.body().map(Bytes::as_ref),
            Some(br#"{"name":"test"}"#.as_slice())
        );
    }

    #[test]
    fn body_helpers_keep_existing_content_type() {
        let request = Request::builder(Method::Put, base())
            .header("content-type", "application/vnd.api+json")
            .json(&serde_json::json!({"a": 1}))
            .expect("json")
            .build();
        assert_eq!(request.header("Content-Type"), Some("application/vnd.api+json"));
        assert_eq!(request.headers().len(), 1);

        let request = Request::builder(Method::Post, base())
            .header("Content-Type", "text/plain")
            .form(&[("a", "1")])
            .expect("form")
            .build();
        assert_eq!(request.header("content-type"), Some("text/plain"));
    }

    #[test]
    fn form_body() {
        let request = Request::builder(Method::Post, base())
            .form(&[("name", "a b"), ("tag", "x")])
            .expect("form")
            .build();

        assert_eq!(
            request.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            request.body().map(Bytes::as_ref),
            Some(b"name=a+b&tag=x".as_slice())
        );
    }

    #[test]
    fn basic_auth_header() {
        let request = Request::builder(Method::Get, base())
            .basic_auth("Aladdin", "open sesame")
            .build();

        assert_eq!(
            request.header("Authorization"),
            Some("Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==")
        );
    }

    #[test]
    fn parts_round_trip() {
        let mut request = Request::builder(Method::Delete, base()).body("x").build();
        request.set_header("X-Trace", "1");
        let (method, url, headers, body) = request.into_parts();
        let request = Request::from_parts(method, url, headers, body);

        assert_eq!(request.method(), Method::Delete);
        assert_eq!(request.header("x-trace"), Some("1"));
        assert_eq!(request.body().map(Bytes::as_ref), Some(b"x".as_slice()));
    }
}
