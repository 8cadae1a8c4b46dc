//! Request construction shortcuts.
//!
//! `base` and `path` are joined into a URL; either may be empty, but not both.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::{Method, RequestBuilder, Result};

/// Characters escaped in query keys and values. Spaces become `%20`.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Join `base` and `path` and set the query string from `params`.
///
/// A leading `/` is added to `path` when missing and a trailing `/` on the
/// base path is dropped, so `"https://h/api/"` and `"users"` give
/// `https://h/api/users`. Non-empty `params` replace any existing query; they
/// are sorted by key (stable for repeated keys) and percent-encoded.
///
/// ```
/// use tongs_core::url;
///
/// let url = url("https://example.com/api", "search", &[("q", "a b"), ("lang", "en")]).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/api/search?lang=en&q=a%20b");
/// ```
pub fn url(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url> {
    let mut url = if base.is_empty() {
        Url::parse(path)?
    } else {
        let mut url = Url::parse(base)?;
        if !path.is_empty() {
            let path = path.strip_prefix('/').unwrap_or(path);
            let joined = format!("{}/{path}", url.path().trim_end_matches('/'));
            url.set_path(&joined);
        }
        url
    };

    if !params.is_empty() {
        url.set_query(Some(&encode_query(params)));
    }

    Ok(url)
}

fn encode_query(params: &[(&str, &str)]) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by_key(|(key, _)| *key);
    sorted
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_ENCODE_SET),
                utf8_percent_encode(value, QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// A GET request.
pub fn make_get(base: &str, path: &str, params: &[(&str, &str)]) -> Result<RequestBuilder> {
    Ok(RequestBuilder::new(Method::Get, url(base, path, params)?))
}

/// A request whose body is `form`, URL-encoded.
pub fn make_form<T: serde::Serialize + ?Sized>(
    method: Method,
    base: &str,
    path: &str,
    form: &T,
) -> Result<RequestBuilder> {
    RequestBuilder::new(method, url(base, path, &[])?).form(form)
}

/// A request whose body is `value`, encoded as JSON.
pub fn make_json<T: serde::Serialize + ?Sized>(
    method: Method,
    base: &str,
    path: &str,
    params: &[(&str, &str)],
    value: &T,
) -> Result<RequestBuilder> {
    RequestBuilder::new(method, url(base, path, params)?).json(value)
}

/// A request with a raw body.
pub fn make(
    method: Method,
    base: &str,
    path: &str,
    params: &[(&str, &str)],
    body: impl Into<Bytes>,
) -> Result<RequestBuilder> {
    Ok(RequestBuilder::new(method, url(base, path, params)?).body(body))
}

/// `Authorization` header value for HTTP Basic authentication.
///
/// ```
/// assert_eq!(
///     tongs_core::basic_auth_value("Aladdin", "open sesame"),
///     "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
/// );
/// ```
#[must_use]
pub fn basic_auth_value(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::Error;

    #[test]
    fn joins_base_and_path() {
        let cases = [
            ("https://h.example", "users", "https://h.example/users"),
            ("https://h.example/", "/users", "https://h.example/users"),
            ("https://h.example/api", "v1/users", "https://h.example/api/v1/users"),
            ("https://h.example/api/", "users", "https://h.example/api/users"),
            ("https://h.example/api", "", "https://h.example/api"),
            ("", "https://h.example/only", "https://h.example/only"),
        ];
        for (base, path, expected) in cases {
            let url = url(base, path, &[]).expect("url");
            check!(url.as_str() == expected, "{base} + {path}");
        }
    }

    #[test]
    fn params_replace_query_sorted() {
        let url = url(
            "https://h.example/search?old=1",
            "",
            &[("q", "rust lang"), ("a", "x&y"), ("q", "second")],
        )
        .expect("url");

        insta::assert_snapshot!(
            url.as_str(),
            @"https://h.example/search?a=x%26y&q=rust%20lang&q=second"
        );
    }

    #[test]
    fn empty_params_keep_query() {
        let url = url("https://h.example/search?keep=1", "", &[]).expect("url");
        check!(url.query() == Some("keep=1"));
    }

    #[test]
    fn unreserved_characters_are_kept() {
        let url = url("https://h.example", "", &[("k", "a-b_c.d~e/f")]).expect("url");
        check!(url.query() == Some("k=a-b_c.d~e%2Ff"));
    }

    #[test]
    fn invalid_url_is_an_error() {
        let_assert!(Err(Error::InvalidUrl(_)) = url("", "not a url", &[]));
        let_assert!(Err(Error::InvalidUrl(_)) = url("::", "users", &[]));
    }

    #[test]
    fn make_helpers() {
        let request = make_get("https://h.example", "users", &[("page", "2")])
            .expect("get")
            .build();
        check!(request.method() == Method::Get);
        check!(request.url().as_str() == "https://h.example/users?page=2");

        let request = make_form(Method::Put, "https://h.example", "users/1", &[("name", "Bob")])
            .expect("form")
            .build();
        check!(request.url().query().is_none());
        check!(request.header("content-type") == Some("application/x-www-form-urlencoded"));
        check!(request.body().map(Bytes::as_ref) == Some(b"name=Bob".as_slice()));

        let request = make_json(
            Method::Post,
            "https://h.example",
            "users",
            &[("dry_run", "true")],
            &serde_json::json!({"name": "Bob"}),
        )
        .expect("json")
        .build();
        check!(request.url().query() == Some("dry_run=true"));
        check!(request.header("Content-Type") == Some("application/json"));

        let request = make(Method::Patch, "https://h.example", "blob", &[], "raw")
            .expect("make")
            .build();
        check!(request.header("Content-Type").is_none());
        check!(request.body().map(Bytes::as_ref) == Some(b"raw".as_slice()));
    }

    #[test]
    fn basic_auth() {
        check!(basic_auth_value("user", "pass") == "Basic dXNlcjpwYXNz");
        check!(basic_auth_value("", "") == "Basic Og==");
    }
}
