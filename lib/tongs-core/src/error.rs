//! Error types for tongs.
//!
//! Every outcome of response dispatch, whether a predicate mismatch, a decode
//! failure, or a forced error, is reported as one [`ResponseError`]. Callers can
//! inspect status, content types, the echoed body and the decode error without
//! matching on error subtypes.

use std::fmt;

use bytes::Bytes;
use derive_more::{Display, Error, From};

use crate::Method;

// ============================================================================
// Echoed Body
// ============================================================================

/// Body value echoed by a decoder for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Decoded JSON document.
    Json(serde_json::Value),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Bytes(Bytes),
}

impl ResponseBody {
    /// The JSON document, if this is a JSON echo.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The text, if this is a text echo.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The raw bytes, if this is a bytes echo.
    #[must_use]
    pub const fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(serde_json::Value::String(text)) | Self::Text(text) => f.write_str(text),
            Self::Json(value) => write!(f, "{value}"),
            Self::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

// ============================================================================
// Decode Error
// ============================================================================

/// A response body could not be decoded into the expected shape.
#[derive(Debug, Display, Error)]
pub enum DecodeError {
    /// JSON syntax or shape error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    Json {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// Body is not valid UTF-8.
    #[display("invalid UTF-8 sequence encountered")]
    InvalidUtf8,

    /// Reading the body stream failed.
    #[display("error reading body: {_0}")]
    Read(std::io::Error),

    /// Error reported by a custom decoder.
    #[display("{_0}")]
    Custom(#[error(not(source))] String),
}

impl DecodeError {
    /// Create a JSON error with path context.
    #[must_use]
    pub fn json(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Json {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a custom decode error.
    #[must_use]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

// ============================================================================
// Response Error
// ============================================================================

/// Structured outcome of matching and decoding a response.
///
/// Produced when a parser rejects the response, when its decoder fails, or
/// when it was configured to report an error regardless.
#[derive(Debug)]
pub struct ResponseError {
    /// HTTP status code.
    pub status: u16,
    /// Media type of the response, without parameters.
    pub content_type: String,
    /// Media type the parser wanted; empty means any.
    pub wanted_content_type: String,
    /// Whether the content type was accepted.
    pub content_type_ok: bool,
    /// Body echoed by the decoder, if it ran.
    pub body: Option<ResponseBody>,
    /// Decoding failure, if any.
    pub decode_error: Option<DecodeError>,
}

impl ResponseError {
    /// Returns `true` for 4xx statuses.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Returns `true` for 5xx statuses.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Deserialize the echoed JSON body into `T`.
    ///
    /// Returns `None` if there is no JSON echo.
    ///
    /// # Example
    ///
    /// ```ignore
    /// #[derive(Debug, Deserialize)]
    /// struct ApiError {
    ///     code: String,
    /// }
    ///
    /// if let Some(Ok(api_error)) = err.response_error().and_then(|e| e.decode_body::<ApiError>()) {
    ///     println!("API error {}", api_error.code);
    /// }
    /// ```
    pub fn decode_body<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Option<std::result::Result<T, DecodeError>> {
        let value = self.body.as_ref()?.as_json()?;
        Some(
            serde_path_to_error::deserialize(value)
                .map_err(|e| DecodeError::json(e.path().to_string(), e.inner().to_string())),
        )
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            status,
            content_type,
            wanted_content_type,
            ..
        } = self;

        if self.content_type_ok {
            match (&self.decode_error, &self.body) {
                (Some(err), _) => {
                    write!(f, "HTTP {status}, error decoding {content_type} response: {err}")
                }
                (None, Some(body)) => write!(f, "HTTP {status}, {content_type} response: {body}"),
                (None, None) => write!(f, "HTTP {status}, {content_type} response"),
            }
        } else {
            match (&self.decode_error, &self.body) {
                (Some(err), _) => write!(
                    f,
                    "HTTP {status}, unexpected response of type {content_type}, wanted {wanted_content_type}; error decoding response body: {err}"
                ),
                (None, Some(body)) => write!(
                    f,
                    "HTTP {status}, unexpected response of type {content_type}, wanted {wanted_content_type}: {body}"
                ),
                (None, None) => write!(
                    f,
                    "HTTP {status}, unexpected response type {content_type}, wanted {wanted_content_type}"
                ),
            }
        }
    }
}

impl std::error::Error for ResponseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.decode_error
            .as_ref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for tongs operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// I/O error outside of body decoding.
    #[display("I/O error: {_0}")]
    #[from]
    Io(std::io::Error),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// The response `Content-Type` header could not be parsed.
    #[display("cannot parse Content-Type string {_0}")]
    #[from(skip)]
    ContentType(#[error(not(source))] String),

    /// A parser rejected the response, failed to decode it, or was told to
    /// report an error.
    #[display("{_0}")]
    #[from]
    Response(Box<ResponseError>),

    /// Error annotated with the request it belongs to.
    #[display("{}", format_request(method, path, source))]
    #[from(skip)]
    Request {
        /// Request method.
        method: Method,
        /// Request URL path.
        path: String,
        /// Underlying failure.
        source: Box<Error>,
    },
}

fn format_request(method: &Method, path: &str, source: &Error) -> String {
    if path.is_empty() {
        format!("{method}: {source}")
    } else {
        format!("{method} {path}: {source}")
    }
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl From<ResponseError> for Error {
    fn from(err: ResponseError) -> Self {
        Self::Response(Box::new(err))
    }
}

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Annotate this error with the request method and path.
    #[must_use]
    pub fn in_request(self, method: Method, path: impl Into<String>) -> Self {
        Self::Request {
            method,
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The structured response outcome, looking through a request annotation.
    #[must_use]
    pub fn response_error(&self) -> Option<&ResponseError> {
        let err = match self {
            Self::Request { source, .. } => source,
            other => other,
        };
        match err {
            Self::Response(response) => Some(response),
            _ => None,
        }
    }

    /// HTTP status of the response outcome, or `0` if this error has none
    /// (e.g. a transport failure).
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.response_error().map_or(0, |err| err.status)
    }

    /// Returns `true` if the response outcome has a 4xx status.
    #[must_use]
    pub fn is_4xx(&self) -> bool {
        self.response_error()
            .is_some_and(ResponseError::is_client_error)
    }

    /// Returns `true` if the response outcome has a 5xx status.
    #[must_use]
    pub fn is_5xx(&self) -> bool {
        self.response_error()
            .is_some_and(ResponseError::is_server_error)
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self.without_request(), Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self.without_request(), Self::Connection(_))
    }

    fn without_request(&self) -> &Self {
        match self {
            Self::Request { source, .. } => source,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    fn mismatch() -> ResponseError {
        ResponseError {
            status: 200,
            content_type: "text/plain".to_string(),
            wanted_content_type: "application/json".to_string(),
            content_type_ok: false,
            body: None,
            decode_error: None,
        }
    }

    fn forced(status: u16, body: ResponseBody) -> ResponseError {
        ResponseError {
            status,
            content_type: "application/json".to_string(),
            wanted_content_type: "application/json".to_string(),
            content_type_ok: true,
            body: Some(body),
            decode_error: None,
        }
    }

    #[test]
    fn response_error_messages() {
        insta::assert_snapshot!(
            mismatch().to_string(),
            @"HTTP 200, unexpected response type text/plain, wanted application/json"
        );

        insta::assert_snapshot!(
            forced(400, ResponseBody::Json(json!({"foo": 42}))).to_string(),
            @r#"HTTP 400, application/json response: {"foo":42}"#
        );

        let err = ResponseError {
            decode_error: Some(DecodeError::InvalidUtf8),
            body: None,
            ..forced(200, ResponseBody::Text(String::new()))
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"HTTP 200, error decoding application/json response: invalid UTF-8 sequence encountered"
        );

        let err = ResponseError {
            body: None,
            ..forced(500, ResponseBody::Text(String::new()))
        };
        assert_eq!(err.to_string(), "HTTP 500, application/json response");
    }

    #[test]
    fn mismatch_messages_with_body() {
        let err = ResponseError {
            body: Some(ResponseBody::Text("oops".to_string())),
            ..mismatch()
        };
        assert_eq!(
            err.to_string(),
            "HTTP 200, unexpected response of type text/plain, wanted application/json: oops"
        );

        let err = ResponseError {
            decode_error: Some(DecodeError::custom("bad")),
            ..mismatch()
        };
        assert_eq!(
            err.to_string(),
            "HTTP 200, unexpected response of type text/plain, wanted application/json; error decoding response body: bad"
        );
    }

    #[test]
    fn echoed_body_display() {
        assert_eq!(ResponseBody::Text("foo".to_string()).to_string(), "foo");
        assert_eq!(ResponseBody::Json(json!("foo")).to_string(), "foo");
        assert_eq!(ResponseBody::Json(json!([1, 2])).to_string(), "[1,2]");
        assert_eq!(
            ResponseBody::Bytes(Bytes::from_static(b"abc")).to_string(),
            "<3 bytes>"
        );
    }

    #[test]
    fn request_wrapper_display() {
        let err = Error::from(mismatch()).in_request(Method::Get, "/users/1");
        assert_eq!(
            err.to_string(),
            "GET /users/1: HTTP 200, unexpected response type text/plain, wanted application/json"
        );

        let err = Error::Timeout.in_request(Method::Post, "");
        assert_eq!(err.to_string(), "POST: request timeout");
    }

    #[test]
    fn content_type_error_display() {
        let err = Error::ContentType("text/".to_string());
        assert_eq!(err.to_string(), "cannot parse Content-Type string text/");
    }

    #[test]
    fn inspection_through_wrapper() {
        let err = Error::from(forced(404, ResponseBody::Json(json!(null))))
            .in_request(Method::Get, "/missing");
        check!(err.status_code() == 404);
        check!(err.is_4xx());
        check!(!err.is_5xx());

        let err = Error::from(forced(503, ResponseBody::Json(json!(null))));
        check!(err.status_code() == 503);
        check!(err.is_5xx());
        check!(!err.is_4xx());
    }

    #[test]
    fn inspection_of_transport_errors_is_neutral() {
        let err = Error::connection("refused").in_request(Method::Get, "/");
        check!(err.status_code() == 0);
        check!(!err.is_4xx());
        check!(!err.is_5xx());
        check!(err.response_error().is_none());
        check!(err.is_connection());
        check!(!err.is_timeout());
        check!(Error::Timeout.is_timeout());
    }

    #[test]
    fn decode_echoed_body() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct ApiError {
            error: String,
        }

        let err = forced(404, ResponseBody::Json(json!({"error": "not found"})));
        let_assert!(Some(Ok(decoded)) = err.decode_body::<ApiError>());
        check!(
            decoded
                == ApiError {
                    error: "not found".to_string()
                }
        );

        let err = forced(404, ResponseBody::Json(json!({"code": 1})));
        let_assert!(Some(Err(DecodeError::Json { message, .. })) = err.decode_body::<ApiError>());
        check!(message.contains("error"));

        let err = forced(404, ResponseBody::Text("nope".to_string()));
        check!(err.decode_body::<ApiError>().is_none());
    }

    #[test]
    fn response_error_source_is_decode_error() {
        use std::error::Error as _;

        let err = ResponseError {
            decode_error: Some(DecodeError::InvalidUtf8),
            ..mismatch()
        };
        check!(err.source().is_some());
        check!(mismatch().source().is_none());
    }
}
