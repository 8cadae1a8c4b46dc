//! Ready-made parser factories.
//!
//! Slot-bound factories take `&mut` to the caller's output and return a
//! parser borrowing it. Slotless factories return `Parser<'static>`.
//!
//! Every body-reading parser closes the body when done, whether decoding
//! succeeds or not. [`raw`] is the exception: it hands the unread response to
//! the caller, who becomes responsible for it.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::{
    DecodeError, Decoded, Parser, Response, ResponseBody, StatusSpec, from_json,
    media_type::ContentType,
};

/// Decode a JSON body into `out`.
///
/// `T` is decoded straight from the body bytes. The document is also kept as
/// the echo so an error can show it; a body `T` accepts but a plain
/// [`serde_json::Value`] cannot represent is echoed as bytes.
///
/// ```
/// use tongs_core::{Response, parsers, resolve};
///
/// #[derive(serde::Deserialize, Default)]
/// struct User { name: String }
///
/// let response = Response::from_http(
///     http::Response::builder()
///         .header("Content-Type", "application/json")
///         .body(r#"{"name":"Alice"}"#)
///         .unwrap(),
/// );
///
/// let mut user = User::default();
/// resolve(response, &mut [parsers::json(&mut user)]).unwrap();
/// assert_eq!(user.name, "Alice");
/// ```
pub fn json<T: DeserializeOwned>(out: &mut T) -> Parser<'_> {
    Parser::new(ContentType::Json, move |response: Response| {
        let bytes = match response.bytes() {
            Ok(bytes) => bytes,
            Err(err) => return Decoded::failed(None, DecodeError::Read(err)),
        };
        let echo = from_json::<serde_json::Value>(&bytes).ok();
        match from_json::<T>(&bytes) {
            Ok(parsed) => {
                *out = parsed;
                Decoded::body(echo.map_or(ResponseBody::Bytes(bytes), ResponseBody::Json))
            }
            Err(err) => Decoded::failed(echo.map(ResponseBody::Json), err),
        }
    })
}

/// Decode a JSON body without storing it anywhere.
///
/// Useful with [`crate::return_error`] to turn an API error payload into an
/// error carrying the document.
#[must_use]
pub const fn json_echo() -> Parser<'static> {
    Parser::from_fn(
        ContentType::Json.as_str(),
        StatusSpec::SUCCESS,
        false,
        decode_json_echo,
    )
}

/// Read the whole body into `out`, whatever its content type.
pub fn bytes(out: &mut Bytes) -> Parser<'_> {
    Parser::new("", move |response: Response| match response.bytes() {
        Ok(bytes) => {
            *out = bytes.clone();
            Decoded::body(ResponseBody::Bytes(bytes))
        }
        Err(err) => Decoded::failed(None, DecodeError::Read(err)),
    })
}

/// Read the whole body into `out` as UTF-8 text, whatever its content type.
pub fn text(out: &mut String) -> Parser<'_> {
    Parser::new("", move |response| match read_text(response) {
        Ok(text) => {
            out.clone_from(&text);
            Decoded::body(ResponseBody::Text(text))
        }
        Err(decoded) => decoded,
    })
}

/// Read the body as UTF-8 text without storing it anywhere.
#[must_use]
pub const fn text_echo() -> Parser<'static> {
    Parser::from_fn("", StatusSpec::SUCCESS, false, decode_text_echo)
}

/// Hand the unread response to the caller.
///
/// The caller owns the body afterwards and closes it by dropping the response.
pub fn raw(out: &mut Option<Response>) -> Parser<'_> {
    Parser::new("", move |response| {
        *out = Some(response);
        Decoded::empty()
    })
}

/// Close the body without reading it.
#[must_use]
pub const fn discard() -> Parser<'static> {
    Parser::from_fn("", StatusSpec::SUCCESS, false, decode_discard)
}

// ============================================================================
// Decoders
// ============================================================================

pub(crate) fn decode_json_echo(response: Response) -> Decoded {
    match read_json(response) {
        Ok(value) => Decoded::body(ResponseBody::Json(value)),
        Err(decoded) => decoded,
    }
}

pub(crate) fn decode_text_echo(response: Response) -> Decoded {
    match read_text(response) {
        Ok(text) => Decoded::body(ResponseBody::Text(text)),
        Err(decoded) => decoded,
    }
}

pub(crate) fn decode_discard(response: Response) -> Decoded {
    drop(response);
    Decoded::empty()
}

fn read_json(response: Response) -> Result<serde_json::Value, Decoded> {
    let bytes = response
        .bytes()
        .map_err(|err| Decoded::failed(None, DecodeError::Read(err)))?;
    from_json(&bytes).map_err(|err| Decoded::failed(None, err))
}

fn read_text(response: Response) -> Result<String, Decoded> {
    let bytes = response
        .bytes()
        .map_err(|err| Decoded::failed(None, DecodeError::Read(err)))?;
    match std::str::from_utf8(&bytes) {
        Ok(text) => Ok(text.to_owned()),
        Err(_) => Err(Decoded::failed(
            Some(ResponseBody::Bytes(bytes)),
            DecodeError::InvalidUtf8,
        )),
    }
}
