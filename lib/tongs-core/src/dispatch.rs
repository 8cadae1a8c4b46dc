//! Response dispatch.
//!
//! [`resolve`] offers a response to each caller parser in order, then to the
//! [`FALLBACK_PARSERS`]. The first parser whose content type and status both
//! match receives the body; the others only look at headers.

use tracing::{debug, trace};

use crate::{
    Error, Parser, Response, ResponseError, Result, StatusSpec, parse_media_type,
    parsers::{decode_discard, decode_json_echo, decode_text_echo},
};

/// Parsers tried after every caller parser rejected the response.
///
/// JSON and plain-text error bodies are echoed into the error; anything else
/// is discarded. Every fallback reports an error.
pub const FALLBACK_PARSERS: [Parser<'static>; 3] = [
    Parser::from_fn(
        "application/json",
        StatusSpec::ClientOrServerError,
        true,
        decode_json_echo,
    ),
    Parser::from_fn(
        "text/plain",
        StatusSpec::ClientOrServerError,
        true,
        decode_text_echo,
    ),
    Parser::from_fn("", StatusSpec::Any, true, decode_discard),
];

/// Outcome of offering a response to one parser.
#[derive(Debug)]
pub enum Match {
    /// The parser matched and consumed the response.
    Accepted(Result<()>),
    /// The parser did not match; the response comes back untouched.
    Rejected {
        /// The response, body unread.
        response: Response,
        /// Why it was rejected.
        error: Error,
    },
}

/// Offer `response` to a single parser.
///
/// A missing or empty `Content-Type` is treated as an empty media type, which
/// only wildcard parsers accept. A malformed one rejects with
/// [`Error::ContentType`].
///
/// # Panics
///
/// If the response status is outside `100..=599` (see [`StatusSpec::matches`]).
pub fn try_match(response: Response, parser: &mut Parser<'_>) -> Match {
    let header = response.content_type();
    let media_type = if header.trim().is_empty() {
        String::new()
    } else {
        match parse_media_type(&header) {
            Some(media_type) => media_type,
            None => {
                return Match::Rejected {
                    response,
                    error: Error::ContentType(header),
                };
            }
        }
    };

    let status = response.status();
    let content_type_ok = parser.accepts_content_type(&media_type);
    let status_ok = parser.status_spec().matches(status);

    if !content_type_ok || !status_ok {
        let error = ResponseError {
            status,
            content_type: media_type,
            wanted_content_type: parser.wanted_content_type().to_owned(),
            content_type_ok,
            body: None,
            decode_error: None,
        };
        return Match::Rejected {
            response,
            error: error.into(),
        };
    }

    let decoded = parser.decode(response);
    if parser.returns_error() || decoded.error.is_some() {
        Match::Accepted(Err(ResponseError {
            status,
            content_type: media_type,
            wanted_content_type: parser.wanted_content_type().to_owned(),
            content_type_ok: true,
            body: decoded.body,
            decode_error: decoded.error,
        }
        .into()))
    } else {
        Match::Accepted(Ok(()))
    }
}

/// Hand `response` to the first matching parser.
///
/// Caller parsers are tried in order, then [`FALLBACK_PARSERS`]. The first
/// rejection is kept; if only the catch-all fallback matches, that rejection
/// is returned instead of the catch-all's own error, since it says what the
/// caller actually wanted.
///
/// The body is always closed before returning, except when a
/// [`crate::parsers::raw`] parser took it.
pub fn resolve(response: Response, parsers: &mut [Parser<'_>]) -> Result<()> {
    let status = response.status();
    let mut response = response;
    let mut first_error: Option<Error> = None;

    for (index, parser) in parsers.iter_mut().enumerate() {
        match try_match(response, parser) {
            Match::Accepted(result) => {
                debug!(status, index, ok = result.is_ok(), "response matched parser");
                return result;
            }
            Match::Rejected {
                response: returned,
                error,
            } => {
                trace!(status, index, %error, "parser rejected response");
                if first_error.is_none() {
                    first_error = Some(error);
                }
                response = returned;
            }
        }
    }

    let catch_all = FALLBACK_PARSERS.len() - 1;
    let mut last_rejection = None;
    for (index, mut parser) in FALLBACK_PARSERS.into_iter().enumerate() {
        match try_match(response, &mut parser) {
            Match::Accepted(Err(err)) if index == catch_all => {
                debug!(status, "no parser matched response, body discarded");
                return Err(first_error.unwrap_or(err));
            }
            Match::Accepted(result) => {
                debug!(status, fallback = index, "response matched fallback parser");
                return result;
            }
            Match::Rejected {
                response: returned,
                error,
            } => {
                response = returned;
                last_rejection = Some(error);
            }
        }
    }

    // Every parser rejected; only a malformed Content-Type gets here.
    debug!(status, "unparseable Content-Type, body discarded");
    drop(response);
    first_error.or(last_rejection).map_or(Ok(()), Err)
}
