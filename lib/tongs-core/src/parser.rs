//! Response parsers.
//!
//! A [`Parser`] pairs a content-type predicate and a [`StatusSpec`] with a body
//! decoder. Build one with a factory from [`crate::parsers`] or with
//! [`make_parser`], then adjust it with [`ParseOption`]s:
//!
//! ```
//! use tongs_core::{StatusSpec, parsers, return_error};
//!
//! let mut error_body = serde_json::Value::Null;
//! let parser = parsers::json(&mut error_body)
//!     .with(StatusSpec::ClientOrServerError)
//!     .with(return_error());
//! assert_eq!(parser.status_spec(), StatusSpec::ClientOrServerError);
//! assert!(parser.returns_error());
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::{DecodeError, Response, ResponseBody, StatusSpec, media_type::ContentType};

// ============================================================================
// Decoded
// ============================================================================

/// What a decoder produced: an echo of the body for error reporting and an
/// optional decode failure.
///
/// The typed value itself goes into the caller's output slot; this is only
/// what an error needs to show.
#[derive(Debug, Default)]
pub struct Decoded {
    /// Echoed body.
    pub body: Option<ResponseBody>,
    /// Decode failure.
    pub error: Option<DecodeError>,
}

impl Decoded {
    /// Nothing to report.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            body: None,
            error: None,
        }
    }

    /// Decoded successfully, echoing `body`.
    #[must_use]
    pub const fn body(body: ResponseBody) -> Self {
        Self {
            body: Some(body),
            error: None,
        }
    }

    /// Decoding failed.
    #[must_use]
    pub const fn failed(body: Option<ResponseBody>, error: DecodeError) -> Self {
        Self {
            body,
            error: Some(error),
        }
    }
}

// ============================================================================
// Options
// ============================================================================

/// Adjusts which responses a parser matches and whether it reports an error.
///
/// Options are applied in order; a later option on the same field wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOption {
    /// Match only this media type; empty matches any.
    ContentType(Cow<'static, str>),
    /// Match only statuses accepted by this spec.
    Status(StatusSpec),
    /// Report an error when the parser matches, after the body is handled.
    ReturnError,
}

impl From<StatusSpec> for ParseOption {
    fn from(status: StatusSpec) -> Self {
        Self::Status(status)
    }
}

impl From<ContentType> for ParseOption {
    fn from(content_type: ContentType) -> Self {
        Self::ContentType(content_type.into())
    }
}

/// Match only responses of the given media type; `""` matches any.
#[must_use]
pub fn content_type(content_type: impl Into<Cow<'static, str>>) -> ParseOption {
    ParseOption::ContentType(content_type.into())
}

/// Make the parser report an error whenever it matches.
#[must_use]
pub const fn return_error() -> ParseOption {
    ParseOption::ReturnError
}

// ============================================================================
// Parser
// ============================================================================

type DecodeFn<'a> = dyn FnMut(Response) -> Decoded + 'a;

pub(crate) enum Decoder<'a> {
    Static(fn(Response) -> Decoded),
    Boxed(Box<DecodeFn<'a>>),
}

/// Matches and handles a [`Response`].
///
/// The lifetime is that of the output slot the decoder writes into; slotless
/// parsers are `Parser<'static>`.
pub struct Parser<'a> {
    pub(crate) content_type: Cow<'static, str>,
    pub(crate) status: StatusSpec,
    pub(crate) return_error: bool,
    pub(crate) decoder: Decoder<'a>,
}

impl<'a> Parser<'a> {
    /// Create a parser matching `default_content_type` and 2xx statuses.
    pub fn new(
        default_content_type: impl Into<Cow<'static, str>>,
        decoder: impl FnMut(Response) -> Decoded + 'a,
    ) -> Self {
        Self {
            content_type: default_content_type.into(),
            status: StatusSpec::SUCCESS,
            return_error: false,
            decoder: Decoder::Boxed(Box::new(decoder)),
        }
    }

    /// Apply one option.
    #[must_use]
    pub fn with(mut self, option: impl Into<ParseOption>) -> Self {
        self.apply(option.into());
        self
    }

    /// Apply options in order.
    #[must_use]
    pub fn with_all(mut self, options: impl IntoIterator<Item = ParseOption>) -> Self {
        for option in options {
            self.apply(option);
        }
        self
    }

    fn apply(&mut self, option: ParseOption) {
        match option {
            ParseOption::ContentType(content_type) => self.content_type = content_type,
            ParseOption::Status(status) => self.status = status,
            ParseOption::ReturnError => self.return_error = true,
        }
    }

    /// Shorthand for `.with(content_type(..))`.
    #[must_use]
    pub fn content_type(self, content_type: impl Into<Cow<'static, str>>) -> Self {
        self.with(ParseOption::ContentType(content_type.into()))
    }

    /// Shorthand for `.with(status)`.
    #[must_use]
    pub fn status(self, status: StatusSpec) -> Self {
        self.with(status)
    }

    /// Shorthand for `.with(return_error())`.
    #[must_use]
    pub fn return_error(self) -> Self {
        self.with(ParseOption::ReturnError)
    }

    /// Media type this parser wants; empty means any.
    #[must_use]
    pub fn wanted_content_type(&self) -> &str {
        &self.content_type
    }

    /// Status predicate.
    #[must_use]
    pub const fn status_spec(&self) -> StatusSpec {
        self.status
    }

    /// Whether a match is reported as an error.
    #[must_use]
    pub const fn returns_error(&self) -> bool {
        self.return_error
    }

    /// Whether `media_type` (already bare and lowercased) is acceptable.
    #[must_use]
    pub fn accepts_content_type(&self, media_type: &str) -> bool {
        self.content_type.is_empty() || self.content_type.eq_ignore_ascii_case(media_type)
    }

    pub(crate) fn decode(&mut self, response: Response) -> Decoded {
        match &mut self.decoder {
            Decoder::Static(decode) => decode(response),
            Decoder::Boxed(decode) => decode(response),
        }
    }
}

impl Parser<'static> {
    pub(crate) const fn from_fn(
        content_type: &'static str,
        status: StatusSpec,
        return_error: bool,
        decoder: fn(Response) -> Decoded,
    ) -> Self {
        Self {
            content_type: Cow::Borrowed(content_type),
            status,
            return_error,
            decoder: Decoder::Static(decoder),
        }
    }
}

impl fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("content_type", &self.content_type)
            .field("status", &self.status)
            .field("return_error", &self.return_error)
            .finish_non_exhaustive()
    }
}

/// Build a parser around a custom decoder.
///
/// The parser starts out matching `default_content_type` (empty matches any)
/// and 2xx statuses; `options` are applied in order.
///
/// ```
/// use tongs_core::{Decoded, ResponseBody, StatusSpec, make_parser};
///
/// let mut status = 0;
/// let parser = make_parser("", [StatusSpec::Any.into()], |response| {
///     status = response.status();
///     Decoded::empty()
/// });
/// assert_eq!(parser.status_spec(), StatusSpec::Any);
/// ```
pub fn make_parser<'a>(
    default_content_type: impl Into<Cow<'static, str>>,
    options: impl IntoIterator<Item = ParseOption>,
    decoder: impl FnMut(Response) -> Decoded + 'a,
) -> Parser<'a> {
    Parser::new(default_content_type, decoder).with_all(options)
}
