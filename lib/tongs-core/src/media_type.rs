//! Media types and `Content-Type` parsing.

use std::borrow::Cow;

/// Well-known content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
    /// Plain text content type (`text/plain`).
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ContentType> for Cow<'static, str> {
    fn from(content_type: ContentType) -> Self {
        Cow::Borrowed(content_type.as_str())
    }
}

/// Extract the bare media type from a `Content-Type` header value.
///
/// Parameters such as `charset` are validated and dropped; the result is
/// lowercased. Returns `None` for malformed values, including an empty one.
///
/// ```
/// use tongs_core::parse_media_type;
///
/// assert_eq!(parse_media_type("Text/Plain; charset=utf-8").as_deref(), Some("text/plain"));
/// assert_eq!(parse_media_type("application/json;").as_deref(), Some("application/json"));
/// assert_eq!(parse_media_type("application/json;;"), None);
/// assert_eq!(parse_media_type("not a type"), None);
/// ```
#[must_use]
pub fn parse_media_type(value: &str) -> Option<String> {
    let (media, params) = value.split_once(';').unwrap_or((value, ""));
    let media = media.trim().to_ascii_lowercase();

    let (primary, sub) = match media.split_once('/') {
        Some((primary, sub)) => (primary, Some(sub)),
        None => (media.as_str(), None),
    };
    if !is_token(primary) || sub.is_some_and(|sub| !is_token(sub)) {
        return None;
    }
    if !valid_parameters(params) {
        return None;
    }

    Some(media)
}

fn is_token_char(c: char) -> bool {
    c.is_ascii() && !c.is_ascii_control() && c != ' ' && !"()<>@,;:\\\"/[]?=".contains(c)
}

fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

fn take_token(s: &str) -> (&str, &str) {
    let end = s.find(|c| !is_token_char(c)).unwrap_or(s.len());
    s.split_at(end)
}

/// Skip a quoted-string body; `s` starts right after the opening quote.
fn skip_quoted(s: &str) -> Option<&str> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => return s.get(i + 1..),
            _ => {}
        }
    }
    None
}

/// `name=value` pairs separated by `;`, a single trailing `;` allowed, no
/// duplicate names. `params` starts right after the first `;`.
fn valid_parameters(params: &str) -> bool {
    let mut seen: Vec<String> = Vec::new();
    let mut rest = params;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return true;
        }

        let (name, tail) = take_token(rest);
        if name.is_empty() {
            return false;
        }
        let Some(tail) = tail.trim_start().strip_prefix('=') else {
            return false;
        };
        let tail = tail.trim_start();
        let tail = if let Some(quoted) = tail.strip_prefix('"') {
            match skip_quoted(quoted) {
                Some(tail) => tail,
                None => return false,
            }
        } else {
            let (value, tail) = take_token(tail);
            if value.is_empty() {
                return false;
            }
            tail
        };

        let name = name.to_ascii_lowercase();
        if seen.contains(&name) {
            return false;
        }
        seen.push(name);

        let tail = tail.trim_start();
        if tail.is_empty() {
            return true;
        }
        let Some(tail) = tail.strip_prefix(';') else {
            return false;
        };
        rest = tail;
    }
}
