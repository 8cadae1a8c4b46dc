//! Status code predicates.
//!
//! A [`StatusSpec`] decides whether a parser accepts a response based on its
//! numeric status code. It is either a concrete code or one of the class
//! predicates (`2xx`, `4xx/5xx`, ...).

use std::fmt;

/// Lowest status code a response may carry.
pub const MIN_STATUS: u16 = 100;

/// Highest status code a response may carry.
pub const MAX_STATUS: u16 = 599;

/// Predicate over HTTP status codes.
///
/// `StatusSpec` also converts into a [`ParseOption`](crate::ParseOption), so it
/// can be passed directly to [`Parser::with`](crate::Parser::with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusSpec {
    /// Matches no status code.
    #[default]
    None,
    /// Matches every status code.
    Any,
    /// Matches a hundreds band, `Class(2)` is `200..=299`. Valid classes are `1..=5`.
    Class(u8),
    /// Matches `400..=599`.
    ClientOrServerError,
    /// Matches a single status code in `100..=599`.
    Exact(u16),
}

impl StatusSpec {
    /// `1xx`
    pub const INFORMATIONAL: Self = Self::Class(1);
    /// `2xx`
    pub const SUCCESS: Self = Self::Class(2);
    /// `3xx`
    pub const REDIRECTION: Self = Self::Class(3);
    /// `4xx`
    pub const CLIENT_ERROR: Self = Self::Class(4);
    /// `5xx`
    pub const SERVER_ERROR: Self = Self::Class(5);

    /// `200 OK`
    pub const OK: Self = Self::Exact(200);
    /// `201 Created`
    pub const CREATED: Self = Self::Exact(201);
    /// `202 Accepted`
    pub const ACCEPTED: Self = Self::Exact(202);
    /// `204 No Content`
    pub const NO_CONTENT: Self = Self::Exact(204);
    /// `206 Partial Content`
    pub const PARTIAL_CONTENT: Self = Self::Exact(206);
    /// `401 Unauthorized`
    pub const UNAUTHORIZED: Self = Self::Exact(401);
    /// `403 Forbidden`
    pub const FORBIDDEN: Self = Self::Exact(403);
    /// `404 Not Found`
    pub const NOT_FOUND: Self = Self::Exact(404);

    /// Returns whether `actual` satisfies this predicate.
    ///
    /// # Panics
    ///
    /// Panics if `actual` is outside `100..=599`, if a [`StatusSpec::Class`] is
    /// outside `1..=5`, or if a [`StatusSpec::Exact`] code is outside `100..=599`.
    /// These are caller bugs, not response conditions.
    #[must_use]
    pub fn matches(self, actual: u16) -> bool {
        assert!(is_valid_status(actual), "invalid actual status code {actual}");

        match self {
            Self::None => false,
            Self::Any => true,
            Self::Class(class) => {
                assert!((1..=5).contains(&class), "invalid status class {class}xx");
                actual / 100 == u16::from(class)
            }
            Self::ClientOrServerError => (400..=599).contains(&actual),
            Self::Exact(code) => {
                assert!(is_valid_status(code), "invalid desired status code {code}");
                actual == code
            }
        }
    }
}

fn is_valid_status(code: u16) -> bool {
    (MIN_STATUS..=MAX_STATUS).contains(&code)
}

impl From<http::StatusCode> for StatusSpec {
    fn from(status: http::StatusCode) -> Self {
        Self::Exact(status.as_u16())
    }
}

impl fmt::Display for StatusSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Any => f.write_str("any"),
            Self::Class(class) => write!(f, "{class}xx"),
            Self::ClientOrServerError => f.write_str("4xx/5xx"),
            Self::Exact(code) => write!(f, "{code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_and_any() {
        for actual in MIN_STATUS..=MAX_STATUS {
            assert!(!StatusSpec::None.matches(actual));
            assert!(StatusSpec::Any.matches(actual));
        }
    }

    #[test]
    fn class_bands() {
        for actual in MIN_STATUS..=MAX_STATUS {
            let class = actual / 100;
            for spec_class in 1..=5u8 {
                assert_eq!(
                    StatusSpec::Class(spec_class).matches(actual),
                    u16::from(spec_class) == class,
                    "{spec_class}xx vs {actual}"
                );
            }
            assert_eq!(
                StatusSpec::ClientOrServerError.matches(actual),
                (400..600).contains(&actual)
            );
        }
    }

    #[test]
    fn band_edges() {
        assert!(StatusSpec::SUCCESS.matches(200));
        assert!(StatusSpec::SUCCESS.matches(299));
        assert!(!StatusSpec::SUCCESS.matches(300));
        assert!(!StatusSpec::SUCCESS.matches(199));
        assert!(StatusSpec::ClientOrServerError.matches(400));
        assert!(StatusSpec::ClientOrServerError.matches(599));
        assert!(!StatusSpec::ClientOrServerError.matches(399));
    }

    #[test]
    fn exact() {
        assert!(StatusSpec::NOT_FOUND.matches(404));
        assert!(!StatusSpec::NOT_FOUND.matches(400));
        assert!(StatusSpec::Exact(418).matches(418));
        assert!(StatusSpec::from(http::StatusCode::CREATED).matches(201));
    }

    #[test]
    #[should_panic(expected = "invalid actual status code")]
    fn actual_below_range_panics() {
        let _ = StatusSpec::Any.matches(99);
    }

    #[test]
    #[should_panic(expected = "invalid actual status code")]
    fn actual_above_range_panics_for_bands() {
        let _ = StatusSpec::SUCCESS.matches(600);
    }

    #[test]
    #[should_panic(expected = "invalid actual status code")]
    fn actual_out_of_range_panics_for_exact() {
        let _ = StatusSpec::OK.matches(0);
    }

    #[test]
    #[should_panic(expected = "invalid actual status code")]
    fn actual_out_of_range_panics_for_none() {
        let _ = StatusSpec::None.matches(700);
    }

    #[test]
    #[should_panic(expected = "invalid desired status code")]
    fn invalid_exact_spec_panics() {
        let _ = StatusSpec::Exact(42).matches(200);
    }

    #[test]
    #[should_panic(expected = "invalid status class")]
    fn invalid_class_panics() {
        let _ = StatusSpec::Class(7).matches(200);
    }

    #[test]
    fn display() {
        assert_eq!(StatusSpec::None.to_string(), "none");
        assert_eq!(StatusSpec::Any.to_string(), "any");
        assert_eq!(StatusSpec::SUCCESS.to_string(), "2xx");
        assert_eq!(StatusSpec::ClientOrServerError.to_string(), "4xx/5xx");
        assert_eq!(StatusSpec::NOT_FOUND.to_string(), "404");
    }

    #[test]
    fn default_is_none() {
        assert_eq!(StatusSpec::default(), StatusSpec::None);
    }
}
