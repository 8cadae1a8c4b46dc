//! Core types for tongs: response parsers and dispatch.
//!
//! A call hands one [`Response`] to an ordered list of [`Parser`]s. Each
//! parser is guarded by a content-type predicate and a [`StatusSpec`]; the
//! first one that accepts both gets the body. When none does, a fixed chain
//! of fallbacks turns JSON and text error bodies into an inspectable
//! [`ResponseError`].
//!
//! - [`parsers`] - ready-made parser factories (`json`, `text`, `bytes`, `raw`, `discard`)
//! - [`resolve`] and [`try_match`] - the dispatch engine
//! - [`HttpClient`] and [`perform`] - execute a request, then dispatch
//! - [`url`], [`make_get`], [`make_form`], [`make_json`], [`make`] - request builders
//! - [`Error`], [`ResponseError`] - error handling and inspection
//!
//! # Example
//!
//! ```
//! use tongs_core::{Response, StatusSpec, parsers, resolve, return_error};
//!
//! #[derive(Debug, Default, serde::Deserialize)]
//! struct User { id: u64 }
//!
//! let response = Response::from_http(
//!     http::Response::builder()
//!         .status(404)
//!         .header("Content-Type", "application/json")
//!         .body(r#"{"error":"no such user"}"#)
//!         .unwrap(),
//! );
//!
//! let mut user = User::default();
//! let mut api_error = serde_json::Value::Null;
//! let err = resolve(
//!     response,
//!     &mut [
//!         parsers::json(&mut user),
//!         parsers::json(&mut api_error)
//!             .with(StatusSpec::ClientOrServerError)
//!             .with(return_error()),
//!     ],
//! )
//! .unwrap_err();
//!
//! assert!(err.is_4xx());
//! assert_eq!(api_error["error"], "no such user");
//! ```

mod body;
mod client;
mod dispatch;
mod error;
mod make;
mod media_type;
mod method;
mod parser;
pub mod parsers;
pub mod prelude;
mod request;
mod response;
mod status;

pub use body::{from_json, from_json_value, to_form, to_json};
pub use client::{HttpClient, HttpClientExt, perform};
pub use dispatch::{FALLBACK_PARSERS, Match, resolve, try_match};
pub use error::{DecodeError, Error, ResponseBody, ResponseError, Result};
pub use make::{basic_auth_value, make, make_form, make_get, make_json, url};
pub use media_type::{ContentType, parse_media_type};
pub use method::Method;
pub use parser::{Decoded, ParseOption, Parser, content_type, make_parser, return_error};
pub use request::{Request, RequestBuilder};
pub use response::{Body, Response};
pub use status::{MAX_STATUS, MIN_STATUS, StatusSpec};

// Re-export http types for status codes and headers
pub use http::{StatusCode, header};
