//! Simple outgoing HTTP requests with declarative response parsers.
//!
//! Build a request, list the parsers that may handle the response, and let
//! tongs pick the one whose content type and status match. Error payloads
//! the caller did not ask for become a [`ResponseError`] you can inspect.
//!
//! # Example
//!
//! ```no_run
//! use tongs::prelude::*;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Repo {
//!     full_name: String,
//!     stargazers_count: u64,
//! }
//!
//! let client = HyperClient::new()?.with_logging();
//!
//! let mut repo = Repo::default();
//! let mut api_error = serde_json::Value::Null;
//! let result = client.get(
//!     "https://api.github.com",
//!     "repos/rust-lang/rust",
//!     &[],
//!     &[("Accept", "application/vnd.github+json")],
//!     &mut [
//!         parsers::json(&mut repo),
//!         parsers::json(&mut api_error)
//!             .with(StatusSpec::ClientOrServerError)
//!             .with(return_error()),
//!     ],
//! );
//!
//! match result {
//!     Ok(()) => println!("{} has {} stars", repo.full_name, repo.stargazers_count),
//!     Err(err) if err.is_4xx() => println!("API refused: {api_error}"),
//!     Err(err) => return Err(err),
//! }
//! # Ok::<(), tongs::Error>(())
//! ```

mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;

pub use client::{HyperClient, HyperClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};

// Re-export core types
pub use tongs_core::{
    Body, ContentType, DecodeError, Decoded, Error, FALLBACK_PARSERS, HttpClient, HttpClientExt,
    MAX_STATUS, MIN_STATUS, Match, Method, ParseOption, Parser, Request, RequestBuilder, Response,
    ResponseBody, ResponseError, Result, StatusSpec, basic_auth_value, content_type, from_json,
    from_json_value, make, make_form, make_get, make_json, make_parser, parse_media_type, parsers,
    perform, resolve, return_error, to_form, to_json, try_match, url,
};

// Re-export http types for status codes and headers
pub use tongs_core::{StatusCode, header};
