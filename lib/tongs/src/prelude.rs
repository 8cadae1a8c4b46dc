//! Prelude module for convenient imports.
//!
//! ```
//! use tongs::prelude::*;
//! ```

pub use crate::middleware::MiddlewareExt;
pub use crate::{
    ClientConfig, ContentType, Error, HttpClient, HttpClientExt, HyperClient, Method, ParseOption,
    Parser, Request, RequestBuilder, Response, ResponseError, Result, StatusSpec, content_type,
    make_get, make_parser, parsers, perform, resolve, return_error, url,
};
pub use serde::{Deserialize, Serialize};
