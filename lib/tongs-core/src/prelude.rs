//! Prelude module for convenient imports.
//!
//! ```
//! use tongs_core::prelude::*;
//! ```

pub use crate::{
    ContentType, Error, HttpClient, HttpClientExt, Method, ParseOption, Parser, Request,
    RequestBuilder, Response, ResponseError, Result, StatusSpec, content_type, make_get,
    make_parser, parsers, perform, resolve, return_error, url,
};
