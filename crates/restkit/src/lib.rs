//! Fluent request builders with lazily decoded JSON responses
//!
//! Build a GET, POST or PUT request for a URL, configure headers, a JSON body
//! or form fields, send it, and decode the response body into your own type
//! the first time you ask for it.
//!
//! # Example
//!
//! ```no_run
//! use restkit::{get_with, HttpError, Request};
//! use serde::Deserialize;
//! use url::Url;
//!
//! #[derive(Deserialize)]
//! struct PersonInfo {
//!     name: String,
//!     address: String,
//! }
//!
//! async fn example() -> Result<(), HttpError> {
//!     let url = Url::parse("https://www.someservice.com/person").expect("valid url");
//!     let mut response = get_with(url, |request| {
//!         request.header("X-Client", "restkit");
//!     })
//!     .respond_as::<PersonInfo>()
//!     .await?;
//!
//!     println!("{}", response.code());
//!     println!("{}", response.body().await?.name);
//!     Ok(())
//! }
//! ```
//!
//! ## Blocking
//!
//! With the `blocking` feature, `Request::execute_blocking`,
//! `Request::respond_as_blocking` and `Response::body_blocking` run the same
//! calls on a process-wide Tokio runtime.

#[cfg(feature = "blocking")]
pub mod blocking;
mod builder;
mod client;
mod error;
mod json;
mod request;
mod response;

pub use builder::{get, get_with, post, post_with, put, put_with};
pub use client::{HttpClient, HttpClientBuilder};
pub use error::HttpError;
pub use json::{JsonCodec, APPLICATION_JSON};
pub use request::{
    BodyRequest, Entity, GetRequest, PendingBody, PostRequest, PreparedRequest, PutRequest,
    Request, RequestParts, FORM_URLENCODED,
};
pub use response::{RawBody, Response};
pub use url::Url;
