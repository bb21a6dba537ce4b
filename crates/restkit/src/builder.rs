//! Request entry points
//!
//! `get`, `post` and `put` create a request for a URL on the shared client.
//! The `*_with` forms also run a configuration closure on the request before
//! handing it back.

use url::Url;

use crate::error::HttpError;
use crate::request::{GetRequest, PostRequest, PutRequest};

/// Prepare a GET request
pub fn get(url: Url) -> GetRequest {
    GetRequest::new(url)
}

/// Prepare a GET request and configure it
pub fn get_with<F>(url: Url, configure: F) -> GetRequest
where
    F: FnOnce(&mut GetRequest),
{
    let mut request = GetRequest::new(url);
    configure(&mut request);
    request
}

/// Prepare a POST request
pub fn post(url: Url) -> PostRequest {
    PostRequest::new(url)
}

/// Prepare a POST request and configure it
///
/// Errors from the closure, such as a body that fails to serialize, are
/// returned before anything is sent.
pub fn post_with<F>(url: Url, configure: F) -> Result<PostRequest, HttpError>
where
    F: FnOnce(&mut PostRequest) -> Result<(), HttpError>,
{
    let mut request = PostRequest::new(url);
    configure(&mut request)?;
    Ok(request)
}

/// Prepare a PUT request
pub fn put(url: Url) -> PutRequest {
    PutRequest::new(url)
}

/// Prepare a PUT request and configure it
///
/// Errors from the closure, such as a body that fails to serialize, are
/// returned before anything is sent.
pub fn put_with<F>(url: Url, configure: F) -> Result<PutRequest, HttpError>
where
    F: FnOnce(&mut PutRequest) -> Result<(), HttpError>,
{
    let mut request = PutRequest::new(url);
    configure(&mut request)?;
    Ok(request)
}
