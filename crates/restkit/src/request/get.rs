//! GET request

use reqwest::Method;
use url::Url;

use super::{PreparedRequest, Request, RequestParts};
use crate::client::HttpClient;
use crate::error::HttpError;

/// GET request. Never carries a body.
#[derive(Debug, Clone)]
pub struct GetRequest {
    parts: RequestParts,
}

impl GetRequest {
    /// GET `url` with the shared client
    pub fn new(url: Url) -> Self {
        Self {
            parts: RequestParts::new(Method::GET, url),
        }
    }
}

impl Request for GetRequest {
    fn parts(&self) -> &RequestParts {
        &self.parts
    }

    fn parts_mut(&mut self) -> &mut RequestParts {
        &mut self.parts
    }

    fn into_parts(self) -> Result<(HttpClient, PreparedRequest), HttpError> {
        Ok(self.parts.into_prepared(None))
    }
}
