//! POST request with form fields

use reqwest::Method;
use url::Url;

use super::{BodyRequest, Entity, PendingBody, PreparedRequest, Request, RequestParts};
use crate::client::HttpClient;
use crate::error::HttpError;

/// Content type of a synthesized form body
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// POST request
///
/// Form fields only become the body when nothing else was set as the body by
/// send time.
#[derive(Debug, Clone)]
pub struct PostRequest {
    parts: RequestParts,
    body: PendingBody,
    fields: Vec<(String, String)>,
}

impl PostRequest {
    /// POST to `url` with the shared client
    pub fn new(url: Url) -> Self {
        Self {
            parts: RequestParts::new(Method::POST, url),
            body: PendingBody::default(),
            fields: Vec::new(),
        }
    }

    /// Append a form field. Repeated keys are kept.
    pub fn field(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Form fields in insertion order
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

impl Request for PostRequest {
    fn parts(&self) -> &RequestParts {
        &self.parts
    }

    fn parts_mut(&mut self) -> &mut RequestParts {
        &mut self.parts
    }

    fn into_parts(self) -> Result<(HttpClient, PreparedRequest), HttpError> {
        let mut body = self.body;
        if !self.fields.is_empty() {
            if body.is_set() {
                tracing::trace!(
                    fields = self.fields.len(),
                    "Explicit body set, ignoring form fields"
                );
            } else {
                tracing::trace!(fields = self.fields.len(), "Encoding form fields as body");
                let encoded = serde_urlencoded::to_string(&self.fields)?;
                body.set(Entity::new(FORM_URLENCODED, encoded.into_bytes()));
            }
        }
        Ok(self.parts.into_prepared(body.into_entity()))
    }
}

impl BodyRequest for PostRequest {
    fn pending_body(&self) -> &PendingBody {
        &self.body
    }

    fn pending_body_mut(&mut self) -> &mut PendingBody {
        &mut self.body
    }
}
