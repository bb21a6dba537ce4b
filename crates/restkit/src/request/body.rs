//! Pending body slot and the PUT request

use reqwest::Method;
use url::Url;

use super::{BodyRequest, Entity, PreparedRequest, Request, RequestParts};
use crate::client::HttpClient;
use crate::error::HttpError;

/// Entity waiting to be attached when the request is sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingBody {
    entity: Option<Entity>,
}

impl PendingBody {
    /// Replace whatever is pending with `entity`
    pub fn set(&mut self, entity: Entity) {
        self.entity = Some(entity);
    }

    /// True once a body has been set explicitly
    pub fn is_set(&self) -> bool {
        self.entity.is_some()
    }

    /// The pending entity
    pub fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    pub(crate) fn into_entity(self) -> Option<Entity> {
        self.entity
    }
}

/// PUT request
#[derive(Debug, Clone)]
pub struct PutRequest {
    parts: RequestParts,
    body: PendingBody,
}

impl PutRequest {
    /// PUT `url` with the shared client
    pub fn new(url: Url) -> Self {
        Self {
            parts: RequestParts::new(Method::PUT, url),
            body: PendingBody::default(),
        }
    }
}

impl Request for PutRequest {
    fn parts(&self) -> &RequestParts {
        &self.parts
    }

    fn parts_mut(&mut self) -> &mut RequestParts {
        &mut self.parts
    }

    fn into_parts(self) -> Result<(HttpClient, PreparedRequest), HttpError> {
        Ok(self.parts.into_prepared(self.body.into_entity()))
    }
}

impl BodyRequest for PutRequest {
    fn pending_body(&self) -> &PendingBody {
        &self.body
    }

    fn pending_body_mut(&mut self) -> &mut PendingBody {
        &mut self.body
    }
}
