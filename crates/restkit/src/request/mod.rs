//! Request types
//!
//! Three concrete requests share the [`Request`] trait:
//!
//! - [`GetRequest`]: headers only
//! - [`PutRequest`]: headers plus an optional pending body
//! - [`PostRequest`]: headers, an optional pending body and form fields
//!
//! A request is configured in place, then consumed by [`Request::execute`] or
//! [`Request::respond_as`]. Just before sending, [`Request::prepare`] settles
//! which entity (if any) goes on the wire.

use std::future::Future;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::client::HttpClient;
use crate::error::HttpError;
use crate::json::{JsonCodec, APPLICATION_JSON};
use crate::response::Response;

mod body;
mod form;
mod get;

pub use body::{PendingBody, PutRequest};
pub use form::{PostRequest, FORM_URLENCODED};
pub use get::GetRequest;

/// Body payload of a request, paired with its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub(crate) content_type: String,
    pub(crate) bytes: Vec<u8>,
}

impl Entity {
    /// Create an entity from raw bytes
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// JSON entity from an already encoded document
    pub fn json(document: String) -> Self {
        Self::new(APPLICATION_JSON, document.into_bytes())
    }

    /// Content type sent with the entity
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// State shared by every request type
#[derive(Debug, Clone)]
pub struct RequestParts {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) client: HttpClient,
    pub(crate) codec: JsonCodec,
}

impl RequestParts {
    pub(crate) fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            client: HttpClient::shared(),
            codec: JsonCodec::shared(),
        }
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Headers in the order they were added
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Client the request will be sent with
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Codec used for the request body and handed to the response
    pub fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    pub(crate) fn into_prepared(self, entity: Option<Entity>) -> (HttpClient, PreparedRequest) {
        let prepared = PreparedRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            entity,
            codec: self.codec,
        };
        (self.client, prepared)
    }
}

/// A request with its body settled, ready to go on the wire
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) entity: Option<Entity>,
    pub(crate) codec: JsonCodec,
}

impl PreparedRequest {
    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Headers in the order they were added
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Entity that will be attached, if any
    pub fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }
}

/// Capabilities common to every request type
pub trait Request: Sized + Send {
    /// Shared request state
    fn parts(&self) -> &RequestParts;

    /// Shared request state, mutably
    fn parts_mut(&mut self) -> &mut RequestParts;

    /// Settle the body and split off the client, without any I/O
    fn into_parts(self) -> Result<(HttpClient, PreparedRequest), HttpError>;

    /// Settle the body and return exactly what would be sent
    fn prepare(self) -> Result<PreparedRequest, HttpError> {
        self.into_parts().map(|(_, prepared)| prepared)
    }

    /// HTTP method
    fn method(&self) -> Method {
        self.parts().method.clone()
    }

    /// Target URL
    fn url(&self) -> &Url {
        &self.parts().url
    }

    /// Headers added so far
    fn headers(&self) -> &[(String, String)] {
        &self.parts().headers
    }

    /// Append a header. Repeated keys are all sent, in order.
    fn header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.parts_mut().headers.push((key.into(), value.into()));
        self
    }

    /// Send with `client` instead of the shared default
    fn client(&mut self, client: HttpClient) -> &mut Self {
        self.parts_mut().client = client;
        self
    }

    /// Use `codec` for the request body and the response decoder
    fn codec(&mut self, codec: JsonCodec) -> &mut Self {
        self.parts_mut().codec = codec;
        self
    }

    /// Send the request without committing to a body type
    fn execute(self) -> impl Future<Output = Result<Response<Value>, HttpError>> + Send {
        self.respond_as::<Value>()
    }

    /// Send the request and decode the body as `T` on first access
    fn respond_as<T>(self) -> impl Future<Output = Result<Response<T>, HttpError>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            let (client, prepared) = self.into_parts()?;
            client.send(prepared).await
        }
    }

    /// [`Request::execute`] on the crate's blocking runtime
    #[cfg(feature = "blocking")]
    fn execute_blocking(self) -> Result<Response<Value>, HttpError> {
        crate::blocking::block_on(self.execute())
    }

    /// [`Request::respond_as`] on the crate's blocking runtime
    #[cfg(feature = "blocking")]
    fn respond_as_blocking<T>(self) -> Result<Response<T>, HttpError>
    where
        T: DeserializeOwned + Send,
    {
        crate::blocking::block_on(self.respond_as::<T>())
    }
}

/// Requests that can carry an entity
pub trait BodyRequest: Request {
    /// The pending body slot
    fn pending_body(&self) -> &PendingBody;

    /// The pending body slot, mutably
    fn pending_body_mut(&mut self) -> &mut PendingBody;

    /// Serialize `value` as the JSON body, replacing any pending body
    ///
    /// Fails without touching the pending body if `value` cannot be encoded.
    fn set_json_body<B>(&mut self, value: &B) -> Result<&mut Self, HttpError>
    where
        B: Serialize + ?Sized,
    {
        let document = self.parts().codec.encode(value)?;
        self.pending_body_mut().set(Entity::json(document));
        Ok(self)
    }

    /// Use raw bytes as the body, replacing any pending body
    fn set_body(
        &mut self,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> &mut Self {
        self.pending_body_mut().set(Entity::new(content_type, bytes));
        self
    }
}
