//! HTTP response wrapper
//!
//! [`Response::raw_body`] and [`Response::body`] read the same single-use
//! entity stream. Whichever reads first wins; the other then fails with
//! [`HttpError::BodyConsumed`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::HttpError;
use crate::json::{essence, is_json, JsonCodec};

/// Resolution state of the typed body
enum BodyState<T> {
    Unresolved,
    Resolved(T),
    Failed(HttpError),
}

/// Response to a sent request, with a body decoded as `T` on first access
pub struct Response<T> {
    status: u16,
    headers: Vec<(String, String)>,
    content_type: Option<String>,
    assumed_content_type: Option<String>,
    codec: JsonCodec,
    stream: Option<reqwest::Response>,
    body: BodyState<T>,
}

impl<T> std::fmt::Debug for Response<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = match &self.body {
            BodyState::Unresolved => "unresolved",
            BodyState::Resolved(_) => "resolved",
            BodyState::Failed(_) => "failed",
        };
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .field("assumed_content_type", &self.assumed_content_type)
            .field("body", &body)
            .finish_non_exhaustive()
    }
}

impl<T> Response<T> {
    pub(crate) fn new(response: reqwest::Response, codec: JsonCodec) -> Self {
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| essence(value).to_string());

        Self {
            status: response.status().as_u16(),
            headers,
            content_type,
            assumed_content_type: None,
            codec,
            stream: Some(response),
            body: BodyState::Unresolved,
        }
    }

    /// Get the HTTP status code
    pub fn code(&self) -> u16 {
        self.status
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response status is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response status is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// First value of header `key`, matched case-insensitively
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    /// All headers as received
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// MIME type reported by the server, without parameters
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Decode the body as if the server had sent `content_type`
    ///
    /// Has no effect once [`Response::body`] has been called.
    pub fn assume_content_type(&mut self, content_type: impl Into<String>) -> &mut Self {
        self.assumed_content_type = Some(content_type.into());
        self
    }

    /// Decode the body with `codec`
    pub fn with_codec(&mut self, codec: JsonCodec) -> &mut Self {
        self.codec = codec;
        self
    }

    /// Take the undecoded entity stream
    pub fn raw_body(&mut self) -> Result<RawBody, HttpError> {
        self.stream
            .take()
            .map(|inner| RawBody { inner })
            .ok_or(HttpError::BodyConsumed)
    }
}

impl<T> Response<T>
where
    T: DeserializeOwned,
{
    /// The body decoded as `T`
    ///
    /// The first call settles the outcome and every later call returns it
    /// again without touching the stream.
    pub async fn body(&mut self) -> Result<&T, HttpError> {
        if matches!(self.body, BodyState::Unresolved) {
            self.body = match self.decode().await {
                Ok(value) => BodyState::Resolved(value),
                Err(err) => BodyState::Failed(err),
            };
        }

        match &self.body {
            BodyState::Resolved(value) => Ok(value),
            BodyState::Failed(err) => Err(err.clone()),
            // Settled above
            BodyState::Unresolved => Err(HttpError::BodyConsumed),
        }
    }

    /// Resolve the body and take ownership of it
    pub async fn into_body(mut self) -> Result<T, HttpError> {
        self.body().await?;
        match self.body {
            BodyState::Resolved(value) => Ok(value),
            BodyState::Failed(err) => Err(err),
            BodyState::Unresolved => Err(HttpError::BodyConsumed),
        }
    }

    /// [`Response::body`] on the crate's blocking runtime
    #[cfg(feature = "blocking")]
    pub fn body_blocking(&mut self) -> Result<&T, HttpError> {
        crate::blocking::block_on(self.body())
    }

    async fn decode(&mut self) -> Result<T, HttpError> {
        let content_type = self
            .assumed_content_type
            .as_deref()
            .or(self.content_type.as_deref());

        if !content_type.is_some_and(is_json) {
            tracing::warn!(
                content_type = content_type.unwrap_or("none"),
                "Refusing to decode non-JSON body"
            );
            return Err(HttpError::UnsupportedContentType {
                content_type: content_type.map(str::to_string),
            });
        }

        let response = self.stream.take().ok_or(HttpError::BodyConsumed)?;
        let bytes = response.bytes().await.map_err(HttpError::from)?;
        tracing::trace!(len = bytes.len(), "Decoding JSON body");
        self.codec.decode(&bytes)
    }
}

impl Response<Value> {
    /// Reinterpret an untyped response as `U`
    ///
    /// An already decoded body is converted from its JSON tree.
    pub fn cast<U>(self) -> Response<U>
    where
        U: DeserializeOwned,
    {
        let body = match self.body {
            BodyState::Unresolved => BodyState::Unresolved,
            BodyState::Resolved(value) => match serde_json::from_value(value) {
                Ok(typed) => BodyState::Resolved(typed),
                Err(err) => BodyState::Failed(HttpError::from(err)),
            },
            BodyState::Failed(err) => BodyState::Failed(err),
        };

        Response {
            status: self.status,
            headers: self.headers,
            content_type: self.content_type,
            assumed_content_type: self.assumed_content_type,
            codec: self.codec,
            stream: self.stream,
            body,
        }
    }
}

/// Undecoded response entity
#[derive(Debug)]
pub struct RawBody {
    inner: reqwest::Response,
}

impl RawBody {
    /// Next chunk of the entity, `None` at the end
    pub async fn chunk(&mut self) -> Result<Option<Vec<u8>>, HttpError> {
        self.inner
            .chunk()
            .await
            .map(|chunk| chunk.map(|b| b.to_vec()))
            .map_err(HttpError::from)
    }

    /// Get the response body as bytes
    pub async fn bytes(self) -> Result<Vec<u8>, HttpError> {
        self.inner
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(HttpError::from)
    }

    /// Get the response body as text
    pub async fn text(self) -> Result<String, HttpError> {
        self.inner.text().await.map_err(HttpError::from)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct PersonInfo {
        name: String,
        address: String,
    }

    fn stub<T>(content_type: Option<&str>, body: &'static str) -> Response<T> {
        let mut builder = http::Response::builder()
            .status(200)
            .header("X-Trace", "first")
            .header("X-Trace", "second");
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let raw = builder.body(body).expect("valid response");
        Response::new(reqwest::Response::from(raw), JsonCodec::default())
    }

    #[test]
    fn test_status_and_headers() {
        let response = stub::<Value>(Some("application/json"), "{}");
        assert_eq!(response.code(), 200);
        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());

        assert_eq!(response.header("x-trace"), Some("first"));
        assert_eq!(response.header("X-TRACE"), Some("first"));
        assert_eq!(response.header("missing"), None);
        let traces: Vec<_> = response
            .headers()
            .iter()
            .filter(|(name, _)| name == "x-trace")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(traces, vec!["first", "second"]);
    }

    #[test]
    fn test_content_type_drops_parameters() {
        let response = stub::<Value>(Some("application/json; charset=utf-8"), "{}");
        assert_eq!(response.content_type(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_body_decodes_and_caches() {
        let mut response = stub::<PersonInfo>(
            Some("application/json"),
            r#"{"name":"Ada","address":"London"}"#,
        );

        let first = response.body().await.expect("decodes") as *const PersonInfo;
        let second = response.body().await.expect("cached") as *const PersonInfo;
        assert_eq!(first, second);
        assert_eq!(
            response.body().await.expect("cached"),
            &PersonInfo {
                name: "Ada".to_string(),
                address: "London".to_string(),
            }
        );

        // The stream went to the decoder
        assert!(matches!(response.raw_body(), Err(HttpError::BodyConsumed)));
    }

    #[tokio::test]
    async fn test_non_json_body_fails_and_stays_failed() {
        let mut response = stub::<PersonInfo>(Some("text/html"), "<html></html>");

        let err = response.body().await.expect_err("html is not JSON");
        assert_eq!(
            err,
            HttpError::UnsupportedContentType {
                content_type: Some("text/html".to_string()),
            }
        );

        // Too late to change the decision
        response.assume_content_type("application/json");
        assert_eq!(response.body().await.expect_err("still failed"), err);

        // Nothing read the stream
        let raw = response.raw_body().expect("stream untouched");
        assert_eq!(raw.text().await.expect("text"), "<html></html>");
    }

    #[tokio::test]
    async fn test_missing_content_type_fails() {
        let mut response = stub::<Value>(None, "{}");
        let err = response.body().await.expect_err("no content type");
        assert_eq!(err, HttpError::UnsupportedContentType { content_type: None });
    }

    #[tokio::test]
    async fn test_assume_content_type_forces_json() {
        let mut response = stub::<PersonInfo>(
            Some("text/plain"),
            r#"{"name":"Ada","address":"London"}"#,
        );
        let person = response
            .assume_content_type("application/json")
            .body()
            .await
            .expect("decodes as JSON");
        assert_eq!(person.name, "Ada");
    }

    #[tokio::test]
    async fn test_assume_non_json_blocks_decoding() {
        let mut response = stub::<Value>(Some("application/json"), "{}");
        response.assume_content_type("text/csv");
        assert!(matches!(
            response.body().await,
            Err(HttpError::UnsupportedContentType { .. })
        ));
    }

    #[tokio::test]
    async fn test_raw_body_then_body_is_consumed() {
        let mut response = stub::<Value>(Some("application/json"), r#"{"a":1}"#);
        let raw = response.raw_body().expect("first reader");
        assert_eq!(raw.bytes().await.expect("bytes"), br#"{"a":1}"#);

        assert_eq!(
            response.body().await.expect_err("stream gone"),
            HttpError::BodyConsumed
        );
        assert!(matches!(response.raw_body(), Err(HttpError::BodyConsumed)));
    }

    #[tokio::test]
    async fn test_malformed_json_fails() {
        let mut response = stub::<PersonInfo>(Some("application/json"), "not json");
        assert!(matches!(
            response.body().await,
            Err(HttpError::Deserialization(_))
        ));
    }

    #[tokio::test]
    async fn test_into_body() {
        let response = stub::<Vec<u32>>(Some("application/json"), "[1, 2, 3]");
        assert_eq!(response.into_body().await.expect("decodes"), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_cast_before_and_after_resolution() {
        let response = stub::<Value>(
            Some("application/json"),
            r#"{"name":"Ada","address":"London"}"#,
        );
        let mut typed = response.cast::<PersonInfo>();
        assert_eq!(typed.body().await.expect("decodes").address, "London");

        let mut untyped = stub::<Value>(
            Some("application/json"),
            r#"{"name":"Ada","address":"London"}"#,
        );
        untyped.body().await.expect("decodes");
        let typed = untyped.cast::<PersonInfo>();
        assert_eq!(typed.into_body().await.expect("converted").name, "Ada");
    }

    #[tokio::test]
    async fn test_raw_body_chunks() {
        let mut response = stub::<Value>(Some("text/plain"), "hello");
        let mut raw = response.raw_body().expect("stream");
        let mut collected = Vec::new();
        while let Some(chunk) = raw.chunk().await.expect("chunk") {
            collected.extend(chunk);
        }
        assert_eq!(collected, b"hello");
    }
}
