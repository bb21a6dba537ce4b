//! HTTP client wrapper

use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::HttpError;
use crate::request::{GetRequest, PostRequest, PreparedRequest, PutRequest, Request};
use crate::response::Response;

static SHARED_CLIENT: Lazy<HttpClient> = Lazy::new(HttpClient::new);

/// HTTP client handle
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::shared()
    }
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// The process-wide client every request uses unless told otherwise
    pub fn shared() -> Self {
        SHARED_CLIENT.clone()
    }

    /// Create a new HTTP client builder
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create an HttpClient from a reqwest::Client
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { inner: client }
    }

    /// GET request bound to this client
    pub fn get(&self, url: Url) -> GetRequest {
        let mut request = GetRequest::new(url);
        request.client(self.clone());
        request
    }

    /// POST request bound to this client
    pub fn post(&self, url: Url) -> PostRequest {
        let mut request = PostRequest::new(url);
        request.client(self.clone());
        request
    }

    /// PUT request bound to this client
    pub fn put(&self, url: Url) -> PutRequest {
        let mut request = PutRequest::new(url);
        request.client(self.clone());
        request
    }

    /// Issue a prepared request and wrap what comes back
    pub(crate) async fn send<T>(&self, prepared: PreparedRequest) -> Result<Response<T>, HttpError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(
            method = %prepared.method,
            url = %prepared.url,
            headers = prepared.headers.len(),
            has_body = prepared.entity.is_some(),
            "Sending request"
        );

        let PreparedRequest {
            method,
            url,
            headers,
            entity,
            codec,
        } = prepared;

        let mut builder = self.inner.request(method, url);
        for (key, value) in &headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(entity) = entity {
            // A caller supplied Content-Type takes the place of the entity's
            let has_content_type = headers
                .iter()
                .any(|(key, _)| key.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
            if !has_content_type {
                builder = builder.header(CONTENT_TYPE, entity.content_type);
            }
            builder = builder.body(entity.bytes);
        }

        let response = builder.send().await.map_err(HttpError::from)?;
        tracing::debug!(status = response.status().as_u16(), "Received response");

        Ok(Response::new(response, codec))
    }
}

/// HTTP client builder for timeouts, user agent and default headers
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: Vec<(String, String)>,
}

impl HttpClientBuilder {
    /// Total deadline for each request, enforced by the transport
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Deadline for establishing a connection
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// `User-Agent` sent with every request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Header sent with every request from this client
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((key.into(), value.into()));
        self
    }

    /// Build the HTTP client
    pub fn build(self) -> Result<HttpClient, HttpError> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        if !self.default_headers.is_empty() {
            let mut headers = HeaderMap::new();
            for (key, value) in self.default_headers {
                let name = HeaderName::from_bytes(key.as_bytes())
                    .map_err(|e| HttpError::Build(format!("Invalid header name {}: {}", key, e)))?;
                let value = HeaderValue::from_str(&value)
                    .map_err(|e| HttpError::Build(format!("Invalid header value: {}", e)))?;
                headers.append(name, value);
            }
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(HttpError::from)?;
        Ok(HttpClient { inner: client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new() {
        let client = HttpClient::new();
        let _ = format!("{:?}", client);
    }

    #[test]
    fn test_builder_build() {
        let result = HttpClientBuilder::default().build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_full_config() {
        let result = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("restkit-test")
            .default_header("X-Client", "restkit")
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_invalid_default_header() {
        let result = HttpClient::builder()
            .default_header("bad header", "value")
            .build();
        assert!(matches!(result, Err(HttpError::Build(_))));
    }

    #[test]
    fn test_client_binds_requests() {
        let client = HttpClient::builder()
            .user_agent("bound")
            .build()
            .expect("client builds");
        let url = Url::parse("http://example.com/resource").expect("Valid URL");

        let request = client.get(url.clone());
        assert_eq!(request.url(), &url);
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(client.post(url.clone()).method(), reqwest::Method::POST);
        assert_eq!(client.put(url).method(), reqwest::Method::PUT);
    }
}
