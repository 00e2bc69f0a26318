//! # HTTP Transport
//!
//! The [`Transport`] trait is the seam between the dispatcher and the network. It performs one
//! request/response exchange and reports whatever status the server answered
//! with; status classification is left to [`super::client::RestClient`].
//!
//! [`HttpTransport`] is the production implementation, backed by a pooled `reqwest` client.
//! It makes exactly one attempt per request: no retries, no backoff.
use crate::BoxError;
use bytes::Bytes;
use std::future::Future;

/// Sends one HTTP request and returns the raw response.
///
/// A `None` body means nothing is transmitted.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: http::Request<Option<Bytes>>,
    ) -> impl Future<Output = Result<http::Response<Bytes>, BoxError>> + Send;
}

/// A [`Transport`] over real HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuses an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        request: http::Request<Option<Bytes>>,
    ) -> Result<http::Response<Bytes>, BoxError> {
        let (parts, body) = request.into_parts();

        let mut builder = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers);

        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let mut out = http::Response::new(body);
        *out.status_mut() = status;
        *out.headers_mut() = headers;

        Ok(out)
    }
}
