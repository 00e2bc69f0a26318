//! # Request Dispatcher
//!
//! [`RestClient`] issues every call against the Behave API. It is agnostic to the resource
//! being addressed: it joins the path onto the configured base endpoint, attaches the auth
//! header, serializes the optional JSON body and classifies the status.
//!
//! ## Status classification
//!
//! `200` is the only success code. Anything else becomes an [`ApiError`] carrying the status
//! and a message, which is propagated to the caller as-is. Nothing is retried.
use super::envelope::{Envelope, MalformedResponse, Payload};
use super::transport::{HttpTransport, Transport};
use crate::BoxError;
use crate::config::{ClientConfig, ConfigError};
use bytes::Bytes;
use http::{HeaderName, HeaderValue, Method, StatusCode, header};
use std::sync::Arc;

/// Header carrying the API token on every request.
pub const AUTH_HEADER: HeaderName = HeaderName::from_static("x-auth-token");

/// The server answered with a status other than `200`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Behave API error ({status}): {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid request path '{path}': '{source}'")]
    InvalidPath {
        path: String,
        source: http::Error,
    },
    #[error("Failed to serialize the request body: '{0}'")]
    Encode(#[source] serde_json::Error),
    #[error("Transport failure: '{0}'")]
    Transport(#[source] BoxError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
}

impl RequestError {
    /// The API error behind this failure, if the server answered with a non-success status.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            RequestError::Api(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Settings {
    base_url: String,
    auth: HeaderValue,
}

/// Dispatches requests to the Behave API over a [`Transport`].
///
/// Cloning is cheap: the validated settings are shared and never mutated.
#[derive(Debug, Clone)]
pub struct RestClient<T = HttpTransport> {
    transport: T,
    settings: Arc<Settings>,
}

impl RestClient<HttpTransport> {
    /// Creates a dispatcher that talks to the real service.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> RestClient<T> {
    /// Creates a dispatcher over a custom transport.
    ///
    /// # Returns
    ///
    /// * `Err(ConfigError)` - If the token is not a valid header value or the base URL is
    ///   not absolute.
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self, ConfigError> {
        let settings = Settings {
            base_url: config.validated_base_url()?,
            auth: config.auth_header()?,
        };

        Ok(Self {
            transport,
            settings: Arc::new(settings),
        })
    }

    /// Performs one call and returns the raw envelope.
    ///
    /// # Returns
    ///
    /// * `Ok(Envelope)` - The server answered `200`.
    /// * `Err(RequestError::Api)` - The server answered with any other status.
    /// * `Err(RequestError)` - The request could not be built or sent, or the body was not
    ///   a JSON envelope.
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Envelope, RequestError> {
        let request = self.build_request(method.clone(), path, body)?;

        tracing::debug!(%method, path, has_body = body.is_some(), "dispatching request");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(RequestError::Transport)?;

        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "received response");

        if status != StatusCode::OK {
            let err = api_error(status, response.body());
            tracing::warn!(%method, path, status = err.status, message = %err.message, "request rejected");
            return Err(err.into());
        }

        Ok(Envelope::from_slice(response.body())?)
    }

    /// Performs one call and decodes its envelope into a [`Payload`].
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Payload, RequestError> {
        Ok(self.dispatch(method, path, body).await?.decode()?)
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<http::Request<Option<Bytes>>, RequestError> {
        let body = body
            .map(|b| serde_json::to_vec(b).map(Bytes::from))
            .transpose()
            .map_err(RequestError::Encode)?;

        let separator = if path.starts_with('/') { "" } else { "/" };
        let uri = format!("{}{separator}{path}", self.settings.base_url);

        http::Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTH_HEADER, self.settings.auth.clone())
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .body(body)
            .map_err(|source| RequestError::InvalidPath {
                path: path.to_string(),
                source,
            })
    }
}

/// Builds the error for a non-success response.
///
/// The message comes from the body's `message` field when the server sent one, otherwise
/// from the status' reason phrase.
fn api_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Unknown status".to_string());

    ApiError {
        status: status.as_u16(),
        message,
    }
}
