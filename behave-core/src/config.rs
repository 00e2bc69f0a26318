//! # Client Configuration
//!
//! The API token and the base endpoint are fixed for the lifetime of a client. They are
//! collected once into a [`ClientConfig`] and validated when the client is built, after
//! which the auth header is only ever read.
use http::{HeaderValue, Uri};
use std::str::FromStr;

/// Default base endpoint of the Behave API.
pub const DEFAULT_BASE_URL: &str = "http://api.behave.io";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "BEHAVE_API_TOKEN";

/// Environment variable overriding the base endpoint.
pub const BASE_URL_ENV: &str = "BEHAVE_BASE_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing API token, set 'BEHAVE_API_TOKEN'")]
    MissingToken,
    #[error("The API token is not a valid header value: '{0}'")]
    InvalidToken(#[source] http::header::InvalidHeaderValue),
    #[error("Invalid base URL '{url}': '{reason}'")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Settings shared by every request issued by a client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
}

impl ClientConfig {
    /// Creates a configuration pointing at [`DEFAULT_BASE_URL`].
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
        }
    }

    /// Overrides the base endpoint. A trailing `/` is dropped so paths can be appended as-is.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reads [`TOKEN_ENV`] and, if set, [`BASE_URL_ENV`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let config = Self::new(token);

        Ok(match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url),
            _ => config,
        })
    }

    /// Validates the token as a sensitive header value.
    pub(crate) fn auth_header(&self) -> Result<HeaderValue, ConfigError> {
        let mut value = HeaderValue::from_str(&self.token).map_err(ConfigError::InvalidToken)?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Checks that the base endpoint is an absolute URI.
    pub(crate) fn validated_base_url(&self) -> Result<String, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let uri = Uri::from_str(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(invalid("expected an absolute URL such as 'http://host'".to_string()));
        }

        Ok(self.base_url.trim_end_matches('/').to_string())
    }
}

// Keep the token out of debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("t").with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_relative_base_url_is_rejected() {
        let config = ClientConfig::new("t").with_base_url("/api");
        assert!(matches!(
            config.validated_base_url(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let config = ClientConfig::new("bad\ntoken");
        assert!(matches!(
            config.auth_header(),
            Err(ConfigError::InvalidToken(_))
        ));
    }

    // Env vars are process-wide, so tests touching them run one at a time.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env<R>(token: Option<&str>, base_url: Option<&str>, f: impl FnOnce() -> R) -> R {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // SAFETY: ENV_LOCK serializes every env access in this crate's tests.
        unsafe {
            match token {
                Some(token) => std::env::set_var(TOKEN_ENV, token),
                None => std::env::remove_var(TOKEN_ENV),
            }
            match base_url {
                Some(url) => std::env::set_var(BASE_URL_ENV, url),
                None => std::env::remove_var(BASE_URL_ENV),
            }
        }
        let result = f();
        unsafe {
            std::env::remove_var(TOKEN_ENV);
            std::env::remove_var(BASE_URL_ENV);
        }
        result
    }

    #[test]
    fn test_from_env_requires_token() {
        let missing = with_env(None, None, ClientConfig::from_env);
        assert!(matches!(missing, Err(ConfigError::MissingToken)));

        let blank = with_env(Some("  "), None, ClientConfig::from_env);
        assert!(matches!(blank, Err(ConfigError::MissingToken)));
    }

    #[test]
    fn test_from_env_defaults_base_url() {
        let config = with_env(Some("abc"), None, ClientConfig::from_env).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let config = with_env(Some("abc"), Some(""), ClientConfig::from_env).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_env_overrides_base_url() {
        let config = with_env(
            Some("abc"),
            Some("http://localhost:9000/"),
            ClientConfig::from_env,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
