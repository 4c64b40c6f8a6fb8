//! Configuration types for the Box API SDK.
//!
//! # Overview
//!
//! - [`BoxConfig`]: The configuration holding credentials and endpoints
//! - [`BoxConfigBuilder`]: A builder for constructing [`BoxConfig`] instances
//! - [`AccessToken`]: A validated access token with masked debug output
//! - [`BaseUrl`]: A validated, slash-terminated base URL
//!
//! # Example
//!
//! ```rust
//! use box_sdk::{AccessToken, BoxConfig};
//!
//! let config = BoxConfig::builder()
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api.box.com/2.0/");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, BaseUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Default base URL for Content API requests.
pub const DEFAULT_BASE_URL: &str = "https://api.box.com/2.0/";

/// Default base URL for file uploads.
pub const DEFAULT_UPLOAD_URL: &str = "https://upload.box.com/api/2.0/";

/// Configuration for a Box API connection.
///
/// # Thread Safety
///
/// `BoxConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct BoxConfig {
    access_token: AccessToken,
    base_url: BaseUrl,
    upload_url: BaseUrl,
    user_agent_prefix: Option<String>,
    as_user: Option<String>,
    timeout: Option<Duration>,
}

impl BoxConfig {
    /// Creates a new builder for constructing a `BoxConfig`.
    #[must_use]
    pub fn builder() -> BoxConfigBuilder {
        BoxConfigBuilder::new()
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the base URL for API requests.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the base URL for upload requests.
    #[must_use]
    pub const fn upload_url(&self) -> &BaseUrl {
        &self.upload_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the user ID sent in the `As-User` header, if configured.
    #[must_use]
    pub fn as_user(&self) -> Option<&str> {
        self.as_user.as_deref()
    }

    /// Returns the HTTP request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify BoxConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BoxConfig>();
};

/// Builder for constructing [`BoxConfig`] instances.
///
/// `access_token` is required. All other fields have defaults.
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `upload_url`: [`DEFAULT_UPLOAD_URL`]
/// - `user_agent_prefix`: `None`
/// - `as_user`: `None`
/// - `timeout`: `None` (the HTTP client's default)
#[derive(Debug, Default)]
pub struct BoxConfigBuilder {
    access_token: Option<AccessToken>,
    base_url: Option<BaseUrl>,
    upload_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    as_user: Option<String>,
    timeout: Option<Duration>,
}

impl BoxConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the base URL for API requests.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the base URL for upload requests.
    #[must_use]
    pub fn upload_url(mut self, url: BaseUrl) -> Self {
        self.upload_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Performs every request on behalf of the given user (`As-User` header).
    #[must_use]
    pub fn as_user(mut self, user_id: impl Into<String>) -> Self {
        self.as_user = Some(user_id.into());
        self
    }

    /// Sets the timeout applied to each HTTP request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`BoxConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `access_token` is not set.
    pub fn build(self) -> Result<BoxConfig, ConfigError> {
        let access_token = self.access_token.ok_or(ConfigError::MissingRequiredField {
            field: "access_token",
        })?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => BaseUrl::new(DEFAULT_BASE_URL)?,
        };
        let upload_url = match self.upload_url {
            Some(url) => url,
            None => BaseUrl::new(DEFAULT_UPLOAD_URL)?,
        };

        Ok(BoxConfig {
            access_token,
            base_url,
            upload_url,
            user_agent_prefix: self.user_agent_prefix,
            as_user: self.as_user,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_access_token() {
        let result = BoxConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "access_token"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = BoxConfig::builder()
            .access_token(AccessToken::new("token").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
        assert_eq!(config.upload_url().as_ref(), DEFAULT_UPLOAD_URL);
        assert!(config.user_agent_prefix().is_none());
        assert!(config.as_user().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = BoxConfig::builder()
            .access_token(AccessToken::new("token").unwrap())
            .base_url(BaseUrl::new("http://localhost:9000/api").unwrap())
            .upload_url(BaseUrl::new("http://localhost:9000/upload").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .as_user("12345")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "http://localhost:9000/api/");
        assert_eq!(config.upload_url().as_ref(), "http://localhost:9000/upload/");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.as_user(), Some("12345"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_debug_does_not_leak_token() {
        let config = BoxConfig::builder()
            .access_token(AccessToken::new("super-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("BoxConfig"));
        assert!(!debug_str.contains("super-secret"));
    }
}
