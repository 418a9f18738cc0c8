//! Client configuration.
//!
//! Everything tunable lives in [`ClientConfig`], built through its
//! [`ClientConfigBuilder`]. The credential is deliberately *not* here: it
//! travels with each [`crate::client::ConversionRequest`], and persisting
//! it between sessions is the calling layer's business.

use crate::error::ConvertError;
use crate::state::DEFAULT_SETTLE_DELAY_MS;

/// Environment variable overriding the service base URL.
pub const BASE_URL_ENV: &str = "SDC_BASE_URL";

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for a [`crate::client::ConversionClient`].
///
/// # Example
/// ```rust
/// use sdc_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("https://converter.internal:8443")
///     .settle_delay_ms(250)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL, without a trailing slash. Default:
    /// `http://localhost:8000`.
    pub base_url: String,

    /// Grace period between an attempt settling and the state reset to
    /// `Idle/0`, in milliseconds. Default: 500.
    ///
    /// Long enough for an observer to render the finished progress bar
    /// before it disappears; shorten it in tests.
    pub settle_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl ClientConfig {
    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Default configuration with the base URL taken from `SDC_BASE_URL`
    /// when set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        config
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn settle_delay_ms(mut self, ms: u64) -> Self {
        self.config.settle_delay_ms = ms;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, ConvertError> {
        let mut config = self.config;
        let trimmed = config.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConvertError::InvalidConfig(
                "base_url must not be empty".into(),
            ));
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ConvertError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got '{trimmed}'"
            )));
        }
        config.base_url = trimmed.to_string();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.settle_delay_ms, 500);
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let config = ClientConfig::builder()
            .base_url("http://converter:9000/")
            .build()
            .unwrap();
        assert_eq!(config.base_url, "http://converter:9000");
    }

    #[test]
    fn builder_rejects_empty_base_url() {
        let err = ClientConfig::builder().base_url("  ").build().unwrap_err();
        assert!(matches!(err, ConvertError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_schemeless_base_url() {
        let err = ClientConfig::builder()
            .base_url("converter:9000")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("http://"), "got: {err}");
    }
}
