//! Client configuration types.

use std::time::Duration;

/// Default Property Validation API base url.
pub const DEFAULT_BASE_URL: &str = "https://api.bentley.com/validation";
/// Default Property Validation API version, sent in the `Accept` header.
pub const DEFAULT_API_VERSION: &str = "itwin-platform.v1";
/// Default iModels API base url, used to look up named versions.
pub const DEFAULT_IMODELS_BASE_URL: &str = "https://api.bentley.com/imodels";
/// Default iModels API version.
pub const DEFAULT_IMODELS_API_VERSION: &str = "itwin-platform.v2";

/// Top-level configuration for [`PropertyValidationClient`](crate::PropertyValidationClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Property Validation API base url, without a trailing slash.
    pub base_url: String,
    /// API version, sent as `Accept: application/vnd.bentley.<version>+json`.
    pub api_version: String,
    /// iModels API base url, without a trailing slash.
    pub imodels_base_url: String,
    pub imodels_api_version: String,
    /// Per-request timeout applied by the HTTP transport.
    pub request_timeout: Duration,
    /// Delay between status checks while waiting for a run to finish.
    pub run_poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            imodels_base_url: DEFAULT_IMODELS_BASE_URL.to_string(),
            imodels_api_version: DEFAULT_IMODELS_API_VERSION.to_string(),
            request_timeout: Duration::from_secs(30),
            run_poll_interval: Duration::from_secs(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.bentley.com/validation");
        assert_eq!(config.api_version, "itwin-platform.v1");
        assert_eq!(config.imodels_base_url, "https://api.bentley.com/imodels");
        assert_eq!(config.imodels_api_version, "itwin-platform.v2");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.run_poll_interval, Duration::from_secs(2));
    }
}
