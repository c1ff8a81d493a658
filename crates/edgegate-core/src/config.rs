use std::time::Duration;

/// Backend base URL used when none is configured.
pub const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:54321/functions/v1";

/// Tenant used for calls that do not name one.
pub const DEFAULT_ACCOUNT_ID: &str = "7c634307-06b4-48fd-b75a-0b3c8900bf66";

/// Timeout applied to every backend call.
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime configuration for the gateway, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL that tool endpoints are appended to. Never ends in `/`.
    pub backend_base_url: String,
    /// Sent as the `apikey` header, and as the bearer token when the caller has none.
    pub backend_api_key: String,
    pub default_account_id: String,
    pub backend_timeout: Duration,
}

impl GatewayConfig {
    pub fn new(
        backend_base_url: impl Into<String>,
        backend_api_key: impl Into<String>,
        default_account_id: impl Into<String>,
        backend_timeout: Duration,
    ) -> Self {
        let base: String = backend_base_url.into();
        Self {
            backend_base_url: base.trim_end_matches('/').to_string(),
            backend_api_key: backend_api_key.into(),
            default_account_id: default_account_id.into(),
            backend_timeout,
        }
    }

    /// Full URL of a backend function.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.backend_base_url, endpoint)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_BACKEND_BASE_URL,
            "",
            DEFAULT_ACCOUNT_ID,
            DEFAULT_BACKEND_TIMEOUT,
        )
    }
}
