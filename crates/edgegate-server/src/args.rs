use std::time::Duration;

use clap::Parser;

use edgegate_core::config::{DEFAULT_ACCOUNT_ID, DEFAULT_BACKEND_BASE_URL};
use edgegate_core::GatewayConfig;

/// Command-line and environment configuration for the server binary.
#[derive(Debug, Parser)]
#[command(name = "edgegate-server", about = "MCP gateway forwarding tool calls to backend functions")]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "EDGEGATE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "EDGEGATE_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Base URL of the backend functions
    #[arg(long, env = "BACKEND_BASE_URL", default_value = DEFAULT_BACKEND_BASE_URL)]
    pub backend_base_url: String,

    /// API key sent to the backend
    #[arg(long, env = "BACKEND_API_KEY", default_value = "", hide_env_values = true)]
    pub backend_api_key: String,

    /// Account used when a tool call does not name one
    #[arg(long, env = "DEFAULT_ACCOUNT_ID", default_value = DEFAULT_ACCOUNT_ID)]
    pub default_account_id: String,

    /// Timeout for each backend call, in seconds
    #[arg(long, env = "BACKEND_TIMEOUT_SECS", default_value_t = 30)]
    pub backend_timeout_secs: u64,
}

impl ServerArgs {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::new(
            self.backend_base_url.as_str(),
            self.backend_api_key.as_str(),
            self.default_account_id.as_str(),
            Duration::from_secs(self.backend_timeout_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = ServerArgs::parse_from([
            "edgegate-server",
            "--port",
            "9100",
            "--backend-base-url",
            "https://fn.example.test/v1/",
            "--default-account-id",
            "acme",
            "--backend-timeout-secs",
            "5",
        ]);
        assert_eq!(args.bind_addr(), "0.0.0.0:9100");

        let config = args.gateway_config();
        assert_eq!(config.backend_base_url, "https://fn.example.test/v1");
        assert_eq!(config.default_account_id, "acme");
        assert_eq!(config.backend_timeout, Duration::from_secs(5));
    }
}
