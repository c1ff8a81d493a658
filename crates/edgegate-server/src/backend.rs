use std::sync::Arc;

use async_trait::async_trait;

use edgegate_core::{BackendCall, BackendReply, Error, GatewayConfig, ToolBackend};

/// Header carrying the backend API key on every call.
pub const API_KEY_HEADER: &str = "apikey";

/// Forwards tool calls as JSON POSTs to `{backend_base_url}/{endpoint}`.
pub struct HttpBackend {
    client: reqwest::Client,
    config: Arc<GatewayConfig>,
}

impl HttpBackend {
    /// Build a backend with one pooled client using the configured timeout.
    #[allow(clippy::missing_errors_doc)]
    pub fn new(config: Arc<GatewayConfig>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.backend_timeout)
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ToolBackend for HttpBackend {
    async fn invoke(&self, call: BackendCall) -> Result<BackendReply, Error> {
        let url = self.config.endpoint_url(&call.endpoint);
        let api_key = &self.config.backend_api_key;
        let bearer = call.bearer.as_deref().unwrap_or(api_key);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .bearer_auth(bearer)
            .json(&call.arguments)
            .send()
            .await
            .map_err(|e| transport_error(&url, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&url, &e))?;

        tracing::debug!(%url, status = status.as_u16(), "backend responded");

        if status.as_u16() >= 400 {
            return Err(Error::Backend {
                status: status.as_u16(),
                body,
            });
        }

        Ok(BackendReply::from_body(body))
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Transport(format!("{url} timed out"))
    } else {
        Error::Transport(err.to_string())
    }
}
