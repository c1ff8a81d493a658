use reqwest::Client;
use serde_json::{json, Value};

/// Minimal JSON-RPC client for a gateway endpoint.
pub struct RpcClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl RpcClient {
    pub fn new(base_url: &str, path: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), path),
            token,
        }
    }

    /// Send one request and return its `result`, or fail with the JSON-RPC error.
    pub async fn call(&self, method: &str, params: Value) -> anyhow::Result<Value> {
        let mut request = self.client.post(&self.endpoint).json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(endpoint = %self.endpoint, method, "sending request");

        let resp = request.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await?;
            anyhow::bail!("Gateway returned {status}: {body}");
        }

        let mut body: Value = resp.json().await?;
        if let Some(error) = body.get("error") {
            anyhow::bail!(
                "Error {}: {}",
                error["code"],
                error["message"].as_str().unwrap_or_default()
            );
        }

        Ok(body["result"].take())
    }
}

/// Extract the text of every content block in a `tools/call` result.
pub fn content_text(result: &Value) -> Vec<&str> {
    result["content"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|block| block["text"].as_str())
        .collect()
}
