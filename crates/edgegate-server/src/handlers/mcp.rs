use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::Instrument;

use edgegate_core::{BackendCall, Error};
use edgegate_mcp::{JsonRpcRequest, JsonRpcResponse, Payload, ToolRegistry, ToolScope};

use crate::app_state::AppState;

const PROTOCOL_VERSION: &str = "2024-11-05";

/// Body of a JSON-RPC HTTP response: one response, or one per batch element.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Single(JsonRpcResponse),
    Batch(Vec<JsonRpcResponse>),
}

/// JSON-RPC over the full tool set (`/mcp`, `/mcp/call`).
pub async fn mcp_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Reply> {
    handle(&state, ToolScope::All, &headers, &body).await
}

/// JSON-RPC over the non-mutating tools (`/read`).
pub async fn read_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Reply> {
    handle(&state, ToolScope::Read, &headers, &body).await
}

/// JSON-RPC over the mutating tools (`/write`).
pub async fn write_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Reply> {
    handle(&state, ToolScope::Write, &headers, &body).await
}

async fn handle(
    state: &AppState,
    scope: ToolScope,
    headers: &HeaderMap,
    body: &[u8],
) -> Json<Reply> {
    let span = tracing::info_span!("mcp", request_id = %uuid::Uuid::new_v4(), scope = ?scope);
    let bearer = bearer_token(headers);

    let reply = async {
        match Payload::parse(body) {
            Err(err) => {
                tracing::debug!("rejecting unparseable body");
                Reply::Single(JsonRpcResponse::from_error(Value::Null, &err))
            }
            Ok(Payload::Single(message)) => {
                Reply::Single(handle_message(state, scope, bearer, message).await)
            }
            Ok(Payload::Batch(messages)) if messages.is_empty() => {
                Reply::Single(JsonRpcResponse::from_error(Value::Null, &Error::InvalidRequest))
            }
            Ok(Payload::Batch(messages)) => {
                tracing::debug!(size = messages.len(), "handling batch");
                let mut responses = Vec::with_capacity(messages.len());
                for message in messages {
                    responses.push(handle_message(state, scope, bearer, message).await);
                }
                Reply::Batch(responses)
            }
        }
    }
    .instrument(span)
    .await;

    Json(reply)
}

/// Caller credential from an `Authorization: Bearer ...` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn handle_message(
    state: &AppState,
    scope: ToolScope,
    bearer: Option<&str>,
    message: Value,
) -> JsonRpcResponse {
    let req = match JsonRpcRequest::from_value(message) {
        Ok(req) => req,
        Err((id, err)) => return JsonRpcResponse::from_error(id, &err),
    };

    let result = match req.method.as_str() {
        "initialize" => Ok(handle_initialize()),
        "tools/list" => Ok(serde_json::json!({ "tools": ToolRegistry::definitions(scope) })),
        "tools/call" => handle_tools_call(state, scope, bearer, req.params).await,
        "ping" | "notifications/initialized" => Ok(serde_json::json!({})),
        other => Err(Error::MethodNotFound(other.to_string())),
    };

    match result {
        Ok(value) => JsonRpcResponse::success(req.id, value),
        Err(err) => JsonRpcResponse::from_error(req.id, &err),
    }
}

fn handle_initialize() -> Value {
    serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": "edgegate",
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

async fn handle_tools_call(
    state: &AppState,
    scope: ToolScope,
    bearer: Option<&str>,
    params: Option<Value>,
) -> Result<Value, Error> {
    let Some(Value::Object(mut params)) = params else {
        return Err(Error::InvalidParams("Missing params".to_string()));
    };

    let Some(Value::String(tool_name)) = params.remove("name") else {
        return Err(Error::InvalidParams("Missing tool name".to_string()));
    };

    let spec = ToolRegistry::lookup(&tool_name, scope)
        .ok_or_else(|| Error::UnknownTool(tool_name.clone()))?;

    let arguments = match params.remove("arguments") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(arguments)) => arguments,
        Some(_) => {
            return Err(Error::InvalidParams(
                "Tool arguments must be an object".to_string(),
            ))
        }
    };

    if let Some(field) = spec.missing_argument(&arguments) {
        return Err(Error::InvalidParams(format!(
            "Missing required argument: {field}"
        )));
    }

    let call = BackendCall::new(
        spec.endpoint,
        arguments,
        &state.config.default_account_id,
        bearer.map(ToString::to_string),
    );

    tracing::info!(tool = spec.name, endpoint = spec.endpoint, "forwarding tool call");

    let reply = state.backend.invoke(call).await.inspect_err(|err| {
        tracing::warn!(tool = spec.name, error = %err, "backend call failed");
    })?;

    Ok(serde_json::json!({
        "content": [{
            "type": "text",
            "text": reply.into_text()
        }]
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn bearer_from_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn initialize_descriptor() {
        let result = handle_initialize();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "edgegate");
        assert!(result["capabilities"]["tools"].is_object());
    }
}
