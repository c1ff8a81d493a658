use serde::{Deserialize, Serialize};
use serde_json::Value;

use edgegate_core::Error;

pub use edgegate_core::error::codes::{BACKEND_ERROR, INVALID_REQUEST, METHOD_NOT_FOUND};

/// The only protocol version accepted in the `jsonrpc` field.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC 2.0 request.
///
/// A missing `id` is read as `null`; the response still echoes it.
#[derive(Debug, Clone)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Value,
    pub method: String,
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Validate the envelope of one decoded message.
    ///
    /// On failure the error carries the id to echo: the message's own id when
    /// it is a string, number or null, otherwise `null`.
    pub fn from_value(value: Value) -> Result<Self, (Value, Error)> {
        let Value::Object(mut obj) = value else {
            return Err((Value::Null, Error::InvalidRequest));
        };

        let id = match obj.remove("id") {
            None => Value::Null,
            Some(id @ (Value::Null | Value::String(_) | Value::Number(_))) => id,
            Some(_) => return Err((Value::Null, Error::InvalidRequest)),
        };

        if obj.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err((id, Error::InvalidRequest));
        }

        let Some(Value::String(method)) = obj.remove("method") else {
            return Err((id, Error::InvalidRequest));
        };

        Ok(Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method,
            params: obj.remove("params"),
        })
    }
}

/// A decoded request body: one message or an ordered batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Single(Value),
    Batch(Vec<Value>),
}

impl Payload {
    /// Decode a raw body. Anything that is not JSON is a parse error.
    pub fn parse(body: &[u8]) -> Result<Self, Error> {
        match serde_json::from_slice(body).map_err(|_| Error::Parse)? {
            Value::Array(items) => Ok(Self::Batch(items)),
            other => Ok(Self::Single(other)),
        }
    }
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Create an error response from a gateway error.
    pub fn from_error(id: Value, err: &Error) -> Self {
        Self::error(id, err.code(), err.to_string())
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
