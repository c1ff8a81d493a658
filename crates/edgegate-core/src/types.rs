use serde_json::{Map, Value};

/// Argument field that scopes a call to a tenant's data partition.
pub const ACCOUNT_FIELD: &str = "account_id";

/// A single tool call on its way to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendCall {
    /// Path segment of the backend function, e.g. `ai-metrics-query`.
    pub endpoint: String,
    /// Tool arguments, sent verbatim as the JSON body.
    pub arguments: Map<String, Value>,
    /// Bearer credential supplied by the caller, if any.
    pub bearer: Option<String>,
}

impl BackendCall {
    /// Build a call, filling in `account_id` when the caller left it out.
    pub fn new(
        endpoint: impl Into<String>,
        mut arguments: Map<String, Value>,
        default_account_id: &str,
        bearer: Option<String>,
    ) -> Self {
        inject_account_id(&mut arguments, default_account_id);
        Self {
            endpoint: endpoint.into(),
            arguments,
            bearer,
        }
    }
}

/// A successful backend reply.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendReply {
    Json(Value),
    Text(String),
}

impl BackendReply {
    /// Interpret a raw response body: JSON when it parses, opaque text otherwise.
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(body),
        }
    }

    /// Text handed back to the caller inside the tool content block.
    pub fn into_text(self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text,
        }
    }
}

/// Set `account_id` to `default` when it is missing, null or an empty string.
pub fn inject_account_id(arguments: &mut Map<String, Value>, default: &str) {
    let present = match arguments.get(ACCOUNT_FIELD) {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    };
    if !present {
        arguments.insert(ACCOUNT_FIELD.to_string(), Value::String(default.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn missing_account_is_filled() {
        let mut a = args(json!({"metric_type": "email"}));
        inject_account_id(&mut a, "tenant-default");
        assert_eq!(a[ACCOUNT_FIELD], "tenant-default");
        assert_eq!(a["metric_type"], "email");
    }

    #[test]
    fn empty_or_null_account_is_filled() {
        let mut a = args(json!({"account_id": ""}));
        inject_account_id(&mut a, "tenant-default");
        assert_eq!(a[ACCOUNT_FIELD], "tenant-default");

        let mut b = args(json!({"account_id": null}));
        inject_account_id(&mut b, "tenant-default");
        assert_eq!(b[ACCOUNT_FIELD], "tenant-default");
    }

    #[test]
    fn supplied_account_wins() {
        let call = BackendCall::new(
            "ai-goals-status",
            args(json!({"account_id": "acme"})),
            "tenant-default",
            None,
        );
        assert_eq!(call.arguments[ACCOUNT_FIELD], "acme");
        assert_eq!(call.endpoint, "ai-goals-status");
    }

    #[test]
    fn reply_body_parsing() {
        assert_eq!(
            BackendReply::from_body(r#"{"ok":true}"#.to_string()),
            BackendReply::Json(json!({"ok": true}))
        );
        assert_eq!(
            BackendReply::from_body("plain text".to_string()),
            BackendReply::Text("plain text".to_string())
        );
    }

    #[test]
    fn reply_text_is_compact_json() {
        let reply = BackendReply::Json(json!({"leads": 12}));
        assert_eq!(reply.into_text(), r#"{"leads":12}"#);
    }
}
