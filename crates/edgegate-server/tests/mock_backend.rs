use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use edgegate_core::{BackendCall, BackendReply, Error, ToolBackend};

/// In-memory backend that records every call and replies with a fixed outcome.
pub struct MockBackend {
    calls: Mutex<Vec<BackendCall>>,
    outcome: Result<BackendReply, Error>,
}

impl MockBackend {
    pub fn replying(value: Value) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Ok(BackendReply::Json(value)),
        }
    }

    pub fn failing(err: Error) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Err(err),
        }
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolBackend for MockBackend {
    async fn invoke(&self, call: BackendCall) -> Result<BackendReply, Error> {
        self.calls.lock().unwrap().push(call);
        self.outcome.clone()
    }
}
