use async_trait::async_trait;

use crate::error::Error;
use crate::types::{BackendCall, BackendReply};

/// A backend that executes tool calls on behalf of the gateway.
#[async_trait]
pub trait ToolBackend: Send + Sync {
    /// Forward a single call and return the backend's reply.
    ///
    /// Implementations make exactly one attempt. A status >= 400 is reported
    /// as [`Error::Backend`], anything that prevents a response as
    /// [`Error::Transport`].
    async fn invoke(&self, call: BackendCall) -> Result<BackendReply, Error>;
}
