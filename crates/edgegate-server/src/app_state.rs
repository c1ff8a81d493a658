use std::sync::Arc;

use edgegate_core::{GatewayConfig, ToolBackend};

/// Shared application state with injected dependencies.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn ToolBackend>,
    pub config: Arc<GatewayConfig>,
}
