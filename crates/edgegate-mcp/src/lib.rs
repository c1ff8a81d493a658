pub mod jsonrpc;
pub mod tools;

pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, Payload};
pub use tools::{ToolDefinition, ToolRegistry, ToolScope, ToolSpec};
