mod health;
mod mcp;
mod sse;

pub use health::{health, HealthStatus};
pub use mcp::{mcp_request, read_request, write_request};
pub use sse::mcp_sse;
