/// JSON-RPC error codes used by the gateway.
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const BACKEND_ERROR: i32 = -32000;
}

/// Core error type for the gateway.
///
/// Every variant maps to exactly one JSON-RPC error code via [`Error::code`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Parse error")]
    Parse,

    #[error("Invalid Request")]
    InvalidRequest,

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0}")]
    InvalidParams(String),

    /// The backend answered with a status >= 400.
    #[error("Backend error ({status}): {body}")]
    Backend { status: u16, body: String },

    /// The backend could not be reached or did not answer in time.
    #[error("Backend request failed: {0}")]
    Transport(String),
}

impl Error {
    /// The JSON-RPC error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::Parse => codes::PARSE_ERROR,
            Self::InvalidRequest => codes::INVALID_REQUEST,
            Self::MethodNotFound(_) => codes::METHOD_NOT_FOUND,
            Self::UnknownTool(_) | Self::InvalidParams(_) => codes::INVALID_PARAMS,
            Self::Backend { .. } | Self::Transport(_) => codes::BACKEND_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_taxonomy() {
        assert_eq!(Error::Parse.code(), -32700);
        assert_eq!(Error::InvalidRequest.code(), -32600);
        assert_eq!(Error::MethodNotFound("x".into()).code(), -32601);
        assert_eq!(Error::UnknownTool("x".into()).code(), -32602);
        assert_eq!(Error::InvalidParams("x".into()).code(), -32602);
        assert_eq!(
            Error::Backend {
                status: 500,
                body: "boom".into()
            }
            .code(),
            -32000
        );
        assert_eq!(Error::Transport("refused".into()).code(), -32000);
    }

    #[test]
    fn backend_message_carries_diagnostic() {
        let err = Error::Backend {
            status: 502,
            body: "{\"error\":\"upstream\"}".into(),
        };
        assert_eq!(err.to_string(), "Backend error (502): {\"error\":\"upstream\"}");
    }
}
