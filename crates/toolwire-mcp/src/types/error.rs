//! Error types and JSON-RPC error codes for the endpoint.

use serde_json::Value;

use super::message::{JsonRpcError, JsonRpcErrorObject, RequestId};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Server error range: request arrived before the handshake.
    pub const SERVER_NOT_INITIALIZED: i32 = -32002;
}

/// All errors that can occur in the endpoint.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// `tools/call` named a tool that is not in the catalog.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Server not initialized: {0}")]
    NotInitialized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        match self {
            McpError::ParseError(_) | McpError::Json(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) | McpError::ToolNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::NotInitialized(_) => SERVER_NOT_INITIALIZED,
            McpError::InternalError(_) | McpError::Config(_) | McpError::Io(_) => INTERNAL_ERROR,
        }
    }

    /// The fixed message carried on the wire for this error's code.
    pub fn wire_message(&self) -> &'static str {
        use error_codes::*;
        match self.code() {
            PARSE_ERROR => "Parse error",
            INVALID_REQUEST => "Invalid Request",
            METHOD_NOT_FOUND => "Method not found",
            INVALID_PARAMS => "Invalid params",
            SERVER_NOT_INITIALIZED => "Server not initialized",
            _ => "Internal error",
        }
    }

    /// Detail attached as `error.data`. Lookup failures carry none.
    fn data(&self) -> Option<Value> {
        match self {
            McpError::MethodNotFound(_) | McpError::ToolNotFound(_) => None,
            McpError::ParseError(detail)
            | McpError::InvalidRequest(detail)
            | McpError::InvalidParams(detail)
            | McpError::InternalError(detail)
            | McpError::NotInitialized(detail)
            | McpError::Config(detail) => Some(Value::String(detail.clone())),
            McpError::Io(e) => Some(Value::String(e.to_string())),
            McpError::Json(e) => Some(Value::String(e.to_string())),
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError::new(
            id,
            JsonRpcErrorObject {
                code: self.code(),
                message: self.wire_message().to_string(),
                data: self.data(),
            },
        )
    }
}

pub type McpResult<T> = Result<T, McpError>;
