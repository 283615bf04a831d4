//! Core data types for tool descriptors and tool output.

use serde::{Deserialize, Serialize};

use crate::number::canonical_decimal;
use crate::schema::InputSchema;

/// Static metadata advertised for a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

impl ToolDescriptor {
    pub fn new(name: &str, description: &str, input_schema: InputSchema) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// A single item of tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Output produced by one successful tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<Content>,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
        }
    }

    /// Render a numeric result as a single text item in canonical decimal form.
    pub fn number(value: f64) -> ToolResult {
        canonical_decimal(value)
            .map(Self::text)
            .ok_or_else(|| ToolError::Failed(format!("result is not a finite number: {value}")))
    }
}

/// Errors raised while validating tool input against a schema.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("arguments must be an object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing required argument `{0}`")]
    MissingArgument(String),

    #[error("argument `{name}` must be of type {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("argument `{0}` is outside the range of a double")]
    OutOfRange(String),

    #[error("argument `{name}` must be one of {allowed:?}, got {value:?}")]
    NotAllowed {
        name: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("malformed schema: {0}")]
    Malformed(String),
}

/// Errors raised while invoking a tool.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] SchemaError),

    #[error("{0}")]
    Failed(String),
}

/// Errors raised while assembling a catalog.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    #[error("Tool name must not be empty")]
    EmptyName,
}

/// Convenience result type for tool handlers.
pub type ToolResult = Result<ToolOutput, ToolError>;
