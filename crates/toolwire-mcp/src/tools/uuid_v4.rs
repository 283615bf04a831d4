//! Tool: uuid_v4 — Random UUID.

use toolwire::{Arguments, InputSchema, ToolDescriptor, ToolOutput, ToolResult};

pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new("uuid_v4", "Generate a random UUID v4", InputSchema::new())
}

pub fn execute(_args: &Arguments) -> ToolResult {
    Ok(ToolOutput::text(uuid::Uuid::new_v4().to_string()))
}
