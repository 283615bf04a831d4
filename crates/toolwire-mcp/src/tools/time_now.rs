//! Tool: time_now — Current local time in RFC 3339.

use chrono::SecondsFormat;
use toolwire::{Arguments, InputSchema, ToolDescriptor, ToolOutput, ToolResult};

pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new(
        "time_now",
        "Return current time in RFC3339",
        InputSchema::new(),
    )
}

pub fn execute(_args: &Arguments) -> ToolResult {
    Ok(ToolOutput::text(
        chrono::Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    ))
}
