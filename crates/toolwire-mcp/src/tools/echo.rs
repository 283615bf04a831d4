//! Tool: echo — Return the input text unchanged.

use toolwire::{Arguments, InputSchema, ParamSpec, ToolDescriptor, ToolOutput, ToolResult};

pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new(
        "echo",
        "Echo the input text",
        InputSchema::new().required("text", ParamSpec::string().describe("Text to echo back")),
    )
}

pub fn execute(args: &Arguments) -> ToolResult {
    Ok(ToolOutput::text(args.string("text")?))
}
