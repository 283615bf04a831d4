//! Tool: upper — Uppercase a string.

use toolwire::{Arguments, InputSchema, ParamSpec, ToolDescriptor, ToolOutput, ToolResult};

pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new(
        "upper",
        "Uppercase a string",
        InputSchema::new().required("text", ParamSpec::string().describe("Text to uppercase")),
    )
}

pub fn execute(args: &Arguments) -> ToolResult {
    Ok(ToolOutput::text(args.string("text")?.to_uppercase()))
}
