//! Tool: multiply — Product of two numbers.

use toolwire::{Arguments, InputSchema, ParamSpec, ToolDescriptor, ToolOutput, ToolResult};

pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new(
        "multiply",
        "Multiply two numbers",
        InputSchema::new()
            .required("a", ParamSpec::number())
            .required("b", ParamSpec::number()),
    )
}

pub fn execute(args: &Arguments) -> ToolResult {
    ToolOutput::number(args.number("a")? * args.number("b")?)
}
