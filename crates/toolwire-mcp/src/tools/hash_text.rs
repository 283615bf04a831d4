//! Tool: hash_text — Hex digest of a string.

use md5::Md5;
use serde_json::json;
use sha2::{Digest, Sha256};

use toolwire::{Arguments, InputSchema, ParamSpec, ToolDescriptor, ToolOutput, ToolResult};

const ALGORITHMS: &[&str] = &["md5", "sha256"];

pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new(
        "hash_text",
        "Calculate MD5 or SHA256 hash of text",
        InputSchema::new()
            .required("text", ParamSpec::string().describe("Text to hash"))
            .optional(
                "alg",
                ParamSpec::string()
                    .describe("Digest algorithm")
                    .one_of(ALGORITHMS)
                    .with_default(json!("sha256")),
            ),
    )
}

pub fn execute(args: &Arguments) -> ToolResult {
    let text = args.string("text")?;
    let digest = match args.opt_string("alg").unwrap_or("sha256") {
        "md5" => hex::encode(Md5::digest(text.as_bytes())),
        _ => hex::encode(Sha256::digest(text.as_bytes())),
    };
    Ok(ToolOutput::text(digest))
}
