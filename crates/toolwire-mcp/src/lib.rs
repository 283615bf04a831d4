//! Toolwire MCP endpoint — JSON-RPC tool invocation over line-delimited stdio.

pub mod config;
pub mod protocol;
pub mod repl;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::EndpointConfig;
pub use protocol::ProtocolHandler;
pub use tools::ToolRegistry;
pub use transport::StdioTransport;
