//! Configuration loading and resolution.
//!
//! Every setting resolves as: explicit CLI flag, then environment variable,
//! then built-in default.

use crate::tools::ToolRegistry;
use crate::types::{McpResult, SERVER_NAME, SERVER_VERSION};

/// Environment variable holding the tool selection.
pub const TOOLS_ENV: &str = "TOOLWIRE_TOOLS";
/// Environment variable overriding the advertised server name.
pub const SERVER_NAME_ENV: &str = "TOOLWIRE_SERVER_NAME";
/// Tool selection used when nothing else is configured.
pub const DEFAULT_TOOL_SELECTION: &str = "math";

/// What to do with a request whose method is not served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UnknownMethodPolicy {
    /// Answer with `-32601 Method not found`.
    #[default]
    Strict,
    /// Drop the request without a response.
    Ignore,
}

/// Resolved endpoint settings.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub server_name: String,
    pub server_version: String,
    /// Enabled tool names, in catalog order.
    pub tools: Vec<String>,
    /// Gate everything but `initialize` and `ping` behind the handshake.
    pub require_initialize: bool,
    pub unknown_methods: UnknownMethodPolicy,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            server_name: SERVER_NAME.to_string(),
            server_version: SERVER_VERSION.to_string(),
            tools: ToolRegistry::group_names(DEFAULT_TOOL_SELECTION),
            require_initialize: false,
            unknown_methods: UnknownMethodPolicy::Strict,
        }
    }
}

impl EndpointConfig {
    /// Resolve settings from optional CLI values and the environment.
    pub fn resolve(
        tools: Option<&str>,
        server_name: Option<&str>,
        require_initialize: bool,
        unknown_methods: UnknownMethodPolicy,
    ) -> McpResult<Self> {
        let selection = resolve_tool_selection(tools);
        let tools = ToolRegistry::resolve_selection(&selection)?
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(Self {
            server_name: resolve_server_name(server_name),
            server_version: SERVER_VERSION.to_string(),
            tools,
            require_initialize,
            unknown_methods,
        })
    }
}

/// Resolve the raw tool selection string.
pub fn resolve_tool_selection(explicit: Option<&str>) -> String {
    if let Some(selection) = explicit {
        return selection.to_string();
    }

    if let Ok(env_selection) = std::env::var(TOOLS_ENV) {
        if !env_selection.trim().is_empty() {
            return env_selection;
        }
    }

    DEFAULT_TOOL_SELECTION.to_string()
}

/// Resolve the advertised server name.
pub fn resolve_server_name(explicit: Option<&str>) -> String {
    if let Some(name) = explicit {
        return name.to_string();
    }

    std::env::var(SERVER_NAME_ENV)
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| SERVER_NAME.to_string())
}
