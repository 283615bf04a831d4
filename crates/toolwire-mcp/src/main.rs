//! Toolwire MCP endpoint — entry point.

use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use toolwire_mcp::config::{EndpointConfig, UnknownMethodPolicy};
use toolwire_mcp::protocol::ProtocolHandler;
use toolwire_mcp::tools::ToolRegistry;
use toolwire_mcp::transport::StdioTransport;
use toolwire_mcp::types::ToolListResult;

#[derive(Parser)]
#[command(
    name = "toolwire-mcp",
    about = "MCP tool endpoint — JSON-RPC tool invocation over line-delimited stdio",
    version
)]
struct Cli {
    /// Tools to enable: names and/or groups (math, utils, all), comma-separated.
    /// Also reads TOOLWIRE_TOOLS. Defaults to "math".
    #[arg(long, global = true)]
    tools: Option<String>,

    /// Server name advertised in the handshake.
    /// Also reads TOOLWIRE_SERVER_NAME.
    #[arg(long, global = true)]
    name: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Reject everything except initialize and ping until the handshake.
    #[arg(long, global = true)]
    require_initialize: bool,

    /// How to answer requests for methods the endpoint does not serve.
    #[arg(long, global = true, value_enum, default_value_t = UnknownMethodPolicy::Strict)]
    unknown_methods: UnknownMethodPolicy,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the endpoint over stdio (default).
    Serve,

    /// Print the handshake descriptor and enabled tools as JSON.
    Info,

    /// Print the tools/list result as JSON.
    Tools,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   toolwire-mcp completions bash > ~/.local/share/bash-completion/completions/toolwire-mcp
    ///   toolwire-mcp completions zsh > ~/.zfunc/_toolwire-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },

    /// Launch interactive REPL mode.
    Repl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = EndpointConfig::resolve(
        cli.tools.as_deref(),
        cli.name.as_deref(),
        cli.require_initialize,
        cli.unknown_methods,
    )?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!(
                "{} v{} starting with tools: {}",
                config.server_name,
                config.server_version,
                config.tools.join(", ")
            );
            let handler = ProtocolHandler::from_config(config)?;
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::Info => {
            let handler = ProtocolHandler::from_config(config)?;
            let server = handler.server_info();
            let info = serde_json::json!({
                "server": server.server_info,
                "protocol_version": server.protocol_version,
                "capabilities": server.capabilities,
                "tools": handler.catalog().names(),
                "tool_count": handler.catalog().len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Tools => {
            let catalog = ToolRegistry::build(&config.tools)?;
            let result = ToolListResult {
                tools: catalog.list(),
                next_cursor: None,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "toolwire-mcp", &mut std::io::stdout());
        }

        Commands::Repl => {
            let catalog = Arc::new(ToolRegistry::build(&config.tools)?);
            toolwire_mcp::repl::run(catalog, &config)?;
        }
    }

    Ok(())
}
