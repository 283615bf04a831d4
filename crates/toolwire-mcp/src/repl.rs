//! Interactive REPL for the toolwire endpoint.
//!
//! Launch with `toolwire-mcp repl` to enter interactive mode.
//! Type `/help` for available commands, Tab for completion.

use std::sync::Arc;

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Editor, Helper};
use serde_json::{Map, Value};

use toolwire::{Content, ToolCatalog, ToolError};

use crate::config::EndpointConfig;
use crate::types::MCP_VERSION;

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/info", "Show server identity and protocol version"),
    ("/tools", "List enabled tools"),
    ("/schema", "Show a tool's input schema"),
    ("/call", "Call a tool: /call add a=2 b=3"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the REPL"),
];

/// REPL helper for tab completion.
struct ToolHelper {
    tool_names: Vec<String>,
}

impl Completer for ToolHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<16} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        // Tool name completion
        let parts: Vec<&str> = input.splitn(2, ' ').collect();
        let cmd = parts[0];
        let args = if parts.len() > 1 { parts[1] } else { "" };

        if (cmd == "/call" || cmd == "/schema") && !args.contains(' ') {
            let prefix_start = input.len() - args.len();
            let matches: Vec<Pair> = self
                .tool_names
                .iter()
                .filter(|name| name.starts_with(args))
                .map(|name| Pair {
                    display: name.clone(),
                    replacement: format!("{name} "),
                })
                .collect();
            return Ok((prefix_start, matches));
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for ToolHelper {
    type Hint = String;
}

impl Highlighter for ToolHelper {}
impl Validator for ToolHelper {}
impl Helper for ToolHelper {}

/// Run the interactive REPL against an already-built catalog.
pub fn run(catalog: Arc<ToolCatalog>, config: &EndpointConfig) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1m{} v{}\x1b[0m \x1b[90m\u{2014} {} tool(s) enabled\x1b[0m",
        config.server_name,
        config.server_version,
        catalog.len()
    );
    eprintln!();
    eprintln!(
        "    Press \x1b[36m/\x1b[0m to browse commands, \x1b[90mTab\x1b[0m to complete, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let rl_config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .build();

    let mut rl: Editor<ToolHelper, DefaultHistory> = Editor::with_config(rl_config)?;
    rl.set_helper(Some(ToolHelper {
        tool_names: catalog.names().into_iter().map(str::to_string).collect(),
    }));

    let hist_path = std::env::var_os("HOME")
        .map(|home| std::path::PathBuf::from(home).join(".toolwire_mcp_history"));
    if let Some(path) = hist_path.as_deref() {
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline(" \x1b[36mtools>\x1b[0m ") {
            Ok(line) => {
                if !dispatch(line.trim(), &catalog, config) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    if let Some(path) = hist_path.as_deref() {
        let _ = rl.save_history(path);
    }

    Ok(())
}

/// Run one REPL line. Returns `false` when the session should end.
fn dispatch(line: &str, catalog: &ToolCatalog, config: &EndpointConfig) -> bool {
    if line.is_empty() {
        return true;
    }

    let input = line.strip_prefix('/').unwrap_or(line);
    let (cmd, args) = input.split_once(' ').unwrap_or((input, ""));
    let args = args.trim();

    match cmd {
        "exit" | "quit" => return false,
        "" | "help" | "h" | "?" => cmd_help(),
        "clear" | "cls" => eprint!("\x1b[2J\x1b[H"),
        "info" => cmd_info(config),
        "tools" => cmd_tools(catalog),
        "schema" => cmd_schema(args, catalog),
        "call" => cmd_call(args, catalog),
        _ => eprintln!("  Unknown command '/{cmd}'. Type /help for commands."),
    }
    true
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<18} {desc}");
    }
    eprintln!();
    eprintln!("  Tip: values are parsed as JSON when possible, so a=2 is a number and a=\"2\" a string.");
    eprintln!();
}

fn cmd_info(config: &EndpointConfig) {
    eprintln!();
    eprintln!("  Server:   {} v{}", config.server_name, config.server_version);
    eprintln!("  Protocol: {MCP_VERSION}");
    eprintln!("  Tools:    {}", config.tools.join(", "));
    eprintln!();
}

fn cmd_tools(catalog: &ToolCatalog) {
    eprintln!();
    eprintln!("  {} tools available:", catalog.len());
    eprintln!();
    for tool in catalog.descriptors() {
        eprintln!("    {:<16} {}", tool.name, tool.description);
    }
    eprintln!();
}

fn cmd_schema(args: &str, catalog: &ToolCatalog) {
    let name = args.split_whitespace().next().unwrap_or("");
    match catalog.get(name) {
        Some(tool) => match serde_json::to_string_pretty(&tool.input_schema) {
            Ok(schema) => eprintln!("{schema}"),
            Err(e) => eprintln!("  Cannot render schema: {e}"),
        },
        None => eprintln!("  Usage: /schema <tool>  (known: {})", catalog.names().join(", ")),
    }
}

fn cmd_call(args: &str, catalog: &ToolCatalog) {
    let mut parts = args.splitn(2, ' ');
    let name = parts.next().unwrap_or("");
    if name.is_empty() {
        eprintln!("  Usage: /call <tool> key=value ...");
        return;
    }

    let arguments = match parse_call_args(parts.next().unwrap_or("")) {
        Ok(arguments) => arguments,
        Err(e) => {
            eprintln!("  {e}");
            return;
        }
    };

    match catalog.call(name, Some(&arguments)) {
        Ok(output) => {
            for item in output.content {
                let Content::Text { text } = item;
                eprintln!("  {text}");
            }
        }
        Err(ToolError::UnknownTool(name)) => {
            eprintln!("  Unknown tool '{name}'. Type /tools for the list.");
        }
        Err(e) => eprintln!("  \x1b[31mError:\x1b[0m {e}"),
    }
}

/// Turn `a=2 b=3 text=hello` into a JSON object.
///
/// Values that parse as JSON keep their JSON type; anything else is a string.
pub fn parse_call_args(input: &str) -> Result<Value, String> {
    let mut map = Map::new();
    for pair in input.split_whitespace() {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("Expected key=value, got '{pair}'"))?;
        if key.is_empty() {
            return Err(format!("Missing argument name in '{pair}'"));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        map.insert(key.to_string(), value);
    }
    Ok(Value::Object(map))
}
