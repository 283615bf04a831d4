//! Built-in tool table and catalog assembly.

use toolwire::{Arguments, ToolCatalog, ToolDescriptor, ToolResult};

use crate::types::{McpError, McpResult};

use super::{add, echo, hash_text, multiply, time_now, upper, uuid_v4};

/// Named group of built-in tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolGroup {
    Math,
    Utils,
}

impl ToolGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolGroup::Math => "math",
            ToolGroup::Utils => "utils",
        }
    }
}

/// A built-in descriptor/handler pair.
pub struct BuiltinTool {
    pub name: &'static str,
    pub group: ToolGroup,
    pub definition: fn() -> ToolDescriptor,
    pub execute: fn(&Arguments) -> ToolResult,
}

const BUILTIN_TOOLS: &[BuiltinTool] = &[
    BuiltinTool {
        name: "add",
        group: ToolGroup::Math,
        definition: add::definition,
        execute: add::execute,
    },
    BuiltinTool {
        name: "multiply",
        group: ToolGroup::Math,
        definition: multiply::definition,
        execute: multiply::execute,
    },
    BuiltinTool {
        name: "echo",
        group: ToolGroup::Utils,
        definition: echo::definition,
        execute: echo::execute,
    },
    BuiltinTool {
        name: "upper",
        group: ToolGroup::Utils,
        definition: upper::definition,
        execute: upper::execute,
    },
    BuiltinTool {
        name: "time_now",
        group: ToolGroup::Utils,
        definition: time_now::definition,
        execute: time_now::execute,
    },
    BuiltinTool {
        name: "hash_text",
        group: ToolGroup::Utils,
        definition: hash_text::definition,
        execute: hash_text::execute,
    },
    BuiltinTool {
        name: "uuid_v4",
        group: ToolGroup::Utils,
        definition: uuid_v4::definition,
        execute: uuid_v4::execute,
    },
];

pub struct ToolRegistry;

impl ToolRegistry {
    pub fn builtins() -> &'static [BuiltinTool] {
        BUILTIN_TOOLS
    }

    /// Names belonging to `group` (`math`, `utils`, or `all`). Unknown groups yield nothing.
    pub fn group_names(group: &str) -> Vec<String> {
        BUILTIN_TOOLS
            .iter()
            .filter(|t| group == "all" || t.group.as_str() == group)
            .map(|t| t.name.to_string())
            .collect()
    }

    /// Parse a comma-separated list of tool and group names.
    ///
    /// The result is deduplicated and ordered like the built-in table, so the
    /// catalog order never depends on how the selection was spelled.
    pub fn resolve_selection(selection: &str) -> McpResult<Vec<&'static str>> {
        let mut wanted = vec![false; BUILTIN_TOOLS.len()];

        for item in selection.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let mut matched = false;
            for (i, tool) in BUILTIN_TOOLS.iter().enumerate() {
                if item == "all" || item == tool.name || item == tool.group.as_str() {
                    wanted[i] = true;
                    matched = true;
                }
            }
            if !matched {
                return Err(McpError::Config(format!(
                    "unknown tool or group `{item}` (available: {}, math, utils, all)",
                    Self::builtin_names().join(", ")
                )));
            }
        }

        let names: Vec<&'static str> = BUILTIN_TOOLS
            .iter()
            .zip(wanted)
            .filter(|(_, on)| *on)
            .map(|(t, _)| t.name)
            .collect();

        if names.is_empty() {
            return Err(McpError::Config("no tools selected".to_string()));
        }
        Ok(names)
    }

    pub fn builtin_names() -> Vec<&'static str> {
        BUILTIN_TOOLS.iter().map(|t| t.name).collect()
    }

    /// Assemble an immutable catalog from enabled tool names.
    pub fn build<S: AsRef<str>>(enabled: &[S]) -> McpResult<ToolCatalog> {
        if let Some(unknown) = enabled
            .iter()
            .map(AsRef::as_ref)
            .find(|name| !BUILTIN_TOOLS.iter().any(|t| t.name == *name))
        {
            return Err(McpError::Config(format!("unknown tool `{unknown}`")));
        }

        let mut builder = ToolCatalog::builder();
        for tool in BUILTIN_TOOLS {
            if enabled.iter().any(|name| name.as_ref() == tool.name) {
                builder = builder
                    .register((tool.definition)(), tool.execute)
                    .map_err(|e| McpError::Config(e.to_string()))?;
            }
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolwire::ToolOutput;

    #[test]
    fn test_definitions_match_table_names() {
        for tool in ToolRegistry::builtins() {
            assert_eq!((tool.definition)().name, tool.name);
        }
    }

    #[test]
    fn test_resolve_groups() {
        assert_eq!(ToolRegistry::resolve_selection("math").unwrap(), vec!["add", "multiply"]);
        assert_eq!(
            ToolRegistry::resolve_selection("utils").unwrap(),
            vec!["echo", "upper", "time_now", "hash_text", "uuid_v4"]
        );
        assert_eq!(ToolRegistry::resolve_selection("all").unwrap().len(), 7);
    }

    #[test]
    fn test_resolve_orders_and_dedupes() {
        assert_eq!(
            ToolRegistry::resolve_selection(" multiply , add,multiply ").unwrap(),
            vec!["add", "multiply"]
        );
    }

    #[test]
    fn test_resolve_errors() {
        assert!(ToolRegistry::resolve_selection("math,divide").is_err());
        assert!(ToolRegistry::resolve_selection(" , ").is_err());
    }

    #[test]
    fn test_build_and_call() {
        let catalog = ToolRegistry::build(&["add", "multiply", "upper"]).unwrap();
        assert_eq!(catalog.names(), vec!["add", "multiply", "upper"]);

        let out = catalog.call("multiply", Some(&json!({ "a": 6, "b": 7 }))).unwrap();
        assert_eq!(out, ToolOutput::text("42"));

        let out = catalog.call("upper", Some(&json!({ "text": "abc" }))).unwrap();
        assert_eq!(out, ToolOutput::text("ABC"));
    }

    #[test]
    fn test_build_unknown() {
        assert!(ToolRegistry::build(&["add", "nope"]).is_err());
    }

    #[test]
    fn test_utility_tools() {
        let catalog = ToolRegistry::build(&["echo", "time_now", "uuid_v4"]).unwrap();

        let out = catalog.call("echo", Some(&json!({ "text": "hi there" }))).unwrap();
        assert_eq!(out, ToolOutput::text("hi there"));

        let out = catalog.call("uuid_v4", None).unwrap();
        let toolwire::Content::Text { text } = &out.content[0];
        assert_eq!(text.len(), 36);
        assert_eq!(text.chars().nth(14), Some('4'));

        let out = catalog.call("time_now", None).unwrap();
        let toolwire::Content::Text { text } = &out.content[0];
        assert!(chrono::DateTime::parse_from_rfc3339(text).is_ok());
    }

    #[test]
    fn test_hash_text() {
        let catalog = ToolRegistry::build(&["hash_text"]).unwrap();

        let out = catalog.call("hash_text", Some(&json!({ "text": "abc" }))).unwrap();
        assert_eq!(
            out,
            ToolOutput::text("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );

        let out = catalog
            .call("hash_text", Some(&json!({ "text": "abc", "alg": "md5" })))
            .unwrap();
        assert_eq!(out, ToolOutput::text("900150983cd24fb0d6963f7d28e17f72"));

        let err = catalog
            .call("hash_text", Some(&json!({ "text": "abc", "alg": "crc32" })))
            .unwrap_err();
        assert!(matches!(err, toolwire::ToolError::InvalidArguments(_)));
    }
}
