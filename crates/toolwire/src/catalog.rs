//! Immutable tool catalog: descriptors paired with handlers.
//!
//! A catalog is assembled once through [`CatalogBuilder`] and is read-only
//! afterwards. Lookups and invocations never depend on which tools exist,
//! so adding a tool is a matter of registering another descriptor/handler
//! pair.

use std::collections::HashMap;

use serde_json::Value;

use crate::arguments::Arguments;
use crate::types::{CatalogError, ToolDescriptor, ToolError, ToolResult};

/// Handler invoked with validated arguments.
pub type ToolHandler = Box<dyn Fn(&Arguments) -> ToolResult + Send + Sync>;

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: ToolHandler,
}

/// Collects tools in registration order.
#[derive(Default)]
pub struct CatalogBuilder {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names must be non-empty and unique.
    pub fn register<F>(
        mut self,
        descriptor: ToolDescriptor,
        handler: F,
    ) -> Result<Self, CatalogError>
    where
        F: Fn(&Arguments) -> ToolResult + Send + Sync + 'static,
    {
        if descriptor.name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.index.contains_key(&descriptor.name) {
            return Err(CatalogError::DuplicateTool(descriptor.name));
        }

        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler: Box::new(handler),
        });
        Ok(self)
    }

    pub fn build(self) -> ToolCatalog {
        ToolCatalog {
            tools: self.tools,
            index: self.index,
        }
    }
}

/// Read-only table of tools.
pub struct ToolCatalog {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor)
    }

    /// Owned copy of every descriptor, in registration order.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.descriptors().cloned().collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.descriptors().map(|d| d.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i].descriptor)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up `name`, validate `arguments` against its schema, and run it.
    pub fn call(&self, name: &str, arguments: Option<&Value>) -> ToolResult {
        let tool = self
            .index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let args = tool.descriptor.input_schema.validate(arguments)?;
        tracing::debug!("Invoking tool {name} with {} argument(s)", args.len());

        (tool.handler)(&args)
    }
}

impl std::fmt::Debug for ToolCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolCatalog")
            .field("tools", &self.names())
            .finish()
    }
}
