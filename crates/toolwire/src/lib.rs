//! Toolwire — core library for declaring, validating, and invoking tools.

pub mod arguments;
pub mod catalog;
pub mod number;
pub mod schema;
pub mod types;

pub use arguments::Arguments;
pub use catalog::{CatalogBuilder, ToolCatalog, ToolHandler};
pub use number::canonical_decimal;
pub use schema::{InputSchema, ParamSpec, ParamType};
pub use types::*;
