//! Built-in tool implementations.

pub mod add;
pub mod echo;
pub mod hash_text;
pub mod multiply;
pub mod registry;
pub mod time_now;
pub mod upper;
pub mod uuid_v4;

pub use registry::ToolRegistry;
