//! Tensio Tool System
//!
//! Provides the traits and registry through which the analytics crates
//! expose their operations to callers such as the MCP server.

pub mod args;
mod context;
mod registry;
mod traits;

pub use context::ToolContext;
pub use registry::ToolRegistry;
pub use traits::{ArgMeta, ToolMeta, ToolPlugin};

/// Re-export core types for tool authors
pub mod prelude {
    pub use crate::args;
    pub use crate::{ArgMeta, ToolContext, ToolMeta, ToolPlugin, ToolRegistry};
    pub use serde_json::{json, Value as JsonValue};
    pub use tensio_core::prelude::*;
}
