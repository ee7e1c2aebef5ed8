//! Tools the model can call from a tool loop.
//!
//! A [`Tool`] has a name, a [`ToolSpec`] (sent to the model so it knows the tool
//! exists and what arguments it takes) and an async `call`. [`ToolRegistry`] maps names to
//! tools for `ToolsNode`. [`FnTool`] adapts a closure; [`Calculator`] is a built-in
//! arithmetic tool.

mod calculator;
mod fn_tool;
mod registry;

pub use calculator::{evaluate, Calculator, TOOL_CALCULATOR};
pub use fn_tool::FnTool;
pub use registry::ToolRegistry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Tool specification sent to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    /// Human-readable description for the model.
    pub description: String,
    /// JSON Schema for the arguments object.
    pub input_schema: Value,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Errors from calling a tool. `ToolsNode` turns these into error tool messages; they
/// never abort a run.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ToolError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("tool failed: {0}")]
    Failed(String),
}

/// A callable tool.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn spec(&self) -> ToolSpec;

    /// Runs the tool with the model-supplied arguments and returns result text.
    async fn call(&self, args: Value) -> Result<String, ToolError>;
}

/// Reads a required string argument from a JSON object.
pub fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidInput(format!("missing string argument `{}`", key)))
}
