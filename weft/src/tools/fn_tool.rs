use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolError, ToolSpec};

/// Tool backed by a synchronous closure. Good for simulated or pure tools; anything
/// doing I/O should implement [`Tool`] directly.
pub struct FnTool {
    spec: ToolSpec,
    f: Box<dyn Fn(Value) -> Result<String, ToolError> + Send + Sync>,
}

impl FnTool {
    pub fn new<F>(spec: ToolSpec, f: F) -> Self
    where
        F: Fn(Value) -> Result<String, ToolError> + Send + Sync + 'static,
    {
        Self {
            spec,
            f: Box::new(f),
        }
    }
}

#[async_trait]
impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn spec(&self) -> ToolSpec {
        self.spec.clone()
    }

    async fn call(&self, args: Value) -> Result<String, ToolError> {
        (self.f)(args)
    }
}
