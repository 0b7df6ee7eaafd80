//! Operation router — registers and dispatches admin operations.
//!
//! Each operation is a function that takes JSON arguments and returns
//! a [`ToolCallResult`]. The router owns the content store and the
//! (optional) generation backend and hands them to the operations.

pub mod enhance;
pub mod inspect;
pub mod lowercase;
pub mod meta;
pub mod replace;
pub mod summarize;

use anyhow::Result;
use tracing::debug;

use crate::ai::TextGenerator;
use crate::server::{ContentItem, ToolCallResult, ToolDefinition};
use crate::store::ContentStore;

/// Dispatches MCP tool calls to operation implementations.
pub struct OpRouter {
    store: Box<dyn ContentStore>,
    /// Absent when no provider/key is configured; AI-backed operations
    /// then fail with a structured message instead of at startup.
    generator: Option<Box<dyn TextGenerator>>,
}

impl OpRouter {
    #[must_use]
    pub fn new(store: Box<dyn ContentStore>, generator: Option<Box<dyn TextGenerator>>) -> Self {
        Self { store, generator }
    }

    /// List all available operations with their JSON Schema definitions.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![
            inspect::tool_definition(),
            lowercase::tool_definition(),
            summarize::tool_definition(),
            enhance::tool_definition(),
            replace::tool_definition(),
            meta::recommendations_definition(),
            meta::apply_definition(),
        ]
    }

    /// Call an operation by name with the given JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns an error only on internal serialization failures;
    /// domain failures come back as `is_error` results.
    pub fn call_tool(&self, name: &str, arguments: serde_json::Value) -> Result<ToolCallResult> {
        debug!(tool = name, "dispatching operation");

        match name {
            "inspect_fields" => inspect::execute(self.store.as_ref(), arguments),
            "lowercase_content" => lowercase::execute(self.store.as_ref(), arguments),
            "summarize_content" => {
                summarize::execute(self.store.as_ref(), self.generator(), arguments)
            }
            "enhance_paragraphs" => {
                enhance::execute(self.store.as_ref(), self.generator(), arguments)
            }
            "replace_text" => replace::execute(self.store.as_ref(), arguments),
            "meta_recommendations" => meta::execute_recommendations(self.store.as_ref(), arguments),
            "apply_meta_recommendation" => meta::execute_apply(self.store.as_ref(), arguments),
            _ => Ok(error_result(format!("Unknown tool: {name}"))),
        }
    }

    fn generator(&self) -> Option<&dyn TextGenerator> {
        self.generator.as_deref()
    }
}

/// A successful text result.
pub(crate) fn text_result(text: impl Into<String>) -> ToolCallResult {
    ToolCallResult {
        content: vec![ContentItem {
            content_type: "text".to_owned(),
            text: text.into(),
        }],
        is_error: false,
    }
}

/// A structured failure result (the operation ran, the domain said no).
pub(crate) fn error_result(text: impl Into<String>) -> ToolCallResult {
    ToolCallResult {
        content: vec![ContentItem {
            content_type: "text".to_owned(),
            text: text.into(),
        }],
        is_error: true,
    }
}

/// A successful result carrying a JSON payload.
pub(crate) fn json_result(payload: &impl serde::Serialize) -> Result<ToolCallResult> {
    Ok(text_result(serde_json::to_string_pretty(payload)?))
}

/// Validate a JSON-supplied item id: positive, or a structured error.
pub(crate) fn require_item_id(raw: i64) -> Result<u64, ToolCallResult> {
    u64::try_from(raw)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| error_result(format!("Error: invalid item id {raw}")))
}
