//! Lowercase operation — rewrite the whole stored document in
//! lowercase. The simplest of the content mutations, mostly useful as
//! a plumbing check for the fetch-mutate-persist path.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::OptimizerError;
use crate::ops::{error_result, require_item_id, text_result};
use crate::server::{ToolCallResult, ToolDefinition};
use crate::store::ContentStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowercaseParams {
    pub item_id: i64,
}

/// Return the MCP tool definition for `lowercase_content`.
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "lowercase_content".to_owned(),
        description: "Convert the entire stored content of an item to lowercase and persist it."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "itemId": { "type": "integer", "description": "Content item id" }
            },
            "required": ["itemId"]
        }),
    }
}

/// Execute the lowercase operation.
///
/// # Errors
///
/// Returns an error only on internal failures; unknown items and
/// persist rejections come back as `is_error` results.
pub fn execute(store: &dyn ContentStore, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: LowercaseParams =
        serde_json::from_value(arguments).context("invalid lowercase_content parameters")?;
    let id = match require_item_id(params.item_id) {
        Ok(id) => id,
        Err(result) => return Ok(result),
    };

    let item = match store.load(id) {
        Ok(item) => item,
        Err(e @ OptimizerError::ItemNotFound { .. }) => {
            return Ok(error_result(format!("Error: {e}")))
        }
        Err(e) => return Err(e.into()),
    };

    let lowered = item.content.to_lowercase();
    if let Err(e) = store.save_content(id, &lowered) {
        return Ok(error_result(format!("Error: failed to update item: {e}")));
    }

    Ok(text_result("Item content has been modified successfully"))
}
