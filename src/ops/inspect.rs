//! Inspect operation — dump every stored field of a content item.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::OptimizerError;
use crate::fields::collect_sections;
use crate::ops::{error_result, json_result, require_item_id};
use crate::server::{ToolCallResult, ToolDefinition};
use crate::store::ContentStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectParams {
    pub item_id: i64,
}

/// Return the MCP tool definition for `inspect_fields`.
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "inspect_fields".to_owned(),
        description: "Dump every stored field of a content item, grouped into sections \
                      (basic info, custom fields, taxonomies, featured image)."
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

/// Execute the inspect operation.
///
/// # Errors
///
/// Returns an error only on serialization failure; unknown items come
/// back as `is_error` results.
pub fn execute(store: &dyn ContentStore, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: InspectParams =
        serde_json::from_value(arguments).context("invalid inspect_fields parameters")?;
    let id = match require_item_id(params.item_id) {
        Ok(id) => id,
        Err(result) => return Ok(result),
    };

    match store.load(id) {
        Ok(item) => json_result(&collect_sections(&item)),
        Err(e @ OptimizerError::ItemNotFound { .. }) => Ok(error_result(format!("Error: {e}"))),
        Err(e) => Err(e.into()),
    }
}
