//! Summarize operation — generate a 2-3 sentence AI summary of the
//! item's content and append it as a new paragraph block.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::ai::{TaskType, TextGenerator, MAX_PROMPT_BYTES};
use crate::error::OptimizerError;
use crate::ops::{error_result, require_item_id, text_result};
use crate::server::{ToolCallResult, ToolDefinition};
use crate::store::ContentStore;
use crate::text::clean_for_generation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeParams {
    pub item_id: i64,
}

/// Return the MCP tool definition for `summarize_content`.
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "summarize_content".to_owned(),
        description: "Summarize the item's content with the AI backend and append the \
                      summary as a new paragraph block at the end of the document."
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

/// Execute the summarize operation.
///
/// # Errors
///
/// Returns an error only on internal failures; missing configuration,
/// unknown items, generation failures, and persist rejections come
/// back as `is_error` results.
pub fn execute(
    store: &dyn ContentStore,
    generator: Option<&dyn TextGenerator>,
    arguments: serde_json::Value,
) -> Result<ToolCallResult> {
    let params: SummarizeParams =
        serde_json::from_value(arguments).context("invalid summarize_content parameters")?;
    let id = match require_item_id(params.item_id) {
        Ok(id) => id,
        Err(result) => return Ok(result),
    };

    let Some(generator) = generator else {
        return Ok(error_result(format!(
            "Error: {}",
            OptimizerError::BackendNotConfigured
        )));
    };

    let item = match store.load(id) {
        Ok(item) => item,
        Err(e @ OptimizerError::ItemNotFound { .. }) => {
            return Ok(error_result(format!("Error: {e}")))
        }
        Err(e) => return Err(e.into()),
    };

    let clean = clean_for_generation(&item.content, MAX_PROMPT_BYTES);
    let summary = match generator.generate(TaskType::Summarization, &clean) {
        Ok(text) => text,
        Err(e) => return Ok(error_result(format!("AI API Error: {e}"))),
    };

    let escaped = html_escape::encode_safe(&summary);
    let updated = format!(
        "{}\n\n<!-- wp:paragraph -->\n<p><strong>Summary:</strong> {escaped}</p>\n<!-- /wp:paragraph -->",
        item.content
    );

    if let Err(e) = store.save_content(id, &updated) {
        return Ok(error_result(format!("Error: failed to update item: {e}")));
    }

    Ok(text_result(
        "Item has been summarized and updated successfully",
    ))
}
