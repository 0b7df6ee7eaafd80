//! Replace operation — the core text substitution. Parses the stored
//! document into a block tree, fuzzily locates the block carrying the
//! original text, rewrites it, and persists the re-serialized tree.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::blocks::{parse, replace_blocks, serialize, ReplacementRequest};
use crate::error::OptimizerError;
use crate::ops::{error_result, json_result, require_item_id};
use crate::server::{ToolCallResult, ToolDefinition};
use crate::store::ContentStore;
use crate::util::diff::content_diff;

const PREVIEW_CHARS: usize = 300;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceParams {
    pub item_id: i64,
    pub original_text: String,
    pub enhanced_text: String,
}

#[derive(Debug, Serialize)]
struct ReplaceOutput {
    replaced: usize,
    preview: String,
    diff: String,
}

/// Return the MCP tool definition for `replace_text`.
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "replace_text".to_owned(),
        description: "Replace a text passage inside the item's block structure. Matching is \
                      tolerant of entity, whitespace, dash, and quote differences; block \
                      wrappers and attributes are preserved."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "itemId": { "type": "integer", "description": "Content item id" },
                "originalText": {
                    "type": "string",
                    "description": "The passage to locate, as returned by enhance_paragraphs"
                },
                "enhancedText": {
                    "type": "string",
                    "description": "The replacement text"
                }
            },
            "required": ["itemId", "originalText", "enhancedText"]
        }),
    }
}

/// Execute the replace operation.
///
/// Argument validation happens before the item is fetched; a zero
/// match count leaves the stored document untouched.
///
/// # Errors
///
/// Returns an error only on internal failures; bad arguments, unknown
/// items, unmatched text, and persist rejections come back as
/// `is_error` results.
pub fn execute(store: &dyn ContentStore, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: ReplaceParams =
        serde_json::from_value(arguments).context("invalid replace_text parameters")?;
    let id = match require_item_id(params.item_id) {
        Ok(id) => id,
        Err(result) => return Ok(result),
    };
    if params.original_text.trim().is_empty() {
        return Ok(error_result("Error: originalText must not be empty"));
    }
    if params.enhanced_text.trim().is_empty() {
        return Ok(error_result("Error: enhancedText must not be empty"));
    }

    let item = match store.load(id) {
        Ok(item) => item,
        Err(e @ OptimizerError::ItemNotFound { .. }) => {
            return Ok(error_result(format!("Error: {e}")))
        }
        Err(e) => return Err(e.into()),
    };

    let mut blocks = parse(&item.content);
    let request = ReplacementRequest {
        original_text: params.original_text,
        enhanced_text: params.enhanced_text,
    };
    let replaced = replace_blocks(&mut blocks, &request);
    if replaced == 0 {
        return Ok(error_result(format!(
            "Error: {}",
            OptimizerError::NoBlockMatched { id }
        )));
    }

    let updated = serialize(&blocks);
    if let Err(e) = store.save_content(id, &updated) {
        return Ok(error_result(format!("Error: failed to update item: {e}")));
    }

    let preview: String = updated.chars().take(PREVIEW_CHARS).collect();
    json_result(&ReplaceOutput {
        replaced,
        preview,
        diff: content_diff(id, &item.content, &updated),
    })
}
