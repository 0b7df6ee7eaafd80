//! Enhance operation — split the document into paragraph spans and
//! return an AI-rewritten suggestion for each one. The user later
//! applies a chosen pair through `replace_text`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ai::TextGenerator;
use crate::enhance::{enhance_spans, EnhancedSpan};
use crate::error::OptimizerError;
use crate::ops::{error_result, json_result, require_item_id};
use crate::server::{ToolCallResult, ToolDefinition};
use crate::split::split_into_paragraphs;
use crate::store::ContentStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceParams {
    pub item_id: i64,
}

/// Splitting diagnostics returned alongside the suggestions, so a
/// surprising span count can be traced without re-fetching the item.
#[derive(Debug, Serialize)]
struct DebugInfo {
    item_id: u64,
    content_length: usize,
    paragraphs_found: usize,
    content_preview: String,
    paragraphs_preview: Vec<SpanPreview>,
}

#[derive(Debug, Serialize)]
struct SpanPreview {
    index: usize,
    length: usize,
    preview: String,
}

#[derive(Debug, Serialize)]
struct EnhanceOutput {
    paragraphs: Vec<EnhancedSpan>,
    total: usize,
    debug: DebugInfo,
}

/// Return the MCP tool definition for `enhance_paragraphs`.
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "enhance_paragraphs".to_owned(),
        description: "Split the item's content into paragraphs and generate an AI-enhanced \
                      suggestion for each. Returns (original, enhanced) pairs; apply a chosen \
                      pair with replace_text."
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

/// Execute the enhance operation.
///
/// # Errors
///
/// Returns an error only on internal failures. Per-span generation
/// failures are folded into the affected span, not surfaced here.
pub fn execute(
    store: &dyn ContentStore,
    generator: Option<&dyn TextGenerator>,
    arguments: serde_json::Value,
) -> Result<ToolCallResult> {
    let params: EnhanceParams =
        serde_json::from_value(arguments).context("invalid enhance_paragraphs parameters")?;
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

    let spans = split_into_paragraphs(&item.content);
    let debug = DebugInfo {
        item_id: id,
        content_length: item.content.len(),
        paragraphs_found: spans.len(),
        content_preview: preview(&item.content, 200),
        paragraphs_preview: spans
            .iter()
            .take(3)
            .enumerate()
            .map(|(index, span)| SpanPreview {
                index,
                length: span.len(),
                preview: preview(span, 100),
            })
            .collect(),
    };

    if spans.is_empty() {
        return Ok(error_result(format!(
            "Error: no paragraphs found in content\n{}",
            serde_json::to_string_pretty(&debug)?
        )));
    }

    let paragraphs = enhance_spans(generator, &spans);
    let total = paragraphs.len();
    json_result(&EnhanceOutput {
        paragraphs,
        total,
        debug,
    })
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_owned()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
