//! Metadata operations — fetch the SEO recommendation payload for an
//! item and apply a chosen recommendation value.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::OptimizerError;
use crate::meta::{
    apply_recommendation, current_meta, generate_recommendations, MetaField, MetaRecommendation,
    SeoMeta,
};
use crate::ops::{error_result, json_result, require_item_id, text_result};
use crate::server::{ToolCallResult, ToolDefinition};
use crate::store::ContentStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsParams {
    pub item_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyParams {
    pub item_id: i64,
    #[serde(rename = "type")]
    pub field: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
struct RecommendationsOutput {
    title: String,
    url: String,
    content: String,
    current_meta: SeoMeta,
    recommendations: MetaRecommendation,
}

/// Return the MCP tool definition for `meta_recommendations`.
pub fn recommendations_definition() -> ToolDefinition {
    ToolDefinition {
        name: "meta_recommendations".to_owned(),
        description: "Return the item's current SEO metadata together with recommended \
                      title, description, and keywords."
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

/// Return the MCP tool definition for `apply_meta_recommendation`.
pub fn apply_definition() -> ToolDefinition {
    ToolDefinition {
        name: "apply_meta_recommendation".to_owned(),
        description: "Store one recommended metadata value (title, description, or \
                      keywords) on the item."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "itemId": { "type": "integer", "description": "Content item id" },
                "type": {
                    "type": "string",
                    "enum": ["title", "description", "keywords"],
                    "description": "Which metadata field to set"
                },
                "value": { "type": "string", "description": "The value to store" }
            },
            "required": ["itemId", "type", "value"]
        }),
    }
}

/// Execute the recommendations operation.
///
/// # Errors
///
/// Returns an error only on serialization failure; unknown items come
/// back as `is_error` results.
pub fn execute_recommendations(
    store: &dyn ContentStore,
    arguments: serde_json::Value,
) -> Result<ToolCallResult> {
    let params: RecommendationsParams =
        serde_json::from_value(arguments).context("invalid meta_recommendations parameters")?;
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

    json_result(&RecommendationsOutput {
        title: item.title.clone(),
        url: format!("/{}", item.slug),
        content: item.content.clone(),
        current_meta: current_meta(&item),
        recommendations: generate_recommendations(&item),
    })
}

/// Execute the apply operation.
///
/// # Errors
///
/// Returns an error only on internal failures; unknown fields, empty
/// values, and unknown items come back as `is_error` results.
pub fn execute_apply(
    store: &dyn ContentStore,
    arguments: serde_json::Value,
) -> Result<ToolCallResult> {
    let params: ApplyParams =
        serde_json::from_value(arguments).context("invalid apply_meta_recommendation parameters")?;
    let id = match require_item_id(params.item_id) {
        Ok(id) => id,
        Err(result) => return Ok(result),
    };

    let field: MetaField = match params.field.parse() {
        Ok(field) => field,
        Err(e) => return Ok(error_result(format!("Error: {e}"))),
    };

    match apply_recommendation(store, id, field, &params.value) {
        Ok(()) => Ok(text_result("Recommendation applied successfully")),
        Err(
            e @ (OptimizerError::InvalidArgument(_)
            | OptimizerError::ItemNotFound { .. }
            | OptimizerError::Persist { .. }),
        ) => Ok(error_result(format!("Error: {e}"))),
        Err(e) => Err(e.into()),
    }
}
