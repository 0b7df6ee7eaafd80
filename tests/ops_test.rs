//! MCP protocol and operation integration tests.
//!
//! Exercises the JSON-RPC 2.0 protocol types and the operation router
//! end to end against file-backed and in-memory stores, with a fake
//! generation backend standing in for the HTTP client.

use serde_json::json;

use seo_optimizer::ai::{TaskType, TextGenerator};
use seo_optimizer::ops::OpRouter;
use seo_optimizer::store::{sample_item, ContentStore, FileStore, MemoryStore};
use seo_optimizer::OptimizerResult;

/// Deterministic backend: prefixes enhancement input, returns a fixed
/// summary, and fails on content containing "poison".
struct FakeGenerator;

impl TextGenerator for FakeGenerator {
    fn generate(&self, task: TaskType, content: &str) -> OptimizerResult<String> {
        if content.contains("poison") {
            return Err(seo_optimizer::OptimizerError::Generation(
                "backend unavailable".to_owned(),
            ));
        }
        match task {
            TaskType::Enhancement => Ok(format!("improved: {content}")),
            TaskType::Summarization => Ok("A concise summary with <tags> & ampersands.".to_owned()),
        }
    }
}

fn file_router(dir: &tempfile::TempDir) -> OpRouter {
    OpRouter::new(
        Box::new(FileStore::new(dir.path().to_path_buf())),
        Some(Box::new(FakeGenerator)),
    )
}

// ---------------------------------------------------------------------------
// JSON-RPC protocol types
// ---------------------------------------------------------------------------

#[test]
fn test_json_rpc_request_parsing() {
    let req_json = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2025-06-18",
            "capabilities": {},
            "clientInfo": {
                "name": "test-client",
                "version": "0.1.0"
            }
        }
    });

    let req: seo_optimizer::server::JsonRpcRequest =
        serde_json::from_value(req_json).expect("should parse initialize request");

    assert_eq!(req.method, "initialize");
    assert_eq!(req.id, Some(json!(1)));
}

#[test]
fn test_json_rpc_response_serialization() {
    let resp = seo_optimizer::server::JsonRpcResponse {
        jsonrpc: "2.0".to_owned(),
        id: Some(json!(1)),
        result: Some(json!({"protocolVersion": "2025-06-18"})),
        error: None,
    };

    let json_str = serde_json::to_string(&resp).expect("should serialize");
    assert!(json_str.contains("2025-06-18"));
    assert!(!json_str.contains("error")); // error is None, should be skipped
}

#[test]
fn test_json_rpc_error_response() {
    let resp = seo_optimizer::server::JsonRpcResponse {
        jsonrpc: "2.0".to_owned(),
        id: Some(json!(2)),
        result: None,
        error: Some(seo_optimizer::server::JsonRpcError {
            code: -32601,
            message: "method not found".to_owned(),
            data: None,
        }),
    };

    let json_str = serde_json::to_string(&resp).expect("should serialize");
    assert!(json_str.contains("-32601"));
    assert!(json_str.contains("method not found"));
    assert!(!json_str.contains("result")); // result is None, should be skipped
}

// ---------------------------------------------------------------------------
// Router surface
// ---------------------------------------------------------------------------

#[test]
fn test_tool_definitions_complete() {
    let router = OpRouter::new(Box::new(MemoryStore::new()), None);

    let tools = router.list_tools();
    assert_eq!(tools.len(), 7);

    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    assert!(names.contains(&"inspect_fields"));
    assert!(names.contains(&"lowercase_content"));
    assert!(names.contains(&"summarize_content"));
    assert!(names.contains(&"enhance_paragraphs"));
    assert!(names.contains(&"replace_text"));
    assert!(names.contains(&"meta_recommendations"));
    assert!(names.contains(&"apply_meta_recommendation"));

    // Verify each tool has a description and input_schema.
    for tool in &tools {
        assert!(
            !tool.description.is_empty(),
            "tool {} missing description",
            tool.name
        );
        assert!(
            tool.input_schema.is_object(),
            "tool {} missing input_schema",
            tool.name
        );
    }
}

#[test]
fn test_tool_call_unknown() {
    let router = OpRouter::new(Box::new(MemoryStore::new()), None);

    let result = router
        .call_tool("nonexistent_tool", json!({}))
        .expect("should not error");

    assert!(result.is_error);
    assert!(result.content[0].text.contains("Unknown tool"));
}

#[test]
fn test_tool_call_rejects_nonpositive_id() {
    let router = OpRouter::new(Box::new(MemoryStore::new()), None);

    let result = router
        .call_tool("inspect_fields", json!({"itemId": 0}))
        .expect("should not error");

    assert!(result.is_error);
    assert!(result.content[0].text.contains("invalid item id"));
}

// ---------------------------------------------------------------------------
// inspect_fields / lowercase_content
// ---------------------------------------------------------------------------

#[test]
fn test_inspect_fields_dumps_sections() {
    let store = MemoryStore::new();
    let mut item = sample_item(3, "About Us", "<p>team page</p>");
    item.meta.insert("color".to_owned(), json!("red"));
    store.insert(item);
    let router = OpRouter::new(Box::new(store), None);

    let result = router
        .call_tool("inspect_fields", json!({"itemId": 3}))
        .expect("should not error");

    assert!(!result.is_error);
    let text = &result.content[0].text;
    assert!(text.contains("Basic Item Information"));
    assert!(text.contains("About Us"));
    assert!(text.contains("Custom Fields"));
    assert!(text.contains("color"));
}

#[test]
fn test_inspect_fields_missing_item() {
    let router = OpRouter::new(Box::new(MemoryStore::new()), None);

    let result = router
        .call_tool("inspect_fields", json!({"itemId": 42}))
        .expect("should not error");

    assert!(result.is_error);
    assert!(result.content[0].text.contains("item not found: 42"));
}

#[test]
fn test_lowercase_content_persists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let seed = FileStore::new(dir.path().to_path_buf());
    seed.put(&sample_item(1, "T", "Hello WORLD")).expect("seed");
    let router = file_router(&dir);

    let result = router
        .call_tool("lowercase_content", json!({"itemId": 1}))
        .expect("should not error");

    assert!(!result.is_error);
    assert!(result.content[0].text.contains("modified successfully"));
    assert_eq!(seed.load(1).expect("load").content, "hello world");
}

// ---------------------------------------------------------------------------
// summarize_content / enhance_paragraphs
// ---------------------------------------------------------------------------

#[test]
fn test_summarize_appends_escaped_block() {
    let dir = tempfile::tempdir().expect("tempdir");
    let seed = FileStore::new(dir.path().to_path_buf());
    let original = "<!-- wp:paragraph -->\n<p>Long article body.</p>\n<!-- /wp:paragraph -->";
    seed.put(&sample_item(1, "T", original)).expect("seed");
    let router = file_router(&dir);

    let result = router
        .call_tool("summarize_content", json!({"itemId": 1}))
        .expect("should not error");

    assert!(!result.is_error);
    let content = seed.load(1).expect("load").content;
    assert!(content.starts_with(original));
    assert!(content.contains("<strong>Summary:</strong>"));
    // Backend markup is escaped, not injected.
    assert!(content.contains("&lt;tags&gt; &amp; ampersands"));
    assert!(!content.contains("<tags>"));
}

#[test]
fn test_summarize_without_backend_is_config_error() {
    let store = MemoryStore::new();
    store.insert(sample_item(1, "T", "<p>body</p>"));
    let router = OpRouter::new(Box::new(store), None);

    let result = router
        .call_tool("summarize_content", json!({"itemId": 1}))
        .expect("should not error");

    assert!(result.is_error);
    assert!(result.content[0].text.contains("AI backend not configured"));
}

#[test]
fn test_enhance_paragraphs_pairs_and_partial_failure() {
    let store = MemoryStore::new();
    let content = "<!-- wp:paragraph -->\n<p>This opening paragraph is plenty long enough to keep.</p>\n<!-- /wp:paragraph -->\n\n<!-- wp:paragraph -->\n<p>This poison paragraph makes the fake backend fail on purpose.</p>\n<!-- /wp:paragraph -->";
    store.insert(sample_item(9, "T", content));
    let router = OpRouter::new(Box::new(store), Some(Box::new(FakeGenerator)));

    let result = router
        .call_tool("enhance_paragraphs", json!({"itemId": 9}))
        .expect("should not error");

    assert!(!result.is_error);
    let payload: serde_json::Value =
        serde_json::from_str(&result.content[0].text).expect("json payload");
    assert_eq!(payload["total"], json!(2));
    assert!(payload["paragraphs"][0]["enhanced"]
        .as_str()
        .expect("enhanced")
        .starts_with("improved:"));
    assert!(payload["paragraphs"][1]["enhanced"]
        .as_str()
        .expect("enhanced")
        .contains("(Error enhancing:"));
    assert_eq!(payload["debug"]["paragraphs_found"], json!(2));
}

#[test]
fn test_enhance_paragraphs_empty_content() {
    let store = MemoryStore::new();
    store.insert(sample_item(9, "T", "   "));
    let router = OpRouter::new(Box::new(store), Some(Box::new(FakeGenerator)));

    let result = router
        .call_tool("enhance_paragraphs", json!({"itemId": 9}))
        .expect("should not error");

    assert!(result.is_error);
    assert!(result.content[0].text.contains("no paragraphs found"));
}

// ---------------------------------------------------------------------------
// replace_text
// ---------------------------------------------------------------------------

const TWO_BLOCKS: &str = "<!-- wp:paragraph -->\n<p>The launch went well &#8212; beyond expectations.</p>\n<!-- /wp:paragraph -->\n\n<!-- wp:heading {\"level\":3} -->\n<h3>Results</h3>\n<!-- /wp:heading -->";

#[test]
fn test_replace_text_rewrites_matched_block_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let seed = FileStore::new(dir.path().to_path_buf());
    seed.put(&sample_item(1, "T", TWO_BLOCKS)).expect("seed");
    let router = file_router(&dir);

    // Em dash entity in storage, literal dash in the request.
    let result = router
        .call_tool(
            "replace_text",
            json!({
                "itemId": 1,
                "originalText": "The launch went well - beyond expectations.",
                "enhancedText": "The launch exceeded every expectation."
            }),
        )
        .expect("should not error");

    assert!(!result.is_error);
    let payload: serde_json::Value =
        serde_json::from_str(&result.content[0].text).expect("json payload");
    assert_eq!(payload["replaced"], json!(1));
    let diff = payload["diff"].as_str().expect("diff");
    assert!(diff.contains("-<p>The launch went well"));
    assert!(diff.contains("The launch exceeded every expectation."));

    let content = seed.load(1).expect("load").content;
    assert!(content.contains("<p>The launch exceeded every expectation.</p>"));
    // The heading block is untouched, delimiter and attributes included.
    assert!(content.contains("<!-- wp:heading {\"level\":3} -->\n<h3>Results</h3>"));
}

#[test]
fn test_replace_text_no_match_leaves_store_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let seed = FileStore::new(dir.path().to_path_buf());
    seed.put(&sample_item(1, "T", TWO_BLOCKS)).expect("seed");
    let router = file_router(&dir);

    let result = router
        .call_tool(
            "replace_text",
            json!({
                "itemId": 1,
                "originalText": "entirely unrelated passage about gardening",
                "enhancedText": "whatever"
            }),
        )
        .expect("should not error");

    assert!(result.is_error);
    assert!(result.content[0]
        .text
        .contains("original text not found in any block"));
    assert_eq!(seed.load(1).expect("load").content, TWO_BLOCKS);
}

#[test]
fn test_replace_text_validates_before_fetch() {
    // The item does not exist; the empty-text rejection must win.
    let router = OpRouter::new(Box::new(MemoryStore::new()), None);

    let result = router
        .call_tool(
            "replace_text",
            json!({"itemId": 999, "originalText": "  ", "enhancedText": "x"}),
        )
        .expect("should not error");

    assert!(result.is_error);
    assert!(result.content[0].text.contains("originalText"));
    assert!(!result.content[0].text.contains("not found"));
}

#[test]
fn test_replace_text_missing_item() {
    let router = OpRouter::new(Box::new(MemoryStore::new()), None);

    let result = router
        .call_tool(
            "replace_text",
            json!({"itemId": 5, "originalText": "old", "enhancedText": "new"}),
        )
        .expect("should not error");

    assert!(result.is_error);
    assert!(result.content[0].text.contains("item not found: 5"));
}

// ---------------------------------------------------------------------------
// meta_recommendations / apply_meta_recommendation
// ---------------------------------------------------------------------------

#[test]
fn test_meta_recommendations_payload() {
    let store = MemoryStore::new();
    store.insert(sample_item(2, "Contact Us", "<p>reach out</p>"));
    let router = OpRouter::new(Box::new(store), None);

    let result = router
        .call_tool("meta_recommendations", json!({"itemId": 2}))
        .expect("should not error");

    assert!(!result.is_error);
    let payload: serde_json::Value =
        serde_json::from_str(&result.content[0].text).expect("json payload");
    assert_eq!(payload["title"], json!("Contact Us"));
    assert_eq!(payload["url"], json!("/contact-us"));
    // Without stored meta, the current title falls back to the item title.
    assert_eq!(payload["current_meta"]["title"], json!("Contact Us"));
    assert_eq!(
        payload["recommendations"]["title_improvement"],
        json!("+35% ranking")
    );
    assert!(payload["recommendations"]["keywords"].is_array());
}

#[test]
fn test_apply_meta_recommendation_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let seed = FileStore::new(dir.path().to_path_buf());
    seed.put(&sample_item(2, "T", "c")).expect("seed");
    let router = file_router(&dir);

    let result = router
        .call_tool(
            "apply_meta_recommendation",
            json!({"itemId": 2, "type": "description", "value": "A sharper description."}),
        )
        .expect("should not error");

    assert!(!result.is_error);
    assert!(result.content[0].text.contains("applied successfully"));
    assert_eq!(
        seed.load(2).expect("load").meta.get("_seo_description"),
        Some(&json!("A sharper description."))
    );
}

#[test]
fn test_apply_meta_recommendation_unknown_type() {
    let store = MemoryStore::new();
    store.insert(sample_item(2, "T", "c"));
    let router = OpRouter::new(Box::new(store), None);

    let result = router
        .call_tool(
            "apply_meta_recommendation",
            json!({"itemId": 2, "type": "banner", "value": "x"}),
        )
        .expect("should not error");

    assert!(result.is_error);
    assert!(result.content[0]
        .text
        .contains("unknown recommendation type: banner"));
}

#[test]
fn test_apply_meta_recommendation_empty_value() {
    let store = MemoryStore::new();
    store.insert(sample_item(2, "T", "c"));
    let router = OpRouter::new(Box::new(store), None);

    let result = router
        .call_tool(
            "apply_meta_recommendation",
            json!({"itemId": 2, "type": "title", "value": "   "}),
        )
        .expect("should not error");

    assert!(result.is_error);
    assert!(result.content[0].text.contains("must be non-empty"));
}
