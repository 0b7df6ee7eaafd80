//! Parser and serializer for block-delimited documents.
//!
//! Documents are flat strings in which each block is bracketed by HTML
//! comments: `<!-- wp:heading {"level":3} -->\n<h3>…</h3>\n<!-- /wp:heading -->`.
//! Text between delimiters at the top level (including bare whitespace)
//! becomes a freeform block, which is what makes the round trip exact.
//! Malformed input never fails: an unmatched closer is kept as literal
//! text, and an unclosed opener folds everything from that point back
//! into a freeform block.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::blocks::model::{Block, BlockKind};

/// One delimiter comment: opener, void opener, or closer.
///
/// The name may be namespace-qualified (`ns/name`) or bare (implied
/// `core` namespace). Attrs, when present, are a JSON object followed
/// by whitespace. A trailing `/` marks a void block.
#[allow(clippy::unwrap_used)]
static DELIMITER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<!--\s+(?P<closer>/)?wp:(?P<name>[a-z][a-z0-9_-]*(?:/[a-z][a-z0-9_-]*)?)\s+(?:(?P<attrs>\{.*?\})\s+)?(?P<void>/)?-->",
    )
    .unwrap()
});

/// An open block whose closer has not been seen yet.
struct Frame {
    kind: BlockKind,
    attrs: Map<String, Value>,
    attrs_json: Option<String>,
    inner_content: Vec<Option<String>>,
    children: Vec<Block>,
    /// Byte offset of the opener, for the unclosed-block fallback.
    start: usize,
}

impl Frame {
    fn close(self) -> Block {
        let inner_html: String = self
            .inner_content
            .iter()
            .filter_map(|piece| piece.as_deref())
            .collect();
        Block {
            kind: self.kind,
            attrs: self.attrs,
            attrs_json: self.attrs_json,
            inner_html,
            inner_content: self.inner_content,
            children: self.children,
            void: false,
        }
    }
}

/// Parse a stored document string into its block tree.
#[must_use]
pub fn parse(doc: &str) -> Vec<Block> {
    let mut top: Vec<Block> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut cursor = 0usize;

    for caps in DELIMITER_RE.captures_iter(doc) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut stack, &mut top, &doc[cursor..whole.start()]);
        cursor = whole.end();

        let name = caps.name("name").map_or("", |m| m.as_str());
        let kind = BlockKind::from_name(name);

        if caps.name("closer").is_some() {
            // Closer must match the innermost open block; otherwise it
            // is stray markup and stays in the text stream.
            if stack.last().is_some_and(|f| f.kind == kind) {
                let block = stack.pop().map(Frame::close);
                if let Some(block) = block {
                    attach(&mut stack, &mut top, block);
                }
            } else {
                push_text(&mut stack, &mut top, whole.as_str());
            }
            continue;
        }

        let attrs_json = caps.name("attrs").map(|m| m.as_str().to_owned());
        let attrs: Map<String, Value> = attrs_json
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();

        if caps.name("void").is_some() {
            attach(
                &mut stack,
                &mut top,
                Block {
                    kind,
                    attrs,
                    attrs_json,
                    inner_html: String::new(),
                    inner_content: Vec::new(),
                    children: Vec::new(),
                    void: true,
                },
            );
        } else {
            stack.push(Frame {
                kind,
                attrs,
                attrs_json,
                inner_content: Vec::new(),
                children: Vec::new(),
                start: whole.start(),
            });
        }
    }

    if let Some(outermost) = stack.first() {
        // Unclosed block: everything from its opener onward is kept as
        // freeform text rather than guessing at structure.
        top.push(Block::freeform(&doc[outermost.start..]));
    } else {
        push_text(&mut stack, &mut top, &doc[cursor..]);
    }

    #[cfg(debug_assertions)]
    for block in &top {
        block.assert_valid();
    }

    top
}

/// Route a text span to the innermost open block, or to the top level
/// as a freeform block. Empty spans are dropped.
fn push_text(stack: &mut [Frame], top: &mut Vec<Block>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(frame) = stack.last_mut() {
        frame.inner_content.push(Some(text.to_owned()));
    } else {
        top.push(Block::freeform(text));
    }
}

/// Attach a finished block to its parent frame (reserving a child slot
/// in the parent's content) or to the top level.
fn attach(stack: &mut [Frame], top: &mut Vec<Block>, block: Block) {
    if let Some(frame) = stack.last_mut() {
        frame.inner_content.push(None);
        frame.children.push(block);
    } else {
        top.push(block);
    }
}

/// Serialize a block tree back to its stored string form.
#[must_use]
pub fn serialize(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        serialize_into(&mut out, block);
    }
    out
}

fn serialize_into(out: &mut String, block: &Block) {
    let Some(name) = block.kind.name() else {
        out.push_str(&block.inner_html);
        return;
    };
    let short = name.strip_prefix("core/").unwrap_or(name);

    out.push_str("<!-- wp:");
    out.push_str(short);
    out.push(' ');
    if let Some(attrs) = attrs_text(block) {
        out.push_str(&attrs);
        out.push(' ');
    }

    if block.void {
        out.push_str("/-->");
        return;
    }
    out.push_str("-->");

    let mut child_idx = 0usize;
    for piece in &block.inner_content {
        match piece {
            Some(text) => out.push_str(text),
            None => {
                if let Some(child) = block.children.get(child_idx) {
                    serialize_into(out, child);
                    child_idx += 1;
                }
            }
        }
    }

    out.push_str("<!-- /wp:");
    out.push_str(short);
    out.push_str(" -->");
}

/// The delimiter attrs text: the raw parsed slice when available (so
/// untouched blocks round-trip byte-exactly), else re-encoded JSON.
fn attrs_text(block: &Block) -> Option<String> {
    if let Some(raw) = &block.attrs_json {
        return Some(raw.clone());
    }
    if block.attrs.is_empty() {
        return None;
    }
    serde_json::to_string(&block.attrs).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "<!-- wp:heading {\"level\":3} -->\n<h3>Title</h3>\n<!-- /wp:heading -->\n\n<!-- wp:paragraph -->\n<p>Hello world</p>\n<!-- /wp:paragraph -->";

    #[test]
    fn test_parse_flat_document() {
        let blocks = parse(DOC);
        // heading, freeform "\n\n", paragraph
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].kind, BlockKind::Heading);
        assert_eq!(blocks[0].heading_level(), 3);
        assert_eq!(blocks[0].inner_html, "\n<h3>Title</h3>\n");
        assert_eq!(blocks[1].kind, BlockKind::Freeform);
        assert_eq!(blocks[2].kind, BlockKind::Paragraph);
        assert_eq!(blocks[2].inner_html, "\n<p>Hello world</p>\n");
    }

    #[test]
    fn test_round_trip_exact() {
        assert_eq!(serialize(&parse(DOC)), DOC);
    }

    #[test]
    fn test_round_trip_preserves_attrs_key_order() {
        let doc = "<!-- wp:image {\"sizeSlug\":\"large\",\"id\":42} /-->";
        assert_eq!(serialize(&parse(doc)), doc);
    }

    #[test]
    fn test_nested_blocks() {
        let doc = "<!-- wp:quote -->\n<blockquote class=\"wp-block-quote\">\
                   <!-- wp:paragraph -->\n<p>Inner</p>\n<!-- /wp:paragraph -->\
                   </blockquote>\n<!-- /wp:quote -->";
        let blocks = parse(doc);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Quote);
        assert_eq!(blocks[0].children.len(), 1);
        assert_eq!(blocks[0].children[0].kind, BlockKind::Paragraph);
        // innerHTML excludes the child's markup.
        assert!(!blocks[0].inner_html.contains("Inner"));
        assert_eq!(serialize(&blocks), doc);
    }

    #[test]
    fn test_void_block() {
        let doc = "<!-- wp:separator /-->";
        let blocks = parse(doc);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].void);
        assert_eq!(blocks[0].kind, BlockKind::Other("core/separator".to_owned()));
        assert_eq!(serialize(&blocks), doc);
    }

    #[test]
    fn test_namespaced_block_name() {
        let doc = "<!-- wp:acme/banner -->\n<div>x</div>\n<!-- /wp:acme/banner -->";
        let blocks = parse(doc);
        assert_eq!(blocks[0].kind, BlockKind::Other("acme/banner".to_owned()));
        assert_eq!(serialize(&blocks), doc);
    }

    #[test]
    fn test_plain_text_is_freeform() {
        let blocks = parse("just plain text, no delimiters");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Freeform);
        assert_eq!(serialize(&blocks), "just plain text, no delimiters");
    }

    #[test]
    fn test_stray_closer_kept_as_text() {
        let doc = "before <!-- /wp:paragraph --> after";
        let blocks = parse(doc);
        assert!(blocks.iter().all(|b| b.kind == BlockKind::Freeform));
        assert_eq!(serialize(&blocks), doc);
    }

    #[test]
    fn test_unclosed_block_folds_to_freeform() {
        let doc = "intro\n<!-- wp:paragraph -->\n<p>dangling";
        let blocks = parse(doc);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].kind, BlockKind::Freeform);
        assert_eq!(serialize(&blocks), doc);
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").is_empty());
        assert_eq!(serialize(&[]), "");
    }
}
