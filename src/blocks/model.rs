//! The typed document tree: ordered blocks with attributes, raw
//! content, and nested children.

use serde_json::{Map, Value};

/// Closed set of block kinds the engine branches on. Anything else is
/// carried through [`BlockKind::Other`] untouched, which keeps the
/// "which kinds are text-bearing" decision in one place instead of
/// scattered string comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading,
    Quote,
    /// Plain text between delimited blocks (whitespace included);
    /// serialized verbatim with no delimiters.
    Freeform,
    /// Any other delimited block, identified by its full name
    /// (e.g. `core/image`, `acme/banner`).
    Other(String),
}

impl BlockKind {
    /// Resolve a delimiter name (namespace-qualified or bare, in which
    /// case the `core` namespace is assumed).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let full = if name.contains('/') {
            name.to_owned()
        } else {
            format!("core/{name}")
        };
        match full.as_str() {
            "core/paragraph" => Self::Paragraph,
            "core/heading" => Self::Heading,
            "core/quote" => Self::Quote,
            _ => Self::Other(full),
        }
    }

    /// Full namespaced name, or `None` for freeform text.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Paragraph => Some("core/paragraph"),
            Self::Heading => Some("core/heading"),
            Self::Quote => Some("core/quote"),
            Self::Freeform => None,
            Self::Other(name) => Some(name),
        }
    }

    /// True only for the replaceable set {paragraph, quote, heading}.
    #[must_use]
    pub const fn is_text_bearing(&self) -> bool {
        matches!(self, Self::Paragraph | Self::Heading | Self::Quote)
    }
}

/// One node of the document tree.
///
/// `inner_html` is the block's own markup with child placeholders
/// removed; `inner_content` is the serialization-ordered interleaving
/// of markup pieces (`Some`) and child slots (`None`). The two are
/// mirrors: any rewrite must update both, and the only mutation path
/// ([`super::replace`]) does so in one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// Parsed delimiter attributes (heading level etc.).
    pub attrs: Map<String, Value>,
    /// Raw attrs JSON exactly as it appeared in the delimiter, so an
    /// untouched block reserializes byte-identically regardless of key
    /// ordering.
    pub attrs_json: Option<String>,
    /// The block's own markup fragment; empty if content lives
    /// entirely in children.
    pub inner_html: String,
    /// Markup pieces interleaved with `None` child slots, in render
    /// order. One `None` per child.
    pub inner_content: Vec<Option<String>>,
    /// Ordered children; order is render order and is preserved
    /// through any rewrite.
    pub children: Vec<Block>,
    /// Serialized with a self-closing delimiter (`/-->`), no closer.
    pub void: bool,
}

impl Block {
    /// A freeform text node.
    #[must_use]
    pub fn freeform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind: BlockKind::Freeform,
            attrs: Map::new(),
            attrs_json: None,
            inner_html: text.clone(),
            inner_content: vec![Some(text)],
            children: Vec::new(),
            void: false,
        }
    }

    /// A leaf block of `kind` holding a single markup fragment.
    #[must_use]
    pub fn with_content(kind: BlockKind, html: impl Into<String>) -> Self {
        let html = html.into();
        Self {
            kind,
            attrs: Map::new(),
            attrs_json: None,
            inner_html: html.clone(),
            inner_content: vec![Some(html)],
            children: Vec::new(),
            void: false,
        }
    }

    /// Heading level from the attributes, clamped to `[1, 6]`, with the
    /// conventional default of 2 when absent or malformed.
    #[must_use]
    pub fn heading_level(&self) -> i64 {
        self.attrs
            .get("level")
            .and_then(Value::as_i64)
            .unwrap_or(2)
            .clamp(1, 6)
    }

    /// Debug-only structural invariant: one `None` slot per child.
    #[cfg(debug_assertions)]
    pub(crate) fn assert_valid(&self) {
        let slots = self.inner_content.iter().filter(|p| p.is_none()).count();
        debug_assert_eq!(
            slots,
            self.children.len(),
            "child slot count must equal child count"
        );
        for child in &self.children {
            child.assert_valid();
        }
    }
}
