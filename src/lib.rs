//! `seo-optimizer` — MCP-based content optimization add-on for a CMS.
//!
//! Exposes admin content operations via the Model Context Protocol
//! (MCP) over stdio (JSON-RPC 2.0, newline-delimited). Operates on
//! block-structured documents: delimiter comments in the stored HTML
//! mark paragraph, heading, and quote blocks, and rewrites preserve
//! that structure byte-for-byte outside the changed block.
//!
//! # Operations
//!
//! - `inspect_fields` — dump every stored field of a content item
//! - `lowercase_content` — rewrite the whole document in lowercase
//! - `summarize_content` — append an AI summary paragraph block
//! - `enhance_paragraphs` — per-paragraph AI rewrite suggestions
//! - `replace_text` — fuzzy block-level text substitution
//! - `meta_recommendations` — current + recommended SEO metadata
//! - `apply_meta_recommendation` — store one metadata value
//!
//! # Architecture
//!
//! ```text
//! stdin (JSON-RPC) → server → OpRouter → operations
//!                                 ↓              ↓ (optional)
//!                            ContentStore   TextGenerator (HTTP)
//! stdout (JSON-RPC) ←──────────────┘
//! ```
//!
//! The replacement core is pure: `blocks::parse` lifts the document
//! into a tree, `blocks::replace_blocks` matches the target text
//! through `text::normalize` and token-overlap similarity, and
//! `blocks::serialize` lowers the tree back.

pub mod ai;
pub mod blocks;
pub mod enhance;
pub mod error;
pub mod fields;
pub mod meta;
pub mod ops;
pub mod server;
pub mod split;
pub mod store;
pub mod text;
pub mod util;

pub use error::{OptimizerError, OptimizerResult};
pub use server::run_server;
