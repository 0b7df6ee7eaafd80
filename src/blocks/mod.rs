//! Block-structured document model, parser/serializer, and the
//! replacement engine.
//!
//! A stored document is a flat string carrying block delimiter comments
//! (`<!-- wp:paragraph -->…<!-- /wp:paragraph -->`). [`parse`] lifts it
//! into a tree of [`Block`]s, [`replace::replace_blocks`] mutates the
//! tree in place, and [`serialize`] lowers it back. For a document this
//! crate can produce, `serialize(parse(x)) == x` byte for byte.

pub mod model;
pub mod parse;
pub mod replace;

pub use model::{Block, BlockKind};
pub use parse::{parse, serialize};
pub use replace::{replace_blocks, replace_blocks_with_threshold, ReplacementRequest};
