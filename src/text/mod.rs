//! Text canonicalization and fuzzy matching.
//!
//! The replacement engine never compares raw markup directly: both the
//! block's content and the search text are pushed through [`normalize`]
//! first, and the match decision is delegated to [`is_match`]. Keeping
//! these as small pure functions is what makes the tree walker testable
//! in isolation.

pub mod normalize;
pub mod similarity;

pub use normalize::{clean_for_generation, normalize, strip_markup};
pub use similarity::{
    is_match, is_match_with_threshold, token_overlap_matches, DEFAULT_SIMILARITY_THRESHOLD,
};
