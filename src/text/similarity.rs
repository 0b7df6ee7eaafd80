//! Tolerant text matching: substring fast path plus token-overlap ratio.
//!
//! The enhanced text a user approves may have been retyped or chunked on
//! different paragraph boundaries than the stored content, so an exact
//! substring check alone misses legitimate matches. The fallback splits
//! both strings into lowercase whitespace tokens and accepts when at
//! least [`DEFAULT_SIMILARITY_THRESHOLD`] of the needle's tokens occur
//! in the haystack.

use std::collections::HashMap;

/// Minimum fraction of needle tokens that must be present in the
/// haystack for the token-overlap fallback to accept. Policy constant;
/// callers can pass their own value to [`token_overlap_matches`].
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Decide whether `needle` matches inside `haystack`.
///
/// Both arguments are expected to already be normalized (see
/// [`crate::text::normalize`]). Fast path: case-insensitive substring
/// containment. Fallback: token overlap at the default threshold.
#[must_use]
pub fn is_match(haystack: &str, needle: &str) -> bool {
    is_match_with_threshold(haystack, needle, DEFAULT_SIMILARITY_THRESHOLD)
}

/// [`is_match`] with a caller-supplied token-overlap threshold.
#[must_use]
pub fn is_match_with_threshold(haystack: &str, needle: &str, threshold: f64) -> bool {
    if needle.is_empty() {
        return false;
    }
    if haystack.to_lowercase().contains(&needle.to_lowercase()) {
        return true;
    }
    token_overlap_matches(haystack, needle, threshold)
}

/// Token-overlap fallback at an explicit threshold.
///
/// The intersection is approximate on purpose: each needle token counts
/// once per occurrence whenever it exists as a key in the haystack's
/// count map, with no per-token multiplicity cap. A needle with
/// repeated tokens can therefore score higher than a strict multiset
/// intersection would allow. Changing this is a compatibility break;
/// see `duplicate_needle_tokens_overcount` below.
#[must_use]
pub fn token_overlap_matches(haystack: &str, needle: &str, threshold: f64) -> bool {
    let hay_tokens: Vec<String> = haystack
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    let needle_tokens: Vec<String> = needle
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    if hay_tokens.is_empty() || needle_tokens.is_empty() {
        return false;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tok in &hay_tokens {
        *counts.entry(tok.as_str()).or_insert(0) += 1;
    }

    let intersection = needle_tokens
        .iter()
        .filter(|tok| counts.contains_key(tok.as_str()))
        .count();

    #[allow(clippy::cast_precision_loss)]
    let ratio = intersection as f64 / needle_tokens.len().max(1) as f64;
    ratio >= threshold
}
