//! Unified diffs for audit output after content rewrites.

use similar::{Algorithm, TextDiff};

/// Diff the stored document before and after a rewrite, labeled with
/// the item id. Patience keeps the hunks readable for prose.
#[must_use]
pub fn content_diff(item_id: u64, old: &str, new: &str) -> String {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Patience)
        .diff_lines(old, new);

    diff.unified_diff()
        .header(&format!("item/{item_id}@before"), &format!("item/{item_id}@after"))
        .to_string()
}
