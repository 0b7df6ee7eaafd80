//! The tree walker: locate the block(s) carrying a given text and
//! rewrite them in place, preserving structural wrappers.
//!
//! Children are processed before the block itself so that paragraphs
//! nested inside quotes (or columns) are matched independently of the
//! quote's own directly-held markup. A single request may rewrite more
//! than one block when the same text occurs more than once; the caller
//! treats a zero count as NotFound and persists nothing.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::blocks::model::{Block, BlockKind};
use crate::text::{is_match_with_threshold, normalize, DEFAULT_SIMILARITY_THRESHOLD};

/// One user-approved (original, enhanced) pair, consumed by a single
/// replacement invocation.
#[derive(Debug, Clone)]
pub struct ReplacementRequest {
    pub original_text: String,
    pub enhanced_text: String,
}

/// Was the paragraph entirely an emphasis wrapper around one `<p>`?
#[allow(clippy::unwrap_used)]
static EM_WRAPPER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*<p>\s*<em>.*</em>\s*</p>\s*$").unwrap());

/// Rewrite every block whose content matches `request.original_text`,
/// at the default similarity threshold. Returns the number of blocks
/// rewritten; zero means the tree is untouched.
pub fn replace_blocks(blocks: &mut [Block], request: &ReplacementRequest) -> usize {
    replace_blocks_with_threshold(blocks, request, DEFAULT_SIMILARITY_THRESHOLD)
}

/// [`replace_blocks`] with a caller-supplied token-overlap threshold.
pub fn replace_blocks_with_threshold(
    blocks: &mut [Block],
    request: &ReplacementRequest,
    threshold: f64,
) -> usize {
    // An empty needle would raw-substring-match every block.
    if request.original_text.trim().is_empty() {
        return 0;
    }

    // Normalize the needle once; every block is normalized during the
    // walk.
    let original_normalized = normalize(&request.original_text);
    let original_lower = request.original_text.to_lowercase();
    let mut replaced = 0usize;
    walk(
        blocks,
        &original_normalized,
        &original_lower,
        &request.enhanced_text,
        threshold,
        &mut replaced,
    );
    replaced
}

fn walk(
    blocks: &mut [Block],
    original_normalized: &str,
    original_lower: &str,
    enhanced: &str,
    threshold: f64,
    replaced: &mut usize,
) {
    for block in blocks {
        // Children first: text inside quotes/columns is handled on its
        // own, independent of the parent's direct markup.
        walk(
            &mut block.children,
            original_normalized,
            original_lower,
            enhanced,
            threshold,
            replaced,
        );

        if !block.kind.is_text_bearing() || block.inner_html.is_empty() {
            continue;
        }

        let plain = normalize(&block.inner_html);
        let matched = is_match_with_threshold(&plain, original_normalized, threshold)
            // Double check against the raw markup, for text the
            // normalizer would otherwise fold away.
            || block.inner_html.to_lowercase().contains(original_lower);
        if !matched {
            continue;
        }

        rewrite(block, enhanced);
        *replaced += 1;
        debug!(kind = ?block.kind, "block rewritten");
    }
}

/// Format-preserving rewrite of one matched block. Inserted text is
/// always HTML-escaped; both the primary content and every string
/// piece of the serialized mirror are replaced together.
fn rewrite(block: &mut Block, enhanced: &str) {
    let escaped = html_escape::encode_safe(enhanced);
    let new_html = match &block.kind {
        BlockKind::Paragraph => {
            if EM_WRAPPER_RE.is_match(&block.inner_html) {
                format!("<p><em>{escaped}</em></p>")
            } else {
                format!("<p>{escaped}</p>")
            }
        }
        BlockKind::Heading => {
            let level = block.heading_level();
            format!("<h{level}>{escaped}</h{level}>")
        }
        // Quote text usually lives in child paragraphs, already covered
        // by the recursive walk; this branch fires only for quotes with
        // direct inline content, so a generic wrapper is emitted.
        BlockKind::Quote => format!("<blockquote><p>{escaped}</p></blockquote>"),
        BlockKind::Freeform | BlockKind::Other(_) => return,
    };

    block.inner_html.clone_from(&new_html);
    for piece in block.inner_content.iter_mut().flatten() {
        piece.clone_from(&new_html);
    }
}
