//! Paragraph splitting for the enhancement workflow.
//!
//! Chunks a document into candidate text spans, trying progressively
//! cruder strategies: paragraph block delimiters, then `</p><p>`
//! boundaries, then blank lines, then single lines. Short fragments are
//! dropped so the generation backend is not fed headings or stray
//! words. The output spans later become the `original_text` side of a
//! replacement request.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::strip_markup;

/// Minimum span length for the structural strategies.
pub const MIN_SPAN_LEN: usize = 20;

/// Minimum span length for the last-resort line splitter, which is
/// noisier and needs a higher bar.
pub const MIN_LINE_LEN: usize = 50;

const PARAGRAPH_OPENER: &str = "<!-- wp:paragraph -->";
const PARAGRAPH_CLOSER: &str = "<!-- /wp:paragraph -->";

/// `</p>` immediately followed by the next `<p …>`.
#[allow(clippy::unwrap_used)]
static P_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</p>\s*<p[^>]*>").unwrap());

/// Blank-line paragraph boundary.
#[allow(clippy::unwrap_used)]
static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Split a document into candidate paragraph spans (plain text, tags
/// stripped). Never fails; an empty result means the document has no
/// span long enough to be worth enhancing.
#[must_use]
pub fn split_into_paragraphs(content: &str) -> Vec<String> {
    let mut spans = from_paragraph_blocks(content);

    if spans.is_empty() && content.contains("<p>") {
        spans = collect(
            P_BOUNDARY_RE.split(content).map(str::to_owned),
            MIN_SPAN_LEN,
        );
    }

    if spans.is_empty() {
        let plain = strip_markup(content);
        spans = collect(BLANK_LINE_RE.split(&plain).map(str::to_owned), MIN_SPAN_LEN);

        if spans.is_empty() {
            spans = collect(plain.split('\n').map(str::to_owned), MIN_LINE_LEN);
        }
    }

    spans
}

/// Strategy 1: text inside `<!-- wp:paragraph -->…<!-- /wp:paragraph -->`
/// pairs.
fn from_paragraph_blocks(content: &str) -> Vec<String> {
    if !content.contains(PARAGRAPH_OPENER) {
        return Vec::new();
    }
    content
        .split(PARAGRAPH_OPENER)
        .filter_map(|chunk| {
            let body = chunk.split(PARAGRAPH_CLOSER).next()?;
            if chunk.contains(PARAGRAPH_CLOSER) {
                Some(body.to_owned())
            } else {
                None
            }
        })
        .filter_map(|body| keep(&body, MIN_SPAN_LEN))
        .collect()
}

fn collect(raw: impl Iterator<Item = String>, min_len: usize) -> Vec<String> {
    raw.filter_map(|chunk| keep(&chunk, min_len)).collect()
}

/// Strip tags, trim, and keep the span only if it clears the length
/// floor.
fn keep(raw: &str, min_len: usize) -> Option<String> {
    let clean = strip_markup(raw);
    let trimmed = clean.trim();
    if trimmed.len() > min_len {
        Some(trimmed.to_owned())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_blocks_preferred() {
        let doc = "<!-- wp:paragraph -->\n<p>This is the first paragraph of text.</p>\n<!-- /wp:paragraph -->\n\
                   <!-- wp:heading -->\n<h2>Short</h2>\n<!-- /wp:heading -->\n\
                   <!-- wp:paragraph -->\n<p>And here is the second paragraph.</p>\n<!-- /wp:paragraph -->";
        let spans = split_into_paragraphs(doc);
        assert_eq!(
            spans,
            vec![
                "This is the first paragraph of text.".to_owned(),
                "And here is the second paragraph.".to_owned(),
            ]
        );
    }

    #[test]
    fn test_html_paragraph_fallback() {
        let doc = "<p>First paragraph with enough length.</p>\n<p>Second paragraph also long enough.</p>";
        let spans = split_into_paragraphs(doc);
        assert_eq!(spans.len(), 2);
        assert!(spans[0].starts_with("First paragraph"));
        assert!(spans[1].starts_with("Second paragraph"));
    }

    #[test]
    fn test_blank_line_fallback() {
        let doc = "A plain paragraph without any markup at all.\n\nAnother plain paragraph follows here.";
        let spans = split_into_paragraphs(doc);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_no_blank_lines_yields_single_span() {
        let doc = "one long unbroken line of text that easily exceeds the length floor\nshort line";
        let spans = split_into_paragraphs(doc);
        assert_eq!(spans.len(), 1);
        assert!(spans[0].starts_with("one long unbroken"));
    }

    #[test]
    fn test_line_splitter_floor() {
        let lines = "a line that is definitely longer than the fifty character minimum floor\nshort"
            .split('\n')
            .map(str::to_owned);
        let spans = collect(lines, MIN_LINE_LEN);
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn test_short_fragments_dropped() {
        let doc = "<!-- wp:paragraph -->\n<p>tiny</p>\n<!-- /wp:paragraph -->";
        assert!(split_into_paragraphs(doc).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(split_into_paragraphs("").is_empty());
    }
}
