//! Text normalization for robust comparison.
//!
//! Canonicalizes a text fragment so that two renderings of the same
//! sentence compare equal regardless of encoding noise: HTML entities,
//! non-breaking spaces, typographic dashes and quotes, markup tags, and
//! whitespace runs. Every step is a total function; `normalize` cannot
//! fail and is idempotent on its own output.

use std::sync::LazyLock;

use regex::Regex;

/// All dash variants collapse to this character.
///
/// The en/em dash family and the ASCII hyphen are all folded into one
/// canonical form; only equality of normalized strings matters, so the
/// concrete choice is arbitrary as long as it is stable.
pub const CANONICAL_DASH: char = '\u{2014}';

/// `<script>`/`<style>` elements are dropped with their contents, not
/// just their tags.
#[allow(clippy::unwrap_used)]
static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").unwrap()
});

/// Any remaining element tag or comment, including block delimiter
/// comments. Requires a tag-name letter (or `!--`) after the `<`, so a
/// stray `<` in prose, such as one produced by decoding `&lt;`, is
/// plain text and survives stripping.
#[allow(clippy::unwrap_used)]
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^>]*>|<!--[^>]*>").unwrap());

/// Canonicalize `text` for comparison.
///
/// Steps, in order:
/// 1. decode HTML/XML character entities (named and numeric) to a
///    fixpoint, so double-encoded text lands on the same form as
///    single-encoded text;
/// 2. map non-breaking and narrow Unicode space variants to U+0020;
/// 3. unify hyphen/en-dash/em-dash to [`CANONICAL_DASH`];
/// 4. unify curly, low and guillemet quotes to straight ASCII quotes;
/// 5. strip markup tags, keeping only visible text;
/// 6. collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize(text: &str) -> String {
    let decoded = decode_entities(text);
    let unified: String = decoded.chars().map(unify_char).collect();
    let stripped = strip_markup(&unified);
    collapse_whitespace(&stripped)
}

/// Decode entities until the text stops changing. Each pass strictly
/// shrinks the text when it decodes anything, so this terminates.
fn decode_entities(text: &str) -> String {
    let mut current = text.to_owned();
    loop {
        let decoded = html_escape::decode_html_entities(&current);
        if decoded == current.as_str() {
            return current;
        }
        current = decoded.into_owned();
    }
}

/// Map one character to its canonical form for comparison.
const fn unify_char(c: char) -> char {
    match c {
        // NBSP, narrow NBSP, ideographic space, and the U+2000..U+200A
        // punctuation-space range.
        '\u{00A0}' | '\u{202F}' | '\u{3000}' | '\u{2000}'..='\u{200A}' => ' ',
        '-' | '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' => CANONICAL_DASH,
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{00AB}' | '\u{00BB}' => '"',
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2039}' | '\u{203A}' => '\'',
        other => other,
    }
}

/// Strip markup tags and comments, retaining only visible text.
///
/// Script and style elements are removed together with their contents.
/// Tag attributes are never decoded into the output.
#[must_use]
pub fn strip_markup(text: &str) -> String {
    let without_blocks = SCRIPT_STYLE_RE.replace_all(text, "");
    TAG_RE.replace_all(&without_blocks, "").into_owned()
}

/// Collapse all whitespace runs (spaces, tabs, newlines) to single
/// spaces and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Prepare stored content for a generation request: strip markup and
/// delimiter comments, collapse whitespace, and truncate to roughly
/// `max_bytes` (backends have token limits).
#[must_use]
pub fn clean_for_generation(content: &str, max_bytes: usize) -> String {
    let clean = collapse_whitespace(&strip_markup(content));
    if clean.len() <= max_bytes {
        return clean;
    }

    // Cut on a char boundary at or below the limit.
    let mut cut = max_bytes;
    while cut > 0 && !clean.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &clean[..cut])
}
