//! Enhancement orchestrator: pair each paragraph span with an
//! AI-rewritten version.
//!
//! Failures are per-span: a backend error is folded into the span's
//! output as a visible marker and the batch keeps going, so one bad
//! call never discards the suggestions already generated.

use serde::Serialize;
use tracing::warn;

use crate::ai::{TaskType, TextGenerator, MAX_PROMPT_BYTES};
use crate::text::clean_for_generation;

/// One (original, enhanced) suggestion pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhancedSpan {
    pub original: String,
    pub enhanced: String,
}

/// Run every span through the generator. Spans that clean down to
/// nothing are dropped; spans whose generation fails keep their
/// original text with an appended error marker.
pub fn enhance_spans(generator: &dyn TextGenerator, spans: &[String]) -> Vec<EnhancedSpan> {
    spans
        .iter()
        .filter_map(|span| {
            let clean = clean_for_generation(span, MAX_PROMPT_BYTES);
            if clean.trim().is_empty() {
                return None;
            }
            let enhanced = match generator.generate(TaskType::Enhancement, &clean) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "span enhancement failed");
                    format!("{span} <em>(Error enhancing: {e})</em>")
                }
            };
            Some(EnhancedSpan {
                original: span.clone(),
                enhanced,
            })
        })
        .collect()
}
