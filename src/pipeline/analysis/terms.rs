use std::collections::HashSet;

use super::catalogue::TERM_CATALOGUE;
use super::units::extract_value_and_unit;

/// Context captured on each side of a term match, in bytes before boundary
/// snapping.
const CONTEXT_RADIUS: usize = 100;

/// One lab test recognized in a report, with the raw value and unit found
/// near it. `value`/`unit` are empty strings when nothing parseable was
/// nearby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTerm {
    pub term: String,
    pub value: String,
    pub unit: String,
    pub context: String,
}

/// Scan cleaned report text for every catalogue term.
///
/// Emits at most one record per canonical name — the first occurrence in the
/// document claims it. Results follow catalogue iteration order, not
/// position-in-document order, and are computed eagerly: callers count them
/// before generating a summary.
pub fn extract_medical_terms(text: &str) -> Vec<ExtractedTerm> {
    let mut found = Vec::new();
    let mut seen_terms: HashSet<&str> = HashSet::new();

    for entry in TERM_CATALOGUE.iter() {
        let Some(m) = entry.regex.find(text) else {
            continue;
        };

        // Names are unique catalogue keys, so this guard should never fire;
        // it stays because emitting a term twice would corrupt downstream
        // counts.
        if !seen_terms.insert(entry.name) {
            continue;
        }

        let context = context_window(text, m.start(), m.end());
        let (value, unit) = extract_value_and_unit(context);

        found.push(ExtractedTerm {
            term: entry.name.to_string(),
            value,
            unit,
            context: context.trim().to_string(),
        });
    }

    tracing::debug!(count = found.len(), "extracted medical terms");
    found
}

/// Slice up to CONTEXT_RADIUS bytes either side of the match, clamped to the
/// document and snapped to char boundaries (cleaned text can still carry
/// multi-byte letters).
fn context_window(text: &str, match_start: usize, match_end: usize) -> &str {
    let mut start = match_start.saturating_sub(CONTEXT_RADIUS);
    while !text.is_char_boundary(start) {
        start -= 1;
    }

    let mut end = (match_end + CONTEXT_RADIUS).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }

    &text[start..end]
}
