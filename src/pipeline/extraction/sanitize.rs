use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

/// Everything outside word characters, whitespace and the punctuation that
/// carries meaning in lab reports (decimal points, ranges, ratios, percents).
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.,:\-()/%]").expect("allow-list pattern must compile"));

/// Normalize raw report text before term and value extraction.
///
/// Collapses whitespace runs to single spaces and strips characters outside
/// the allow-list. Must run before extraction: it affects context window
/// boundaries and pattern matching, and the gender heuristic depends on the
/// resulting spacing.
pub fn clean_report_text(raw: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(raw, " ");
    let cleaned = DISALLOWED.replace_all(&collapsed, "");
    cleaned.trim().to_string()
}
