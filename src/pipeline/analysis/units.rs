use std::sync::LazyLock;

use regex::Regex;

/// What family of unit a rule recognizes. Tags exist so the tie-break
/// order stays visible and testable, not because callers branch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    MassConcentration,
    SedimentationRate,
    CellCountScientific,
    CellCountMillions,
    CellCountAlternate,
    Percentage,
    CellVolume,
    Concentration,
    GenericRatio,
}

/// A value+unit recognition rule.
pub struct UnitRule {
    pub kind: UnitKind,
    regex: Regex,
}

fn rule(kind: UnitKind, unit_pattern: &str) -> UnitRule {
    UnitRule {
        kind,
        regex: Regex::new(&format!(r"(?i)(\d+\.?\d*)\s*({unit_pattern})"))
            .unwrap_or_else(|e| panic!("unit rule {kind:?} must compile: {e}")),
    }
}

/// Ordered unit rules, tried first to last; the first match wins.
///
/// Order matters: the generic alphabetic ratio at the end would otherwise
/// claim "g/dL" or "mm/hr" with a truncated capture, so every specific unit
/// family comes before it.
pub static UNIT_RULES: LazyLock<Vec<UnitRule>> = LazyLock::new(|| {
    vec![
        rule(UnitKind::MassConcentration, r"g/dL|g/dl|gm/dl"),
        rule(UnitKind::SedimentationRate, r"mm/hr|mm/h"),
        rule(UnitKind::CellCountScientific, r"10\^3/uL|x10\^3/uL|10\^3/µL"),
        rule(UnitKind::CellCountMillions, r"million/cumm|10\^6/µL"),
        rule(UnitKind::CellCountAlternate, r"Cells/cumm|cells/µL|10\^3/µL"),
        rule(UnitKind::Percentage, r"%"),
        rule(UnitKind::CellVolume, r"um\^3|fL|fl"),
        rule(UnitKind::Concentration, r"mg/dL|mg/dl|mmol/L"),
        rule(UnitKind::GenericRatio, r"[a-zA-Z]+/[a-zA-Z]+"),
    ]
});

/// Bare numeric literal, used when no unit rule matches.
static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("number pattern must compile"));

/// Extract the first numeric value and its unit from a context window.
///
/// Returns raw capture strings so the original formatting (leading zeros,
/// decimal precision) survives. `("", "")` when the window holds no number;
/// a bare number with an empty unit when no unit rule matches.
pub fn extract_value_and_unit(window: &str) -> (String, String) {
    for rule in UNIT_RULES.iter() {
        if let Some(caps) = rule.regex.captures(window) {
            return (caps[1].to_string(), caps[2].to_string());
        }
    }

    if let Some(number) = BARE_NUMBER.find(window) {
        return (number.as_str().to_string(), String::new());
    }

    (String::new(), String::new())
}
