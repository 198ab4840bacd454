/// Common French function words that never appear as standalone tokens in an
/// English explanation. A handful is enough: we only need to catch the model
/// drifting into French, not classify arbitrary text.
const FRENCH_INDICATORS: &[&str] = &["est", "sont", "votre", "vous", "pour", "dans"];

/// True when an answer looks French rather than English.
///
/// Whole-token comparison over whitespace-split words, so "investigate"
/// containing "est" does not trip it. Tokens keep their punctuation
/// ("est," is not matched) — same tolerance as the rest of the heuristic.
pub fn contains_french_indicators(answer: &str) -> bool {
    let lower = answer.to_lowercase();
    lower
        .split_whitespace()
        .any(|word| FRENCH_INDICATORS.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_french_sentence() {
        assert!(contains_french_indicators(
            "Votre taux est normal pour un adulte"
        ));
    }

    #[test]
    fn passes_english_sentence() {
        assert!(!contains_french_indicators(
            "Your hemoglobin level is within the normal range."
        ));
    }

    #[test]
    fn indicator_must_be_standalone_token() {
        assert!(!contains_french_indicators(
            "We suggest you investigate this result."
        ));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(contains_french_indicators("POUR les patients"));
    }

    #[test]
    fn empty_answer_is_not_french() {
        assert!(!contains_french_indicators(""));
    }
}
