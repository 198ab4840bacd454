use std::sync::LazyLock;

use regex::Regex;

/// A canonical test name with the pattern that recognizes its synonyms
/// and abbreviations in free report text.
pub struct TermPattern {
    pub name: &'static str,
    pub regex: Regex,
}

fn term(name: &'static str, pattern: &str) -> TermPattern {
    TermPattern {
        name,
        regex: Regex::new(&format!("(?i){pattern}"))
            .unwrap_or_else(|e| panic!("term pattern for {name} must compile: {e}")),
    }
}

/// Catalogue of recognized lab tests, in fixed iteration order.
///
/// The order is load-bearing: extraction results follow catalogue order, not
/// position-in-document order. Grouped by panel: hematology, differential,
/// inflammation, metabolic, lipid, liver, thyroid, serology, miscellaneous.
pub static TERM_CATALOGUE: LazyLock<Vec<TermPattern>> = LazyLock::new(|| {
    vec![
        term("CBC", r"\b(CBC|Complete Blood Count)\b"),
        term("Hemoglobin", r"\b(Haemoglobin|Hemoglobin|HGB|Hgb)\b"),
        term("WBC", r"\b(WBC Count|WBC|White Blood Cell)\b"),
        term("RBC", r"\b(RBC Count|RBC|Red Blood Cell)\b"),
        term("Platelets", r"\b(Platelet Count|Platelet)\b"),
        term("Hematocrit", r"\b(Hematocrit|HCT|PCV|Packed Cell Volume)\b"),
        term("MCV", r"\b(MCV|Mean Corpuscular Volume)\b"),
        term("MCH", r"\b(MCH|Mean Corpuscular Hemoglobin)\b"),
        term("MCHC", r"\b(MCHC|Mean Corpuscular Hemoglobin Concentration)\b"),
        term("RDW", r"\b(RDW|Red Cell Distribution Width|Red Distribution Width)\b"),
        term("MPV", r"\b(MPV|Mean Platelet Volume)\b"),
        term("Differential Count", r"\b(Differential Count)\b"),
        term("Neutrophils", r"\b(Neutrophil)\b"),
        term("Lymphocytes", r"\b(Lymphocyte)\b"),
        term("Eosinophils", r"\b(Eosinophil)\b"),
        term("Monocytes", r"\b(Monocyte)\b"),
        term("Basophils", r"\b(Basophil)\b"),
        term("ESR", r"\b(Erythrocyte Sedimentation Rate|ESR)\b"),
        term("CRP", r"\b(CRP|C-Reactive Protein)\b"),
        term("Glucose", r"\b(Glucose|Blood Sugar|FBS|Fasting Blood Sugar)\b"),
        term("HbA1c", r"\b(HbA1c|Hemoglobin A1c|A1C|Glycated Hemoglobin)\b"),
        term("Creatinine", r"\b(Creatinine|CREAT|Serum Creatinine)\b"),
        term("BUN", r"\b(BUN|Blood Urea Nitrogen|Urea)\b"),
        term("Sodium", r"\b(Sodium|Na|Serum Sodium)\b"),
        term("Potassium", r"\b(Potassium|K|Serum Potassium)\b"),
        term("Chloride", r"\b(Chloride|Cl)\b"),
        term("Calcium", r"\b(Calcium|Ca|Serum Calcium)\b"),
        term("Cholesterol", r"\b(Cholesterol|CHOL|Total Cholesterol)\b"),
        term("LDL", r"\b(LDL|Low Density Lipoprotein|Bad Cholesterol)\b"),
        term("HDL", r"\b(HDL|High Density Lipoprotein|Good Cholesterol)\b"),
        term("Triglycerides", r"\b(Triglyceride)\b"),
        term("VLDL", r"\b(VLDL|Very Low Density Lipoprotein)\b"),
        term("ALT", r"\b(ALT|SGPT|Alanine Aminotransferase)\b"),
        term("AST", r"\b(AST|SGOT|Aspartate Aminotransferase)\b"),
        term("Bilirubin", r"\b(Bilirubin|BILI|Total Bilirubin)\b"),
        term("ALP", r"\b(ALP|Alkaline Phosphatase)\b"),
        term("Albumin", r"\b(Albumin|ALB|Serum Albumin)\b"),
        term("TSH", r"\b(TSH|Thyroid Stimulating Hormone)\b"),
        term("T3", r"\b(T3|Triiodothyronine)\b"),
        term("T4", r"\b(T4|Thyroxine|Free T4)\b"),
        term("Widal Test (S.Typhi)", r"\b(S\.Typhi|Salmonella Typhi)\b"),
        term("Widal Test", r"\b(Widal Test|Widal)\b"),
        term("Ferritin", r"\b(Ferritin|Serum Ferritin)\b"),
        term("Iron", r"\b(Iron|Serum Iron|Fe)\b"),
        term("Vitamin D", r"\b(Vitamin D|25-OH Vitamin D|Vit D)\b"),
        term("Vitamin B12", r"\b(Vitamin B12|B12|Cobalamin)\b"),
        term("PSA", r"\b(PSA|Prostate Specific Antigen)\b"),
        term("Uric Acid", r"\b(Uric Acid|Urate)\b"),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalogue_has_no_duplicate_names() {
        let mut seen = HashSet::new();
        for entry in TERM_CATALOGUE.iter() {
            assert!(seen.insert(entry.name), "duplicate catalogue name: {}", entry.name);
        }
    }

    #[test]
    fn all_patterns_compile_and_match_case_insensitively() {
        // Forcing the LazyLock verifies every pattern compiles.
        assert!(TERM_CATALOGUE.len() >= 45);

        let hemoglobin = TERM_CATALOGUE
            .iter()
            .find(|t| t.name == "Hemoglobin")
            .unwrap();
        assert!(hemoglobin.regex.is_match("HAEMOGLOBIN"));
        assert!(hemoglobin.regex.is_match("hgb"));
    }

    #[test]
    fn synonyms_resolve_to_canonical_names() {
        let cases = [
            ("Packed Cell Volume", "Hematocrit"),
            ("Fasting Blood Sugar", "Glucose"),
            ("SGPT", "ALT"),
            ("High Density Lipoprotein", "HDL"),
            ("A1C", "HbA1c"),
            ("Salmonella Typhi", "Widal Test (S.Typhi)"),
        ];
        for (synonym, canonical) in cases {
            let hit = TERM_CATALOGUE
                .iter()
                .find(|t| t.regex.is_match(synonym))
                .unwrap_or_else(|| panic!("no pattern matched {synonym}"));
            assert_eq!(hit.name, canonical, "for synonym {synonym}");
        }
    }

    #[test]
    fn word_boundaries_prevent_substring_hits() {
        let cbc = TERM_CATALOGUE.iter().find(|t| t.name == "CBC").unwrap();
        assert!(!cbc.regex.is_match("ACBCX"));
        assert!(cbc.regex.is_match("CBC:"));
    }

    #[test]
    fn catalogue_order_starts_with_hematology() {
        assert_eq!(TERM_CATALOGUE[0].name, "CBC");
        assert_eq!(TERM_CATALOGUE[1].name, "Hemoglobin");
    }
}
