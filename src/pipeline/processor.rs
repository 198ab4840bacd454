//! Report processing orchestrator.
//!
//! Single entry point driving the full report pipeline:
//! stage upload → extract text → clean → infer gender → extract terms →
//! explain + classify each term → summarize.
//!
//! Uses trait-based DI for the PDF extractor and the knowledge service so the
//! orchestrator stays fully testable with mock implementations.

use std::io::Write;

use thiserror::Error;

use crate::config;
use crate::models::{Gender, MedicalTerm, ReportAnalysis};
use crate::pipeline::analysis::{
    analyze_value, extract_medical_terms, infer_gender, ExtractedTerm, RangeCatalogue,
};
use crate::pipeline::extraction::{clean_report_text, full_text, ExtractionError, PdfExtractor};
use crate::pipeline::rag::{truncate_chars, KnowledgeService};

/// Errors that abort processing of a whole report. Per-term failures never
/// surface here — they degrade to fallbacks inside the loop.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Only PDF files are supported, got: {0}")]
    UnsupportedFile(String),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Drives one report through extraction, analysis and explanation.
pub struct ReportProcessor<'a, K: KnowledgeService> {
    extractor: &'a dyn PdfExtractor,
    ranges: &'a RangeCatalogue,
    knowledge: &'a K,
}

impl<'a, K: KnowledgeService> ReportProcessor<'a, K> {
    pub fn new(
        extractor: &'a dyn PdfExtractor,
        ranges: &'a RangeCatalogue,
        knowledge: &'a K,
    ) -> Self {
        Self {
            extractor,
            ranges,
            knowledge,
        }
    }

    /// Process an uploaded report.
    ///
    /// The upload is staged to a temp copy first; the temp file is removed on
    /// every exit path, including extraction failures, when the guard drops.
    pub fn process_upload(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<ReportAnalysis, ProcessingError> {
        if !filename.to_ascii_lowercase().ends_with(".pdf") {
            return Err(ProcessingError::UnsupportedFile(filename.to_string()));
        }

        let mut staged = tempfile::NamedTempFile::new()?;
        staged.write_all(bytes)?;
        staged.flush()?;
        tracing::info!(filename, staged = %staged.path().display(), "processing report");

        let staged_bytes = std::fs::read(staged.path())?;
        let pages = self.extractor.extract_pages(&staged_bytes)?;

        Ok(self.analyze_text(&full_text(&pages)))
    }

    /// Analyze already-extracted report text. Infallible: every per-term or
    /// knowledge-service failure degrades to a fallback.
    pub fn analyze_text(&self, raw_text: &str) -> ReportAnalysis {
        let cleaned = clean_report_text(raw_text);
        let gender = infer_gender(&cleaned);
        tracing::info!(?gender, "inferred patient gender");

        let extracted = extract_medical_terms(&cleaned);
        tracing::info!(count = extracted.len(), "found medical terms");

        let medical_terms: Vec<MedicalTerm> = extracted
            .iter()
            .map(|item| self.process_term(item, gender))
            .collect();

        let findings = build_findings_summary(&medical_terms);
        let summary_prompt = build_summary_prompt(&findings, &cleaned);
        let summary = match self
            .knowledge
            .ask(&summary_prompt, truncate_chars(&cleaned, config::QUESTION_CONTEXT_CHARS))
        {
            Ok(result) => result.answer,
            Err(e) => {
                tracing::error!(error = %e, "summary generation failed, using fallback");
                fallback_summary(&medical_terms)
            }
        };

        ReportAnalysis {
            extracted_text: truncate_chars(&cleaned, config::REPORT_EXCERPT_CHARS).to_string(),
            medical_terms,
            summary,
        }
    }

    /// Explain and classify one extracted term. Never fails: explanation
    /// falls back to a canned string and an unparseable value keeps the
    /// unknown-abnormality default.
    fn process_term(&self, item: &ExtractedTerm, gender: Option<Gender>) -> MedicalTerm {
        let explanation = self.knowledge.explain_term(&item.term, &item.context);

        let (is_abnormal, status) = if item.value.is_empty() {
            (false, None)
        } else {
            match item.value.parse::<f64>() {
                Ok(value) => {
                    let result =
                        analyze_value(self.ranges, &item.term, value, &item.unit, None, gender);
                    (result.is_abnormal, Some(result.status.as_str().to_string()))
                }
                Err(_) => {
                    tracing::warn!(term = %item.term, value = %item.value, "could not parse value");
                    (false, None)
                }
            }
        };

        MedicalTerm {
            term: item.term.clone(),
            value: item.value.clone(),
            unit: item.unit.clone(),
            explanation,
            is_abnormal,
            status,
        }
    }
}

/// Plain-text findings digest handed to the LLM as summary input.
/// Caps: 5 abnormal bullets, 3 normal bullets.
pub fn build_findings_summary(terms: &[MedicalTerm]) -> String {
    let abnormal: Vec<String> = terms
        .iter()
        .filter(|t| t.is_abnormal && !t.value.is_empty())
        .map(|t| {
            format!(
                "{} is {} at {} {}",
                t.term,
                t.status.as_deref().unwrap_or("unknown").to_uppercase(),
                t.value,
                t.unit
            )
        })
        .collect();

    let normal: Vec<String> = terms
        .iter()
        .filter(|t| !t.is_abnormal && !t.value.is_empty())
        .map(|t| format!("{}: {} {}", t.term, t.value, t.unit))
        .collect();

    let abnormal_block = if abnormal.is_empty() {
        "• All values within normal range".to_string()
    } else {
        abnormal
            .iter()
            .take(5)
            .map(|f| format!("• {f}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let normal_block = normal
        .iter()
        .take(3)
        .map(|f| format!("• {f}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Test Results Summary:\n\
         - Total tests: {}\n\
         - Abnormal values: {}\n\
         - Normal values: {}\n\n\
         Key Abnormal Results:\n{}\n\n\
         Sample Normal Results:\n{}\n",
        terms.len(),
        abnormal.len(),
        normal.len(),
        abnormal_block,
        normal_block
    )
}

/// Prompt asking for a 4-5 bullet patient-facing summary of the findings.
fn build_summary_prompt(findings: &str, cleaned_text: &str) -> String {
    format!(
        "You are a medical assistant. Based on this blood test report, write a clear summary \
         in 4-5 bullet points for the patient.\n\n\
         {findings}\n\
         Report Context:\n{}\n\n\
         Write 4-5 bullet points that:\n\
         • State what type of tests were performed\n\
         • Highlight any abnormal values and briefly explain what they might indicate\n\
         • Mention important normal values\n\
         • Suggest next steps or what to discuss with doctor\n\n\
         Use simple, empathetic English. Format as bullet points starting with •.",
        truncate_chars(cleaned_text, 500)
    )
}

/// Deterministic summary used when the knowledge service is unavailable.
pub fn fallback_summary(terms: &[MedicalTerm]) -> String {
    let abnormal: Vec<&MedicalTerm> = terms
        .iter()
        .filter(|t| t.is_abnormal && !t.value.is_empty())
        .collect();
    let normal_count = terms
        .iter()
        .filter(|t| !t.is_abnormal && !t.value.is_empty())
        .count();

    let abnormal_names = abnormal
        .iter()
        .take(3)
        .map(|t| t.term.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "• Complete Blood Count (CBC) and related tests were performed to assess your overall health.\n\
         • {} value(s) are outside normal range: {}\n\
         • {} value(s) are within normal limits, which is positive.\n\
         • Please consult your doctor to discuss these results and determine next steps.",
        abnormal.len(),
        abnormal_names,
        normal_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analysis::{PopulationRanges, ReferenceRange};
    use crate::pipeline::rag::{KnowledgeAnswer, RagError};
    use std::collections::HashMap;

    /// Extractor that returns fixed pages regardless of input bytes.
    struct FixedPdf(Vec<String>);

    impl PdfExtractor for FixedPdf {
        fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
            Ok(self.0.clone())
        }
    }

    struct HappyKnowledge;

    impl KnowledgeService for HappyKnowledge {
        fn ask(&self, question: &str, _context: &str) -> Result<KnowledgeAnswer, RagError> {
            Ok(KnowledgeAnswer {
                answer: format!("answer for: {}", truncate_chars(question, 40)),
                sources: vec![],
            })
        }
    }

    struct DownKnowledge;

    impl KnowledgeService for DownKnowledge {
        fn ask(&self, _question: &str, _context: &str) -> Result<KnowledgeAnswer, RagError> {
            Err(RagError::OllamaConnection("http://localhost:11434".into()))
        }
    }

    fn range(min: f64, max: f64, unit: &str) -> ReferenceRange {
        ReferenceRange {
            min,
            max,
            unit: unit.to_string(),
        }
    }

    fn hemoglobin_catalogue() -> RangeCatalogue {
        let populations = PopulationRanges::from_entries(vec![
            ("default".to_string(), range(13.0, 17.0, "g/dL")),
            ("female".to_string(), range(12.0, 15.5, "g/dL")),
        ]);
        RangeCatalogue::from_map(HashMap::from([("Hemoglobin".to_string(), populations)]))
    }

    fn term(name: &str, value: &str, abnormal: bool, status: Option<&str>) -> MedicalTerm {
        MedicalTerm {
            term: name.to_string(),
            value: value.to_string(),
            unit: "u".to_string(),
            explanation: String::new(),
            is_abnormal: abnormal,
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn processes_upload_end_to_end() {
        let extractor = FixedPdf(vec!["Hemoglobin 13.5 g/dL".to_string()]);
        let ranges = hemoglobin_catalogue();
        let processor = ReportProcessor::new(&extractor, &ranges, &HappyKnowledge);

        let analysis = processor.process_upload("report.pdf", b"%PDF-fake").unwrap();
        assert_eq!(analysis.medical_terms.len(), 1);
        let hb = &analysis.medical_terms[0];
        assert_eq!(hb.term, "Hemoglobin");
        assert_eq!(hb.value, "13.5");
        assert_eq!(hb.status.as_deref(), Some("normal"));
        assert!(!hb.is_abnormal);
        assert!(analysis.extracted_text.contains("Hemoglobin"));
        assert!(analysis.summary.starts_with("answer for:"));
    }

    #[test]
    fn rejects_non_pdf_uploads() {
        let extractor = FixedPdf(vec![]);
        let ranges = RangeCatalogue::default();
        let processor = ReportProcessor::new(&extractor, &ranges, &HappyKnowledge);

        let result = processor.process_upload("report.docx", b"bytes");
        assert!(matches!(result, Err(ProcessingError::UnsupportedFile(_))));
    }

    #[test]
    fn inferred_gender_drives_classification() {
        // 16.0 is normal for the default range but high for the female range.
        let extractor = FixedPdf(vec!["Patient Sex: Female\nHemoglobin 16.0 g/dL".to_string()]);
        let ranges = hemoglobin_catalogue();
        let processor = ReportProcessor::new(&extractor, &ranges, &HappyKnowledge);

        let analysis = processor.process_upload("cbc.pdf", b"%PDF-fake").unwrap();
        let hb = &analysis.medical_terms[0];
        assert!(hb.is_abnormal);
        assert_eq!(hb.status.as_deref(), Some("high"));
    }

    #[test]
    fn knowledge_outage_degrades_not_aborts() {
        let extractor = FixedPdf(vec!["Hemoglobin 20 g/dL and Glucose 95 mg/dL".to_string()]);
        let ranges = hemoglobin_catalogue();
        let processor = ReportProcessor::new(&extractor, &ranges, &DownKnowledge);

        let analysis = processor.process_upload("cbc.pdf", b"%PDF-fake").unwrap();
        // Both terms survive with fallback explanations.
        assert_eq!(analysis.medical_terms.len(), 2);
        for term in &analysis.medical_terms {
            assert!(term.explanation.contains("medical test"));
        }
        // Classification still works without the knowledge service.
        assert!(analysis.medical_terms[0].is_abnormal);
        // Summary degrades to the deterministic fallback.
        assert!(analysis.summary.contains("consult your doctor"));
        assert!(analysis.summary.contains("Hemoglobin"));
    }

    #[test]
    fn empty_value_keeps_unknown_abnormality_default() {
        let extractor = FixedPdf(vec!["Widal Test pending".to_string()]);
        let ranges = RangeCatalogue::default();
        let processor = ReportProcessor::new(&extractor, &ranges, &HappyKnowledge);

        let analysis = processor.process_upload("widal.pdf", b"%PDF-fake").unwrap();
        let widal = analysis
            .medical_terms
            .iter()
            .find(|t| t.term == "Widal Test")
            .unwrap();
        assert!(!widal.is_abnormal);
        assert!(widal.status.is_none());
    }

    #[test]
    fn unparseable_value_skips_classification_only() {
        let item = ExtractedTerm {
            term: "Glucose".to_string(),
            value: "9.9.9".to_string(),
            unit: "mg/dL".to_string(),
            context: String::new(),
        };
        let extractor = FixedPdf(vec![]);
        let ranges = RangeCatalogue::default();
        let processor = ReportProcessor::new(&extractor, &ranges, &HappyKnowledge);

        let term = processor.process_term(&item, None);
        assert!(!term.is_abnormal);
        assert!(term.status.is_none());
        assert!(!term.explanation.is_empty(), "explanation still produced");
    }

    #[test]
    fn findings_summary_caps_bullets() {
        let mut terms = Vec::new();
        for i in 0..8 {
            terms.push(term(&format!("Abn{i}"), "1", true, Some("high")));
        }
        for i in 0..5 {
            terms.push(term(&format!("Norm{i}"), "2", false, Some("normal")));
        }

        let findings = build_findings_summary(&terms);
        assert!(findings.contains("Total tests: 13"));
        assert!(findings.contains("Abnormal values: 8"));
        assert!(findings.contains("Normal values: 5"));
        assert_eq!(findings.matches("• Abn").count(), 5);
        assert_eq!(findings.matches("• Norm").count(), 3);
        assert!(findings.contains("Abn0 is HIGH at 1 u"));
    }

    #[test]
    fn findings_summary_with_no_abnormals() {
        let terms = vec![term("Glucose", "95", false, Some("normal"))];
        let findings = build_findings_summary(&terms);
        assert!(findings.contains("• All values within normal range"));
    }

    #[test]
    fn valueless_terms_count_toward_neither_bucket() {
        let terms = vec![term("CBC", "", false, None)];
        let findings = build_findings_summary(&terms);
        assert!(findings.contains("Total tests: 1"));
        assert!(findings.contains("Abnormal values: 0"));
        assert!(findings.contains("Normal values: 0"));
    }

    #[test]
    fn fallback_summary_names_first_three_abnormals() {
        let terms = vec![
            term("A", "1", true, Some("high")),
            term("B", "1", true, Some("low")),
            term("C", "1", true, Some("high")),
            term("D", "1", true, Some("high")),
            term("E", "1", false, Some("normal")),
        ];
        let summary = fallback_summary(&terms);
        assert!(summary.contains("4 value(s) are outside normal range: A, B, C"));
        assert!(summary.contains("1 value(s) are within normal limits"));
    }
}
