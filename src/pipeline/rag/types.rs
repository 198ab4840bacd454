use serde::{Deserialize, Serialize};

use super::language::contains_french_indicators;
use super::prompt;
use super::RagError;

/// Answer from the knowledge pipeline, with the knowledge chunks it drew on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeAnswer {
    pub answer: String,
    pub sources: Vec<String>,
}

/// Trait for raw LLM text generation.
pub trait LlmGenerate {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, RagError>;
}

/// The knowledge-answering capability the report pipeline depends on.
///
/// `ask` can fail; the provided `explain_term` and `answer_question` wrappers
/// never do — they absorb failures into canned fallbacks so one term's
/// explanation failing cannot abort the rest of a report. `explain_term`
/// additionally carries the single language-correction retry: models
/// occasionally answer in French when the knowledge context skews that way,
/// and one English-only re-ask is the only retry anywhere in the system.
pub trait KnowledgeService {
    fn ask(&self, question: &str, context: &str) -> Result<KnowledgeAnswer, RagError>;

    /// Explain a medical term in plain language. Infallible by contract.
    fn explain_term(&self, term: &str, report_context: &str) -> String {
        let query = prompt::build_explain_query(term, report_context);

        let answer = match self.ask(&query, "") {
            Ok(result) => result.answer,
            Err(e) => {
                tracing::error!(term, error = %e, "explanation failed, using fallback");
                return prompt::explain_fallback(term);
            }
        };

        if !contains_french_indicators(&answer) {
            return answer;
        }

        tracing::warn!(term, "non-English response detected, retrying once");
        match self.ask(&prompt::build_retry_query(term), "") {
            Ok(result) => result.answer,
            Err(e) => {
                tracing::error!(term, error = %e, "retry failed, using fallback");
                prompt::explain_fallback(term)
            }
        }
    }

    /// Answer a free-form question about a report. Infallible by contract.
    fn answer_question(&self, question: &str, report_context: &str) -> KnowledgeAnswer {
        let full_question = prompt::build_question(question, report_context);

        match self.ask(&full_question, report_context) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(error = %e, "question answering failed, using fallback");
                KnowledgeAnswer {
                    answer: prompt::question_fallback(),
                    sources: Vec::new(),
                }
            }
        }
    }
}
