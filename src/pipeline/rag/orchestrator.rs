use super::prompt::{build_prompt, KNOWLEDGE_SYSTEM_PROMPT};
use super::retrieval::KnowledgeIndex;
use super::types::{KnowledgeAnswer, KnowledgeService, LlmGenerate};
use super::RagError;
use crate::config;

/// Knowledge-answering pipeline: retrieve → prompt → generate.
///
/// Generic over the generator so tests run against a mock LLM. Failure
/// handling (fallbacks, the language retry) lives on the [`KnowledgeService`]
/// trait; this type only produces honest errors.
pub struct KnowledgePipeline<G: LlmGenerate> {
    generator: G,
    index: KnowledgeIndex,
}

impl<G: LlmGenerate> KnowledgePipeline<G> {
    pub fn new(generator: G, index: KnowledgeIndex) -> Self {
        if index.is_empty() {
            tracing::warn!("knowledge index is empty, answers will lack knowledge context");
        }
        Self { generator, index }
    }
}

impl<G: LlmGenerate> KnowledgeService for KnowledgePipeline<G> {
    fn ask(&self, question: &str, _context: &str) -> Result<KnowledgeAnswer, RagError> {
        let sources = self.index.retrieve(question, config::TOP_K_RESULTS);
        let prompt = build_prompt(question, &sources);

        let answer = self.generator.generate(KNOWLEDGE_SYSTEM_PROMPT, &prompt)?;

        Ok(KnowledgeAnswer { answer, sources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoLlm;

    impl LlmGenerate for EchoLlm {
        fn generate(&self, _system: &str, prompt: &str) -> Result<String, RagError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    struct FailingLlm;

    impl LlmGenerate for FailingLlm {
        fn generate(&self, _system: &str, _prompt: &str) -> Result<String, RagError> {
            Err(RagError::OllamaConnection("http://localhost:11434".into()))
        }
    }

    #[test]
    fn ask_includes_retrieved_sources() {
        let index = KnowledgeIndex::from_text(
            "Hemoglobin is the oxygen-carrying protein of red blood cells.",
        );
        let pipeline = KnowledgePipeline::new(EchoLlm, index);

        let result = pipeline.ask("What is hemoglobin?", "").unwrap();
        assert_eq!(result.sources.len(), 1);
        assert!(result.answer.contains("oxygen-carrying"));
    }

    #[test]
    fn ask_with_empty_index_still_answers() {
        let pipeline = KnowledgePipeline::new(EchoLlm, KnowledgeIndex::from_text(""));
        let result = pipeline.ask("What is TSH?", "").unwrap();
        assert!(result.sources.is_empty());
        assert!(result.answer.contains("What is TSH?"));
    }

    #[test]
    fn generator_errors_propagate_from_ask() {
        let pipeline = KnowledgePipeline::new(FailingLlm, KnowledgeIndex::from_text(""));
        assert!(pipeline.ask("anything", "").is_err());
    }

    #[test]
    fn trait_fallbacks_cover_generator_failure() {
        // The KnowledgeService default methods absorb the error.
        let pipeline = KnowledgePipeline::new(FailingLlm, KnowledgeIndex::from_text(""));
        let explanation = pipeline.explain_term("Glucose", "");
        assert!(explanation.contains("Glucose"));
    }
}
