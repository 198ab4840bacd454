use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clarilab";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Knowledge base chunking: characters per chunk.
pub const CHUNK_SIZE: usize = 500;
/// Knowledge base chunking: overlap between consecutive chunks.
pub const CHUNK_OVERLAP: usize = 50;
/// How many knowledge chunks to hand to the LLM per question.
pub const TOP_K_RESULTS: usize = 5;

/// Timeout for a single LLM generation call.
pub const LLM_TIMEOUT_SECS: u64 = 300;

/// How much of the term's surrounding report text to include in an explain query.
pub const EXPLAIN_CONTEXT_CHARS: usize = 200;
/// How much of the cleaned report to include as context for free-form questions.
pub const QUESTION_CONTEXT_CHARS: usize = 400;
/// How much of the cleaned report to echo back in the analysis result.
pub const REPORT_EXCERPT_CHARS: usize = 1000;

/// Get the data directory holding reference ranges and the knowledge base.
/// Defaults to ./data, overridable via CLARILAB_DATA_DIR.
pub fn data_dir() -> PathBuf {
    std::env::var_os("CLARILAB_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Path to the reference range resource (absence is non-fatal).
pub fn reference_ranges_path() -> PathBuf {
    data_dir().join("reference_ranges.json")
}

/// Path to the plain-text medical knowledge base (absence is non-fatal).
pub fn knowledge_base_path() -> PathBuf {
    data_dir().join("medical_knowledge.txt")
}

/// Base URL of the local Ollama instance.
pub fn ollama_base_url() -> String {
    std::env::var("CLARILAB_OLLAMA_URL")
        .unwrap_or_else(|_| "http://localhost:11434".to_string())
}

/// Model name used for explanations, overridable via CLARILAB_MODEL.
pub fn ollama_model() -> String {
    std::env::var("CLARILAB_MODEL").unwrap_or_else(|_| "llama3.2".to_string())
}

/// Default tracing filter when CLARILAB_LOG is not set.
pub fn default_log_filter() -> String {
    "info,clarilab=debug".to_string()
}
