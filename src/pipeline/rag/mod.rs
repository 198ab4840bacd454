pub mod language;
pub mod ollama;
pub mod orchestrator;
pub mod prompt;
pub mod retrieval;
pub mod types;

pub use language::*;
pub use ollama::*;
pub use orchestrator::*;
pub use prompt::*;
pub use retrieval::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RagError {
    #[error("Ollama is not running at {0}")]
    OllamaConnection(String),

    #[error("Ollama returned error (status {status}): {body}")]
    OllamaError { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
