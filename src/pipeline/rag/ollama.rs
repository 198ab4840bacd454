use serde::{Deserialize, Serialize};

use super::types::LlmGenerate;
use super::RagError;
use crate::config;

/// Ollama HTTP client for local LLM inference.
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a client for a specific Ollama instance and model.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client configured from the environment (CLARILAB_OLLAMA_URL,
    /// CLARILAB_MODEL) with defaults for a local instance.
    pub fn from_config() -> Self {
        Self::new(
            &config::ollama_base_url(),
            &config::ollama_model(),
            config::LLM_TIMEOUT_SECS,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl LlmGenerate for OllamaClient {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, RagError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                RagError::OllamaConnection(self.base_url.clone())
            } else if e.is_timeout() {
                RagError::HttpClient(format!("Request timed out after {}s", self.timeout_secs))
            } else {
                RagError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RagError::OllamaError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .map_err(|e| RagError::HttpClient(e.to_string()))?;

        if parsed.response.trim().is_empty() {
            return Err(RagError::EmptyResponse);
        }

        Ok(parsed.response)
    }
}
