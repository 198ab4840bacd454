use std::path::Path;

use crate::config;

/// Plain-text knowledge base, pre-chunked for retrieval.
///
/// No vector store: chunks are scored by keyword overlap with the question,
/// which is plenty for a single curated knowledge document and keeps the
/// index read-only and dependency-free after construction.
pub struct KnowledgeIndex {
    chunks: Vec<String>,
}

impl KnowledgeIndex {
    /// Load and chunk the knowledge document. A missing file degrades to an
    /// empty index (questions then run without knowledge context).
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let index = Self::from_text(&text);
                tracing::info!(chunks = index.chunks.len(), "knowledge base loaded");
                index
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "knowledge base unavailable");
                Self { chunks: Vec::new() }
            }
        }
    }

    /// Chunk raw text into overlapping windows of [`config::CHUNK_SIZE`]
    /// characters with [`config::CHUNK_OVERLAP`] characters of overlap.
    pub fn from_text(text: &str) -> Self {
        Self {
            chunks: chunk_text(text, config::CHUNK_SIZE, config::CHUNK_OVERLAP),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Return up to `top_k` chunks scored by distinct-keyword overlap with
    /// the question. Chunks sharing no keyword are never returned.
    pub fn retrieve(&self, question: &str, top_k: usize) -> Vec<String> {
        let keywords = extract_keywords(question);
        if keywords.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f32, &String)> = self
            .chunks
            .iter()
            .filter_map(|chunk| {
                let lower = chunk.to_lowercase();
                let hits = keywords.iter().filter(|k| lower.contains(k.as_str())).count();
                if hits == 0 {
                    None
                } else {
                    Some((hits as f32 / keywords.len() as f32, chunk))
                }
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(top_k);
        scored.into_iter().map(|(_, chunk)| chunk.clone()).collect()
    }
}

/// Lowercased alphanumeric words of 3+ characters, for chunk scoring.
pub fn extract_keywords(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| word.len() >= 3)
        .map(|word| word.to_lowercase())
        .collect()
}

/// Character-windowed chunking with overlap, snapped to char boundaries.
fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let step = size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + size).min(chars.len());
        let chunk: String = chars[start..end].iter().collect();
        let trimmed = chunk.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}
