use crate::config;

/// System prompt for every knowledge-base question.
pub const KNOWLEDGE_SYSTEM_PROMPT: &str = r#"You are a helpful medical assistant that explains medical terms and lab reports in simple English.
Use the provided context from the medical knowledge base and the patient's report to answer.

Instructions:
- CRITICAL: Respond ONLY in English, never in French or other languages
- Explain medical terms in simple, easy-to-understand language
- If discussing lab values, mention whether they're normal, high, or low
- Be empathetic and clear
- If you don't have enough information, say "I don't have enough information about [topic] in the provided context"
- Keep explanations concise (2-3 sentences)"#;

/// Build the generation prompt from a question and retrieved knowledge chunks.
pub fn build_prompt(question: &str, chunks: &[String]) -> String {
    let mut prompt = String::new();

    if !chunks.is_empty() {
        prompt.push_str("Context from knowledge base:\n");
        for chunk in chunks {
            prompt.push_str(chunk);
            prompt.push_str("\n---\n");
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!("Question: {question}\n\n"));
    prompt.push_str("Answer in English:");
    prompt
}

/// Query asking the model to explain one lab term, with up to
/// [`config::EXPLAIN_CONTEXT_CHARS`] of surrounding report text.
pub fn build_explain_query(term: &str, report_context: &str) -> String {
    let mut query =
        format!("Explain what {term} means in simple English. Be specific and concise (2-3 sentences).");
    if !report_context.is_empty() {
        let excerpt = truncate_chars(report_context, config::EXPLAIN_CONTEXT_CHARS);
        query.push_str(&format!(" Context from patient report: {excerpt}"));
    }
    query
}

/// Blunt English-only rephrase used for the single language-correction retry.
pub fn build_retry_query(term: &str) -> String {
    format!("IN ENGLISH ONLY: What is {term}? Explain briefly.")
}

/// Frame a free-form question, prefixing a report excerpt when one exists.
pub fn build_question(question: &str, report_context: &str) -> String {
    if report_context.is_empty() {
        format!("Answer in English: {question}")
    } else {
        let excerpt = truncate_chars(report_context, config::QUESTION_CONTEXT_CHARS);
        format!(
            "Based on this medical report excerpt: {excerpt}...\n\nQuestion (answer in English): {question}"
        )
    }
}

/// Canned explanation when the knowledge service is unavailable.
pub fn explain_fallback(term: &str) -> String {
    format!(
        "A {term} is a medical test that measures specific values in your blood to assess your health."
    )
}

/// Canned answer when question answering is unavailable.
pub fn question_fallback() -> String {
    "I'm having trouble answering this question. Please try rephrasing it.".to_string()
}

/// Take the first `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
