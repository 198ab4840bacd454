//! Clarilab: turns lab report PDFs into plain-language analyses.
//!
//! The crate extracts text from a report, recognizes known lab tests and
//! their measured values, classifies each against population-specific
//! reference ranges, and asks a local Ollama model to explain terms and
//! summarize the findings. Everything runs locally; the only network
//! dependency is the Ollama endpoint.

pub mod config;
pub mod models;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `CLARILAB_LOG` overrides the default filter. Safe to call once per
/// process; a second call is ignored so tests can set their own subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("CLARILAB_LOG")
        .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
