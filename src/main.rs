use std::process::ExitCode;

use clarilab::config;
use clarilab::pipeline::analysis::RangeCatalogue;
use clarilab::pipeline::extraction::PdfTextExtractor;
use clarilab::pipeline::rag::{KnowledgeIndex, KnowledgePipeline, KnowledgeService, OllamaClient};
use clarilab::pipeline::ReportProcessor;

fn main() -> ExitCode {
    clarilab::init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(report_path) = args.next() else {
        eprintln!("usage: clarilab <report.pdf> [question]");
        return ExitCode::from(2);
    };
    let question = args.next();

    tracing::info!(
        app = config::APP_NAME,
        version = config::APP_VERSION,
        report = %report_path,
        "starting analysis"
    );

    let bytes = match std::fs::read(&report_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("cannot read {report_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let ranges = RangeCatalogue::load(&config::reference_ranges_path());
    let index = KnowledgeIndex::load(&config::knowledge_base_path());
    let knowledge = KnowledgePipeline::new(OllamaClient::from_config(), index);
    let extractor = PdfTextExtractor;
    let processor = ReportProcessor::new(&extractor, &ranges, &knowledge);

    let filename = std::path::Path::new(&report_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(report_path.clone());

    let analysis = match processor.process_upload(&filename, &bytes) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("analysis failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&analysis) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("cannot serialize analysis: {e}");
            return ExitCode::FAILURE;
        }
    }

    if let Some(question) = question {
        let answer = knowledge.answer_question(&question, &analysis.extracted_text);
        println!("\nQ: {question}\nA: {}", answer.answer);
        if !answer.sources.is_empty() {
            println!("Sources: {}", answer.sources.len());
        }
    }

    ExitCode::SUCCESS
}
