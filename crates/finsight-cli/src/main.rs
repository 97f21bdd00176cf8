//! finsight — retrieval-augmented Q&A over financial disclosure filings.
//!
//! One-shot queries, an interactive loop, batch evaluation of the
//! validation set, and index status.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finsight_agent::{AgentEngine, AgentService, MetricsLog};
use finsight_core::config::AgentConfig;
use finsight_core::models::AgentResponse;
use finsight_core::traits::{IEmbeddingProvider, ILanguageModel, IVectorIndex};
use finsight_eval::{summarize, EvalLog, EvalRunner, Evaluator, VALIDATION_SET};
use finsight_llm::ChatModel;

#[derive(Parser)]
#[command(name = "finsight", version, about = "Disclosure-filing Q&A agent")]
struct Cli {
    /// TOML config file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "finsight_agent=debug".
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a question. Without --query, starts an interactive loop.
    Query {
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Run the validation set through the pipeline and score it.
    Eval {
        /// Evaluate only the first N samples.
        #[arg(long)]
        samples: Option<usize>,
        /// Results file (JSONL, appended). Defaults to the config value.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show vector index status.
    Status,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => AgentConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AgentConfig::default(),
    };

    let embedder: Arc<dyn IEmbeddingProvider> =
        Arc::from(finsight_embeddings::create_provider(&config.embedding));
    let llm: Arc<dyn ILanguageModel> = Arc::new(ChatModel::new(&config.llm));
    let index: Arc<dyn IVectorIndex> = Arc::from(finsight_index::create_index(
        &config.index,
        config.embedding.dimensions,
    ));

    match cli.command {
        Command::Query { query } => {
            let service = build_service(&config, embedder, llm, index);
            match query {
                Some(query) => print_response(&service.run(&query)),
                None => interactive_loop(&service)?,
            }
        }
        Command::Eval { samples, output } => {
            let service = build_service(&config, embedder, llm.clone(), index);
            let evaluator = Evaluator::new(llm, config.eval.recall_threshold);
            let log = EvalLog::new(output.unwrap_or_else(|| config.eval.results_file.clone()));

            let n = samples.unwrap_or(VALIDATION_SET.len()).min(VALIDATION_SET.len());
            let runner = EvalRunner::new(&service, &evaluator, &log);
            let records = runner.run(&VALIDATION_SET[..n]);
            print_eval_summary(&records);
        }
        Command::Status => {
            let count = index.count().context("querying index status")?;
            println!(
                "collection '{}': {count} points ({} dims)",
                config.index.collection, config.embedding.dimensions
            );
        }
    }

    Ok(())
}

fn build_service(
    config: &AgentConfig,
    embedder: Arc<dyn IEmbeddingProvider>,
    llm: Arc<dyn ILanguageModel>,
    index: Arc<dyn IVectorIndex>,
) -> AgentService {
    // Chart rendering is an external capability; none is wired in the
    // CLI build, so plot queries take the degraded retriever path.
    let engine = AgentEngine::new(config, embedder, llm, index, None);
    AgentService::new(engine, MetricsLog::new(config.paths.metrics_file.clone()))
}

fn interactive_loop(service: &AgentService) -> anyhow::Result<()> {
    println!("finsight — ask about the ingested filings. 'quit' to exit.");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }
        print_response(&service.run(query));
    }
    Ok(())
}

fn print_response(response: &AgentResponse) {
    println!("\n{}", "-".repeat(60));
    println!("{}", response.answer);

    if !response.tools_used.is_empty() {
        println!("\ntools: {}", response.tools_used.join(", "));
    }

    if !response.evidence.is_empty() {
        println!("\nsources ({}):", response.evidence.len());
        for passage in response.evidence.iter().take(5) {
            println!(
                "  [{:.3}] {} {} — {}",
                passage.score,
                passage.metadata.company.as_deref().unwrap_or("?"),
                passage.metadata.fiscal_year.as_deref().unwrap_or("?"),
                passage.metadata.section.as_deref().unwrap_or("?"),
            );
        }
    }

    if let Some(path) = &response.image_path {
        println!("\nchart saved: {}", path.display());
    }

    if let Some(error) = &response.error {
        println!("\nerror: {error}");
    }

    let timing: Vec<String> = [
        "router_latency_s",
        "tool_latency_s",
        "llm_latency_s",
        "total_latency_s",
    ]
    .iter()
    .filter_map(|key| {
        response
            .metrics
            .get(*key)
            .map(|v| format!("{}={v:.2}s", key.trim_end_matches("_latency_s")))
    })
    .collect();
    if !timing.is_empty() {
        println!("\ntiming: {}", timing.join(" | "));
    }
    println!("{}\n", "-".repeat(60));
}

fn print_eval_summary(records: &[finsight_eval::EvalRecord]) {
    println!("\n{}", "=".repeat(72));
    println!("EVALUATION RESULTS");
    println!("{}", "=".repeat(72));
    for record in records {
        let query: String = record.query.chars().take(48).collect();
        println!(
            "  {query:<50} faith={:.2} relev={:.2} recall={:.2} mean={:.2}",
            record.faithfulness, record.answer_relevancy, record.context_recall, record.mean_score
        );
    }
    let summary = summarize(records);
    println!(
        "\n  averages over {} samples — faithfulness: {:.3} | relevancy: {:.3} | \
         recall: {:.3} | mean: {:.3}",
        summary.samples,
        summary.avg_faithfulness,
        summary.avg_relevancy,
        summary.avg_recall,
        summary.avg_mean
    );
    println!("{}", "=".repeat(72));
}
