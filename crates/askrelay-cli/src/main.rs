use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use askrelay_core::AnswerRecord;
use askrelay_runtime::{log_provider_status, FallbackOrchestrator, ProviderKind, RelayConfig};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "askrelay",
    version,
    about = "Ask a question and relay it to the first LLM provider that answers"
)]
struct Cli {
    /// Question to ask (words are joined with spaces; prompts on stdin when omitted)
    #[arg(short, long, num_args = 1..)]
    question: Vec<String>,

    /// API key to use for this run only
    #[arg(long)]
    api_key: Option<String>,

    /// Which provider --api-key belongs to
    #[arg(long, value_enum, default_value_t = ProviderArg::Gemini)]
    provider: ProviderArg,

    /// Gemini model override (e.g. models/text-bison-001)
    #[arg(long)]
    model: Option<String>,

    /// YAML settings file with provider keys and overrides
    #[arg(long, env = "ASKRELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Per-provider request timeout (e.g. 60s, 2m)
    #[arg(long, value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Print the full answer record as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ProviderArg {
    Gemini,
    Huggingface,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Gemini => ProviderKind::Gemini,
            ProviderArg::Huggingface => ProviderKind::HuggingFace,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = build_config(&cli)?;
    let question = match joined_question(&cli.question) {
        Some(question) => question,
        None => read_question(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let orchestrator = FallbackOrchestrator::from_config(&config);
    log_provider_status(&orchestrator, &config);
    info!(providers = ?orchestrator.chain().names(), "Relaying question");
    let record = orchestrator.ask(&question).await;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&record).context("failed to serialize answer record")?
        );
    } else {
        print!("{}", render_text(&record));
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Resolve configuration, then apply command-line overrides on top.
fn build_config(cli: &Cli) -> Result<RelayConfig> {
    let mut config = match &cli.config {
        Some(path) => RelayConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => RelayConfig::from_env().context("failed to read configuration from environment")?,
    };

    if let Some(key) = &cli.api_key {
        if key.trim().is_empty() {
            bail!("--api-key must not be empty");
        }
        debug!(provider = ?cli.provider, "Using inline API key");
        config = config.with_credential(cli.provider.into(), key.clone());
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model.clone());
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }
    Ok(config)
}

fn joined_question(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Prompt for a question and read one line.
fn read_question(input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
    write!(output, "Enter your question: ")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read question from stdin")?;
    Ok(line.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string())
}

fn render_text(record: &AnswerRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n--- LLM Q&A Result ---");
    let _ = writeln!(out, "Original Question: {}", record.question());
    let _ = writeln!(out, "Processed Question: {}", record.processed());
    let _ = writeln!(out, "Source: {}", record.source());
    let _ = writeln!(out, "\nAnswer:\n {}", record.answer());

    if !record.errors().is_empty() {
        let _ = writeln!(out, "\nProvider errors:");
        for error in record.errors() {
            let _ = writeln!(out, "  - {}", error);
        }
    }
    out
}
