//! PubMed papers fetcher - Entry Point
//!
//! Searches PubMed, keeps papers with company-affiliated authors, and writes
//! them to a CSV file or prints them to stdout. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use papers_fetcher::config::{Config, defaults};
use papers_fetcher::error::AppError;
use papers_fetcher::formatters::{format_papers_json, format_papers_markdown, save_csv};
use papers_fetcher::models::{FilteredPaper, ResponseFormat};
use papers_fetcher::pipeline::{PipelineOutcome, fetch_company_papers};
use papers_fetcher::PubMedClient;

#[derive(Parser, Debug)]
#[command(name = "papers-fetcher")]
#[command(about = "Fetch PubMed papers with authors affiliated with pharma/biotech companies")]
#[command(version)]
struct Cli {
    /// PubMed search query (e.g. "cancer therapy")
    query: String,

    /// Save the results to this CSV file instead of printing them
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print debug information during execution
    #[arg(short, long)]
    debug: bool,

    /// Maximum number of PubMed IDs to fetch
    #[arg(
        short = 'n',
        long,
        default_value_t = defaults::MAX_RESULTS,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(defaults::MAX_RESULTS_LIMIT))
    )]
    max_results: u32,

    /// Console output format (ignored with --file)
    #[arg(long, value_enum, default_value_t = ResponseFormat::Markdown)]
    format: ResponseFormat,

    /// NCBI API key (optional, enables higher rate limits)
    #[arg(long, env = "NCBI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Contact email sent to NCBI with each request
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(if cli.debug { "debug" } else { "info" }, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        max_results = cli.max_results,
        "Starting papers-fetcher"
    );

    let config = Config::new(cli.api_key.clone(), cli.email.clone());
    let client = PubMedClient::new(config)?;

    match run(&cli, &client).await {
        Ok(code) => Ok(code),
        Err(err) => {
            tracing::error!(error = %err, "Run failed");
            eprintln!("{}", err.to_user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(cli: &Cli, client: &PubMedClient) -> Result<ExitCode, AppError> {
    let papers = match fetch_company_papers(client, &cli.query, cli.max_results).await? {
        PipelineOutcome::NoResults => {
            eprintln!("No papers found for query '{}'.", cli.query);
            return Ok(ExitCode::FAILURE);
        }
        PipelineOutcome::Papers { filtered, .. } => filtered,
    };

    if papers.is_empty() {
        eprintln!("No papers with authors from pharma/biotech companies were found.");
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!("Successfully found {} matching papers!", papers.len());
    emit(cli, &papers)?;

    Ok(ExitCode::SUCCESS)
}

fn emit(cli: &Cli, papers: &[FilteredPaper]) -> Result<(), AppError> {
    if let Some(path) = &cli.file {
        save_csv(path, papers)?;
        eprintln!("Results saved to {}", path.display());
        return Ok(());
    }

    let rendered = match cli.format {
        ResponseFormat::Markdown => format_papers_markdown(papers),
        ResponseFormat::Json => format_papers_json(papers)?,
    };
    println!("{rendered}");

    Ok(())
}
