use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use streamblocks::io::LineSource;
use streamblocks::resilience::ErrorPolicy;
use streamblocks::engine::drain;
use streamblocks::{Pipeline, PipelineConfig};
use tokio::io::BufReader;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Propagate,
    SkipBlock,
    Swallow,
}

impl From<PolicyArg> for ErrorPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Propagate => ErrorPolicy::Propagate,
            PolicyArg::SkipBlock => ErrorPolicy::SkipBlock,
            PolicyArg::Swallow => ErrorPolicy::Swallow,
        }
    }
}

#[derive(Parser)]
#[command(name = "streamblocks", about = "Feed numbers from stdin through a block pipeline")]
struct Cli {
    /// Pipeline file (.json or .toml); the standard pipeline is used when omitted
    #[arg(long, env = "STREAMBLOCKS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the pipeline's error policy
    #[arg(long, value_enum)]
    error_policy: Option<PolicyArg>,

    /// Print a per-block metrics report to stderr at end of input
    #[arg(long)]
    report: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::standard(),
    };
    if let Some(policy) = cli.error_policy {
        config.error_policy = policy.into();
    }

    let mut pipeline = Pipeline::from_config(&config).await?;
    let mut source = LineSource::new(BufReader::new(tokio::io::stdin()));

    let summary = drain(&mut pipeline, &mut source).await?;
    info!(
        lines = source.lines_read(),
        events = summary.events,
        emitted = summary.emitted,
        aborted = summary.aborted,
        rejected = summary.rejected,
        "input exhausted"
    );

    if cli.report {
        eprintln!("{}", pipeline.get_monitor().generate_report());
    }

    Ok(())
}
