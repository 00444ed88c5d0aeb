//! Command-line entry point: one listing + report cycle, then exit.

use clap::Parser;
use dupescan::cloud::S3Lister;
use dupescan::progress::{ConsoleProgress, NoProgress, ProgressObserver};
use dupescan::report::generate_duplicate_report;
use dupescan::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dupescan", version, about = "Report duplicate filenames in an S3 bucket as CSV")]
struct Cli {
    /// S3 bucket to scan
    #[arg(long, env = "DUPESCAN_BUCKET")]
    bucket: String,

    /// Key prefix to scan; empty scans the whole bucket
    #[arg(long, env = "DUPESCAN_PREFIX", default_value = "")]
    prefix: String,

    /// Output path for the CSV report
    #[arg(long, env = "DUPESCAN_OUTPUT", default_value = "data/duplicate_filenames.csv")]
    output: PathBuf,

    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// Custom endpoint URL for S3-compatible services (MinIO, R2, Spaces)
    #[arg(long, env = "DUPESCAN_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Use path-style addressing (required for MinIO)
    #[arg(long)]
    force_path_style: bool,

    /// Keys per listing page (1..=1000, service default when omitted)
    #[arg(long)]
    page_size: Option<i32>,

    /// Suppress progress output on stderr
    #[arg(long)]
    quiet: bool,
}

async fn run(cli: Cli) -> Result<()> {
    let mut builder = S3Lister::builder();

    if let Some(region) = &cli.region {
        builder = builder.region(region);
    }
    if let Some(endpoint_url) = &cli.endpoint_url {
        builder = builder.endpoint_url(endpoint_url);
    }
    if cli.force_path_style {
        builder = builder.force_path_style(true);
    }
    if let Some(page_size) = cli.page_size {
        builder = builder.page_size(page_size);
    }

    let lister = builder.build().await?;

    let progress: &dyn ProgressObserver = if cli.quiet { &NoProgress } else { &ConsoleProgress };

    let outcome =
        generate_duplicate_report(&lister, &cli.bucket, &cli.prefix, &cli.output, progress).await?;

    match outcome {
        Some(path) => println!("✅ CSV report saved: {}", path.display()),
        None => println!("No duplicate filenames found."),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}
