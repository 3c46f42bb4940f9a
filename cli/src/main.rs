//! paseto-keygen - generate a PASETO v2 `public` signing keypair
//!
//! Usage:
//!   paseto-keygen
//!   paseto-keygen -o paseto.key
//!   paseto-keygen --format json -o paseto.json
//!   paseto-keygen --check paseto.key

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use paseto_keygen_core::export::{OutputTarget, Report, ReportFormat};
use paseto_keygen_core::KeyPair;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};

mod ui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to export to. Prints to stdout otherwise
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Report encoding
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Validate an existing text report instead of generating a keypair
    #[arg(long, value_name = "PATH", conflicts_with_all = ["output", "format"])]
    check: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
        }
    }
}

fn main() {
    // Logs go to stderr so the report on stdout stays byte-exact
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();
    ui::init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::print_error(&format!("{:#}", e));
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    debug!("{}", paseto_keygen_core::version_string());

    if let Some(path) = args.check {
        return check(&path);
    }

    let keypair = KeyPair::generate().context("Failed to generate keypair")?;
    let report = Report::from_keypair(&keypair);
    let target = OutputTarget::from_flag(args.output.as_deref());

    info!("Exporting public key {} to {}", keypair.public(), target);
    report
        .write_to(&target, args.format.into())
        .with_context(|| format!("Failed to write keypair to {}", target))?;

    if let OutputTarget::File(path) = &target {
        ui::print_success(&format!("Wrote keypair to {}", path.display()));
    }

    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report: {}", path.display()))?;

    let keypair = Report::parse(&text)
        .and_then(|report| report.to_keypair())
        .with_context(|| format!("Invalid keypair report: {}", path.display()))?;

    ui::print_success(&format!("Valid keypair, public key {}", keypair.public()));
    Ok(())
}
