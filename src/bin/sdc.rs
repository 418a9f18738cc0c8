//! CLI binary for sdc-client.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `ConversionRequest`, renders the progress transitions, and saves the
//! returned artifact.

use anyhow::{Context, Result};
use clap::Parser;
use sdc_client::{
    save, ClientConfig, ConversionClient, ConversionKind, ConversionObserver, ConversionRequest,
    Observer, Outcome, SourceFile,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI observer using indicatif ─────────────────────────────────────────────

/// Terminal observer: renders the 0–100 progress bar the service
/// transitions drive, and clears it once the attempt settles.
struct CliObserver {
    bar: indicatif::ProgressBar,
}

impl CliObserver {
    fn new() -> Arc<Self> {
        let bar = indicatif::ProgressBar::new(100);
        bar.set_style(
            indicatif::ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}%",
            )
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionObserver for CliObserver {
    fn on_progress(&self, percent: u8) {
        self.bar.set_position(percent as u64);
    }

    fn on_settled(&self, _outcome: Outcome) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Word document to PDF, saved next to the input
  sdc docx-to-pdf report.docx

  # PDF to Word, into a specific directory
  sdc pdf-to-docx contract.pdf -o converted/

  # Spreadsheet to PDF against a non-default service
  sdc xlsx-to-pdf q3.xlsx --base-url https://converter.internal:8443

  # Machine-readable summary
  sdc docx-to-pdf report.docx --json

ENVIRONMENT VARIABLES:
  SDC_API_KEY    API key sent as X-API-Key (alternative to --api-key)
  SDC_BASE_URL   Service base URL (default http://localhost:8000)
"#;

/// Convert documents through the Secure Document Converter service.
#[derive(Parser, Debug)]
#[command(
    name = "sdc",
    version,
    about = "Convert documents through the Secure Document Converter service",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Conversion direction: pdf-to-docx, docx-to-pdf, xlsx-to-pdf.
    kind: ConversionKind,

    /// Source document to upload.
    input: PathBuf,

    /// API key sent as the X-API-Key header.
    #[arg(long, env = "SDC_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Service base URL.
    #[arg(long, env = "SDC_BASE_URL", default_value = "http://localhost:8000")]
    base_url: String,

    /// Directory the converted artifact is saved into.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Print a JSON summary instead of the human-readable lines.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Library INFO logs would fight the progress bar for the terminal, so
    // they are off unless asked for.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = ClientConfig::builder()
        .base_url(&cli.base_url)
        .build()
        .context("Invalid service configuration")?;

    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let client = if show_progress {
        let observer = CliObserver::new();
        ConversionClient::with_observer(config, observer as Observer)
    } else {
        ConversionClient::new(config)
    };

    // ── Run one conversion ───────────────────────────────────────────────
    let source = SourceFile::from_path(&cli.input)
        .await
        .context("Failed to read source file")?;
    let input_name = source.name.clone();

    let request = ConversionRequest::new(cli.kind, source, &cli.api_key);
    let result = client.convert(request).await.context("Conversion failed")?;

    let saved = save::save_to_dir(&result, &cli.output).context("Failed to save output")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "kind": cli.kind,
                "input": input_name,
                "output": saved,
                "bytes": result.payload.len(),
            }))
            .context("Failed to serialize summary")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{} {} {} {}",
            green("✔"),
            input_name,
            dim("→"),
            bold(&saved.display().to_string()),
        );
    }

    Ok(())
}
