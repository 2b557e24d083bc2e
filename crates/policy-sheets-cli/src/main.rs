//! policy-sheets CLI - policy definition exports to XLSX reports

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use policy_sheets::{convert, RecordErrorPolicy, ReportConfig, SchemaPreset};
use policy_sheets_cli::ServeOptions;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "policy-sheets")]
#[command(
    author,
    version,
    about = "Convert policy definition exports into spreadsheet reports"
)]
struct Cli {
    /// Report configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Column preset, overriding the config file
    #[arg(long, global = true)]
    schema: Option<SchemaArg>,

    /// Skip elements that are not objects instead of failing
    #[arg(long, global = true)]
    skip_invalid: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaArg {
    Definitions,
    Detailed,
}

impl From<SchemaArg> for SchemaPreset {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Definitions => SchemaPreset::Definitions,
            SchemaArg::Detailed => SchemaPreset::Detailed,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the upload / preview / download page
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8501")]
        bind: SocketAddr,

        /// Largest accepted upload, in megabytes
        #[arg(long, default_value = "64")]
        max_upload_mb: usize,
    },

    /// Convert a JSON export to an XLSX file
    Convert {
        /// Input JSON file
        input: PathBuf,

        /// Output XLSX file (default: the report file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the report table as tab-separated text
    Preview {
        /// Input JSON file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Serve {
            bind,
            max_upload_mb,
        } => {
            let options = ServeOptions {
                bind,
                max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
            };
            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            runtime.block_on(policy_sheets_cli::serve(config, options))
        }
        Commands::Convert { input, output } => convert_file(&input, output.as_deref(), &config),
        Commands::Preview { input } => preview_file(&input, &config),
    }
}

fn load_config(cli: &Cli) -> Result<ReportConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            ReportConfig::from_json_str(&text)
                .with_context(|| format!("Invalid config '{}'", path.display()))?
        }
        None => ReportConfig::default(),
    };

    if let Some(schema) = cli.schema {
        config.schema = schema.into();
        config.columns = None;
    }
    if cli.skip_invalid {
        config.on_invalid_record = RecordErrorPolicy::Skip;
    }
    Ok(config)
}

fn read_input(input: &Path) -> Result<Vec<u8>> {
    std::fs::read(input).with_context(|| format!("Failed to read '{}'", input.display()))
}

fn convert_file(input: &Path, output: Option<&Path>, config: &ReportConfig) -> Result<()> {
    let payload = read_input(input)?;
    let report = convert(&payload, config)
        .with_context(|| format!("Failed to convert '{}'", input.display()))?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(report.artifact.file_name()));
    std::fs::write(&output, report.artifact.bytes())
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    if !report.table.skipped().is_empty() {
        eprintln!(
            "Warning: skipped {} records that are not objects",
            report.table.skipped().len()
        );
    }
    eprintln!(
        "Wrote {} rows to '{}'",
        report.table.len(),
        output.display()
    );
    Ok(())
}

fn preview_file(input: &Path, config: &ReportConfig) -> Result<()> {
    let payload = read_input(input)?;
    let report = convert(&payload, config)
        .with_context(|| format!("Failed to convert '{}'", input.display()))?;

    let mut out = String::new();
    out.push_str(&report.table.headers().collect::<Vec<_>>().join("\t"));
    out.push('\n');
    for row in report.table.rows() {
        let cells: Vec<String> = row.values().map(tsv_field).collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }

    io::stdout()
        .write_all(out.as_bytes())
        .context("Failed to write to stdout")?;
    Ok(())
}

/// Fold multi-line values onto one line
fn tsv_field(value: &str) -> String {
    value
        .split(['\t', '\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
