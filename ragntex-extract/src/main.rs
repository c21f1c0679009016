use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use ragntex_extract::ingestion::error_chain;
use ragntex_extract::{ExtractConfig, create_pdfium, extract_document, load_config, run_batch};

/// Log line layout
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum LogFormat {
    /// Compact human-readable lines (default)
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Extract figures, embedded images and text from scientific PDFs.
#[derive(Parser, Debug)]
#[command(name = "ragntex-extract")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./ragntex.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, global = true, action = ArgAction::SetTrue)]
    debug: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process every article directory under the papers directory
    Batch {
        /// Override storage.papers_dir
        #[arg(long)]
        papers: Option<PathBuf>,

        /// Override storage.dataset_dir
        #[arg(long)]
        dataset: Option<PathBuf>,
    },

    /// Extract a single PDF into an output directory
    Document {
        /// Path to the PDF file
        pdf: PathBuf,

        /// Directory receiving the text file and raster artifacts
        out_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug, args.log_format);

    info!("Starting ragntex-extract v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %error_chain(&e), "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(args.command, &mut config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %error_chain(e.as_ref()), "Extraction failed");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every requested document was extracted.
fn run(command: Command, config: &mut ExtractConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let pdfium = create_pdfium(&config.pdfium)?;

    match command {
        Command::Batch { papers, dataset } => {
            if let Some(papers) = papers {
                config.storage.papers_dir = papers;
            }
            if let Some(dataset) = dataset {
                config.storage.dataset_dir = dataset;
            }

            let summary = run_batch(&pdfium, config)?;
            for failure in &summary.failed {
                error!(article = %failure.article, error = %failure.error, "Article failed");
            }
            Ok(summary.is_success())
        }
        Command::Document { pdf, out_dir } => {
            let summary = extract_document(&pdfium, &pdf, &out_dir, config)?;
            info!(
                text = %summary.text_path.display(),
                images = summary.images.len(),
                figures = summary.figures.len(),
                "Document written"
            );
            Ok(true)
        }
    }
}

fn init_logging(debug: bool, log_format: LogFormat) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = if debug {
        "ragntex_extract=debug"
    } else {
        "ragntex_extract=info"
    };

    // --debug wins over RUST_LOG
    let filter = if debug {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    match log_format {
        LogFormat::Compact => {
            let format = fmt::format()
                .with_target(true)
                .with_thread_ids(true)
                .compact();

            tracing_subscriber::registry()
                .with(fmt::layer().event_format(format))
                .with(filter)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_target(true).with_thread_ids(true))
                .with(filter)
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_defaults_to_compact() {
        let args = Args::try_parse_from(["ragntex-extract", "batch"]).unwrap();
        assert_eq!(args.log_format, LogFormat::Compact);
        assert!(!args.debug);
    }

    #[test]
    fn test_log_format_json_after_subcommand() {
        let args = Args::try_parse_from([
            "ragntex-extract",
            "document",
            "paper.pdf",
            "out",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.log_format, LogFormat::Json);
        assert!(matches!(args.command, Command::Document { .. }));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let result = Args::try_parse_from(["ragntex-extract", "--log-format", "xml", "batch"]);
        assert!(result.is_err());
    }
}
