//! pdfoutline CLI - heading outline extraction tool

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use pdfoutline::{BatchDriver, BatchOptions, DocumentStatus, JsonFormat, OutlineOptions, Outliner};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer title and heading outlines from PDF typography", long_about = None)]
struct Cli {
    /// Directory containing PDF files
    #[arg(value_name = "INPUT", env = "PDFOUTLINE_INPUT")]
    input: Option<PathBuf>,

    /// Directory receiving one JSON file per PDF
    #[arg(value_name = "OUTPUT", env = "PDFOUTLINE_OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT", env = "PDFOUTLINE_INPUT")]
        input: Option<PathBuf>,

        /// Directory receiving one JSON file per PDF
        #[arg(value_name = "OUTPUT", env = "PDFOUTLINE_OUTPUT")]
        output: Option<PathBuf>,

        /// Process one document at a time
        #[arg(long)]
        sequential: bool,

        /// Skip language tagging
        #[arg(long)]
        no_lang: bool,
    },

    /// Extract the outline of a single PDF
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Skip language tagging
        #[arg(long)]
        no_lang: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            sequential,
            no_lang,
        }) => cmd_batch(input, output, sequential, no_lang),
        Some(Commands::Outline {
            input,
            output,
            compact,
            no_lang,
        }) => cmd_outline(&input, output.as_deref(), compact, no_lang),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(cli.input, cli.output, false, false),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn cmd_batch(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    sequential: bool,
    no_lang: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Process started at {}", chrono::Local::now().to_rfc3339());

    let input = input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
    let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let mut options = BatchOptions::new(&input, &output)
        .with_outline_options(OutlineOptions::new().with_language_detection(!no_lang));
    if sequential {
        options = options.sequential();
    }

    let driver = BatchDriver::new(options);
    let total = driver.discover()?.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = driver.run_with(|doc| {
        if let Some(name) = doc.input.file_name() {
            pb.set_message(name.to_string_lossy().to_string());
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    println!(
        "{} {} of {} documents in {:.2?}",
        "Done!".green().bold(),
        report.succeeded(),
        report.total(),
        report.elapsed()
    );

    for doc in report.documents.iter().filter(|d| !d.is_success()) {
        let reason = match &doc.status {
            DocumentStatus::Failed { reason } | DocumentStatus::WriteFailed { reason } => reason,
            DocumentStatus::Extracted { .. } => continue,
        };
        println!(
            "  {} {}: {}",
            "✗".red(),
            doc.input.display(),
            reason.dimmed()
        );
    }

    println!("{}: {}", "Output".bold(), output.display());

    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    no_lang: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outliner = if no_lang {
        Outliner::new().without_language_detection()
    } else {
        Outliner::new()
    };
    let result = outliner.extract(input);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = pdfoutline::render::to_json(&result, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline extraction tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/pdfoutline".dimmed()
    );
    println!("License: MIT");
}
