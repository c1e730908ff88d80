use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use pdftables::export::Format;
use pdftables::layout::{LayoutConfig, DEFAULT_COLUMN_SPACING, DEFAULT_LINE_THRESHOLD};
use pdftables::parser::{PdfReader, PopplerWordExtractor, WordExtractor};
use pdftables::pipeline::{convert_document, destination_for, run_batch, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "pdftables")]
#[command(version, about = "Rebuild table rows and columns from PDF word positions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a single PDF file
    Convert {
        /// Input PDF file path
        input: PathBuf,

        /// Output file (default: <input_stem>.<format> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: ConvertOptions,
    },

    /// Convert every PDF in a directory
    Batch {
        /// Directory holding PDF files
        #[arg(default_value = "Input_pdfs")]
        source: PathBuf,

        /// Directory for the converted tables
        #[arg(default_value = "extracted_tables")]
        destination: PathBuf,

        #[command(flatten)]
        options: ConvertOptions,
    },

    /// Show information about a PDF file
    Info {
        /// Input PDF file path
        input: PathBuf,
    },

    /// Print the extracted words as JSON
    Words {
        /// Input PDF file path
        input: PathBuf,

        /// Only this 1-based page
        #[arg(short, long)]
        page: Option<usize>,
    },
}

#[derive(Args, Debug, Clone)]
struct ConvertOptions {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Xlsx)]
    format: Format,

    /// Max vertical distance between consecutive words on one line
    #[arg(long, default_value_t = DEFAULT_LINE_THRESHOLD, value_parser = parse_threshold)]
    line_threshold: f64,

    /// Field delimiter for csv output (a single ASCII character, or `\t`)
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Max horizontal gap between words in one cell
    #[arg(long, default_value_t = DEFAULT_COLUMN_SPACING, value_parser = parse_threshold)]
    column_spacing: f64,
}

impl ConvertOptions {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(
            LayoutConfig::new(self.line_threshold, self.column_spacing),
            self.format,
        )
        .with_csv_delimiter(self.delimiter)
    }
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match raw.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(format!("`{raw}` must be a single ASCII character")),
        },
    }
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("`{raw}` must be a finite, non-negative number"));
    }
    Ok(value)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            options,
        } => convert_single(input, output, options),
        Commands::Batch {
            source,
            destination,
            options,
        } => convert_batch(source, destination, options),
        Commands::Info { input } => show_info(input),
        Commands::Words { input, page } => dump_words(input, page),
    }
}

fn convert_single(input: PathBuf, output: Option<PathBuf>, options: ConvertOptions) -> Result<()> {
    if !input.is_file() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let config = options.pipeline_config();
    let output = match output {
        Some(output) => output,
        None => {
            let dir = input.parent().map(PathBuf::from).unwrap_or_default();
            destination_for(&input, &dir, config.format)?
        }
    };

    log::info!("Currently processing: {}", input.display());
    let matrix = convert_document(&input, &output, &PopplerWordExtractor::new(), &config)?;
    log::info!("{} row(s), {} column(s)", matrix.len(), matrix.width());
    Ok(())
}

fn convert_batch(source: PathBuf, destination: PathBuf, options: ConvertOptions) -> Result<()> {
    let config = options.pipeline_config();
    let report = run_batch(&source, &destination, &PopplerWordExtractor::new(), &config)?;

    for failure in report.failures() {
        if let Err(err) = &failure.result {
            log::error!("{}: {err:#}", failure.source.display());
        }
    }
    log::info!(
        "Summary: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );

    if report.failed() > 0 {
        anyhow::bail!("{} file(s) failed to process", report.failed());
    }
    Ok(())
}

fn show_info(input: PathBuf) -> Result<()> {
    let reader = PdfReader::new(input.clone())
        .with_context(|| format!("Failed to open PDF: {}", input.display()))?;
    let page_count = reader.page_count()?;

    println!("PDF Information");
    println!("===============");
    println!("File: {}", input.display());
    println!("Pages: {}", page_count);

    Ok(())
}

fn dump_words(input: PathBuf, page: Option<usize>) -> Result<()> {
    let extractor = match page {
        Some(0) => anyhow::bail!("pages are numbered from 1"),
        Some(page) => PopplerWordExtractor::new().with_pages(page, page),
        None => PopplerWordExtractor::new(),
    };
    let document = extractor.extract_words(&input)?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
