//! Biathlon Race Log CLI
//!
//! Command-line front end for the biathlon-core library. It adds:
//! - Race configuration loading (JSON or TOML)
//! - The narrated race log (one sentence per event)
//! - The final results table (text or JSON)

use anyhow::{Context, Result};
use biathlon_core::{EventReader, RaceSession};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

mod config;
mod narration;
mod report;

use narration::TextLog;
use report::OutputFormat;

/// Biathlon race log processor - narrate a race and rank the competitors
#[derive(Parser, Debug)]
#[command(name = "biathlon")]
#[command(about = "Narrate a biathlon race log and build the results table", long_about = None)]
#[command(version)]
struct Args {
    /// Path to race configuration (JSON, or TOML by extension)
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Path to the race event log
    #[arg(short, long, value_name = "FILE")]
    events: PathBuf,

    /// Output file for the narrated log (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Separate file for the results table (default: after the narrated log)
    #[arg(short, long, value_name = "FILE")]
    results: Option<PathBuf>,

    /// Results table format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("Biathlon CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using biathlon-core v{}", biathlon_core::VERSION);

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create output file: {:?}", path))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    run(&args, BufWriter::new(output))
}

/// Process the whole race: narrate every event, then write the table
fn run<W: Write>(args: &Args, writer: W) -> Result<()> {
    log::info!("Loading race configuration from: {:?}", args.config);
    let race_config = config::load_race_config(&args.config)?;
    log::debug!("Configuration loaded successfully");

    let input = File::open(&args.events)
        .with_context(|| format!("Failed to open event log: {:?}", args.events))?;
    let events = EventReader::new(BufReader::new(input));

    let mut session = RaceSession::new(race_config);
    let mut narration = TextLog::new(writer);
    session
        .process(events, &mut narration)
        .with_context(|| format!("Failed to process event log: {:?}", args.events))?;
    log::info!("Narrated {} lines", narration.lines());

    let rows = session.results();
    let mut writer = narration.into_inner();
    match &args.results {
        Some(path) => {
            writer.flush().context("Failed to flush output")?;
            let file = File::create(path)
                .with_context(|| format!("Failed to create results file: {:?}", path))?;
            let mut table = BufWriter::new(file);
            report::write_results(&mut table, &rows, args.format)?;
            table.flush().context("Failed to flush results file")?;
            log::info!("Results table written to {:?}", path);
        }
        None => {
            if args.format == OutputFormat::Json {
                log::warn!("JSON results share the narration stream; use --results for a standalone file");
            }
            report::write_results(&mut writer, &rows, args.format)?;
            writer.flush().context("Failed to flush output")?;
        }
    }

    log::info!("Results table written for {} competitors", rows.len());
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
