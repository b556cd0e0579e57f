//! # stego
//!
//! Command-line front end for the LSB codec.
//!
//! ## Usage
//!
//! ```bash
//! stego encode --input cover.png --text "Secret message" --output carrier.png
//! stego decode --input carrier.png
//! stego capacity --input cover.png --json
//! ```
//!
//! An optional `--config` TOML file sets the default output path and log level.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{info, warn, LevelFilter};
use serde::Serialize;
use std::fs;
use std::io::Write;

use lsb_stego::config::StegoConfig;
use lsb_stego::{codec, io, planner, Payload};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide text inside an image
    Encode {
        /// Cover image
        #[arg(short, long)]
        input: String,

        /// Text to hide
        #[arg(short, long, conflicts_with = "text_file")]
        text: Option<String>,

        /// Read the text to hide from a file
        #[arg(long)]
        text_file: Option<String>,

        /// Carrier image to write (lossless format, e.g. .png)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Recover text hidden in an image
    Decode {
        #[arg(short, long)]
        input: String,
    },
    /// Report how much text an image can carry
    Capacity {
        #[arg(short, long)]
        input: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct CapacityReport {
    width: u32,
    height: u32,
    capacity_bits: usize,
    max_chars: usize,
}

/// Format: `[HH:MM:SS] [LEVEL] message`
fn init_logger(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => StegoConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => StegoConfig::default(),
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.logging.level_filter()
    };
    init_logger(level);

    match args.command {
        Command::Encode {
            input,
            text,
            text_file,
            output,
        } => {
            let text = match (text, text_file) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(&path)
                    .with_context(|| format!("failed to read text from {}", path))?,
                (None, None) => bail!("either --text or --text-file is required"),
            };
            let output = output.unwrap_or(config.output.default_path);
            run_encode(&input, &text, &output)
        }
        Command::Decode { input } => run_decode(&input),
        Command::Capacity { input, json } => run_capacity(&input, json),
    }
}

fn run_encode(input: &str, text: &str, output: &str) -> Result<()> {
    let payload = Payload::from_text(text).context("text cannot be embedded")?;
    let grid = io::load_grid(input).with_context(|| format!("failed to load {}", input))?;
    let carrier = codec::encode(grid, &payload)
        .with_context(|| format!("cannot embed text into {}", input))?;
    io::save_grid(&carrier, output).with_context(|| format!("failed to write {}", output))?;

    info!("Encryption successful: {} chars written to {}", payload.len(), output);
    Ok(())
}

fn run_decode(input: &str) -> Result<()> {
    let grid = io::load_grid(input).with_context(|| format!("failed to load {}", input))?;
    let decoded = codec::decode_report(&grid);
    if !decoded.terminated {
        warn!("No end marker found; {} may not carry a message", input);
    }
    println!("{}", decoded.payload);
    Ok(())
}

fn run_capacity(input: &str, json: bool) -> Result<()> {
    let grid = io::load_grid(input).with_context(|| format!("failed to load {}", input))?;
    let (width, height) = grid.dimensions();
    let report = CapacityReport {
        width,
        height,
        capacity_bits: planner::capacity_bits(width, height),
        max_chars: planner::max_chars(width, height),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{}x{}: {} bits, up to {} characters",
            report.width, report.height, report.capacity_bits, report.max_chars
        );
    }
    Ok(())
}
