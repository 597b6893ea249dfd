/// Zhouyi converter: parses a transcription and writes the figure table.
///
/// Usage: yijing_convert [--input <file.txt>] [--output <table.json|.js|.ron>]
///                       [--format json|js|ron] [--config <convert.ron>]
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;
use std::process;

use yijing_table::Converter;

#[derive(Parser)]
#[command(name = "yijing_convert")]
#[command(version)]
#[command(about = "Convert a plain-text Zhouyi transcription into a keyed data table")]
struct Args {
    /// Source transcription (default: 周易卦爻辞.txt)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file; its extension picks the format unless --format is given
    /// (default: yijing_data.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: json, js or ron
    #[arg(short, long)]
    format: Option<String>,

    /// RON file with base settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Variable name for the JavaScript module format
    #[arg(long)]
    js_binding: Option<String>,

    /// Don't print the first figure after converting
    #[arg(long)]
    no_sample: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut builder = Converter::builder();
    if let Some(path) = args.config {
        builder = builder.config_file(path);
    }
    if let Some(input) = args.input {
        builder = builder.input(input);
    }
    if let Some(output) = args.output {
        builder = builder.output(output);
    }
    if let Some(format) = args.format {
        builder = builder.format(format);
    }
    if let Some(binding) = args.js_binding {
        builder = builder.js_binding(binding);
    }
    if args.no_sample {
        builder = builder.sample(false);
    }

    let converter = builder.build().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let summary = converter.run().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    println!(
        "Parsed {} figures ({} lines)",
        summary.figure_count(),
        summary.line_count()
    );
    let stats = summary.stats();
    let ignored = stats.rejected_headers
        + stats.duplicate_headers
        + stats.dropped_commentary
        + stats.orphan_line_records;
    if ignored > 0 {
        println!(
            "Ignored: {} out-of-range headers, {} repeated headers, {} commentaries without a target, {} line records without a figure",
            stats.rejected_headers,
            stats.duplicate_headers,
            stats.dropped_commentary,
            stats.orphan_line_records
        );
    }
    println!(
        "Wrote {} table to '{}'",
        summary.format,
        summary.output.display()
    );

    if converter.config().sample {
        if let Some(first) = summary.parsed.figures.first() {
            match serde_json::to_string_pretty(first) {
                Ok(json) => println!("\nFirst figure:\n{}", json),
                Err(e) => eprintln!("Error rendering sample: {}", e),
            }
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.format_timestamp(None).init();
}
