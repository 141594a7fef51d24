use clap::Parser;
use std::path::PathBuf;

use fastq_detangler::detangle;

#[derive(Parser)]
#[command(name = "fastq-detangler")]
#[command(about = "Detangle interweaved FASTQ files into separate R1/R2 files", long_about = None)]
#[command(version)]
#[command(after_help = "Examples:\n  fastq-detangler input.fastq output_prefix\n  fastq-detangler /path/to/input.fastq /path/to/output")]
struct Cli {
    /// Input interweaved FASTQ file
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Output file prefix (will create 4 files with this prefix)
    #[arg(value_name = "OUTPUT_PREFIX")]
    output_prefix: PathBuf,

    /// Verbosity level: 1=error, 2=warning, 3=info, 4=debug, 5+=trace
    #[arg(short = 'v', long, value_name = "INT", default_value = "2")]
    verbosity: u8,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbosity {
        v if v <= 1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    match detangle(&cli.input_file, &cli.output_prefix) {
        Ok(summary) => {
            println!("Successfully detangled {}", cli.input_file.display());
            println!("Output files created with prefix: {}", cli.output_prefix.display());
            println!("Files created:");
            for path in summary.outputs.in_write_order() {
                println!("  {}", path.display());
            }
            println!(
                "R1 reads: {}, R2 reads: {}, pairs: {}",
                summary.first_reads, summary.second_reads, summary.pairs
            );
            if !summary.report.is_clean() {
                println!(
                    "Skipped: {} invalid headers, {} incomplete records, {} malformed records, {} duplicates",
                    summary.report.invalid_headers(),
                    summary.report.incomplete_records(),
                    summary.report.malformed_records(),
                    summary.report.duplicates()
                );
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
