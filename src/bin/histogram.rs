use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use pixplot::{dump_histogram, histogram::HISTOGRAM_FILE_NAME, records::Endian};

/// Write the gray-level histogram of an image as 256 little-endian i32 records
#[derive(Parser)]
#[command(name = "histogram", version)]
struct Cli {
    /// Image to count
    input: PathBuf,
    /// Record file to write
    #[arg(short, long, default_value = HISTOGRAM_FILE_NAME)]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match dump_histogram(&cli.input, &cli.output, Endian::Little) {
        Ok(histogram) => {
            if let Some((level, count)) = histogram.max_bin() {
                log::debug!("most frequent level {} ({} pixels)", level, count);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
