use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use pixplot::convert::{ConvertOptions, convert};

/// Convert an image to the format named by the output file's extension
#[derive(Parser)]
#[command(name = "convert", version)]
struct Cli {
    /// Image to read, its format is detected from the file contents
    input: PathBuf,
    /// Image to write
    output: PathBuf,
    /// Store gray levels, (R + G + B) / 3, instead of colors
    #[arg(long)]
    grayscale: bool,
    /// Store black and white only, split at the k-means threshold of the gray levels
    #[arg(long, conflicts_with = "grayscale")]
    binary: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let options = ConvertOptions {
        grayscale: cli.grayscale,
        binary: cli.binary,
    };
    match convert(&cli.input, &cli.output, &options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
