use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use pixplot::{
    chart,
    config::{ChartStyle, PlotConfig},
    error::Result,
    plot_records,
    records::Endian,
};

/// Chart a file of fixed-width integer records
#[derive(Parser)]
#[command(name = "plot", version)]
struct Cli {
    /// Record file: headerless signed integers
    input: PathBuf,
    /// Chart to write, .svg (or .png with the `ttf` feature) [default: INPUT with an .svg extension]
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// JSON chart options
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Record width in bytes
    #[arg(long, value_enum, default_value = "4")]
    width: RecordWidth,
    /// Records are big-endian instead of little-endian
    #[arg(long)]
    big_endian: bool,
    /// Draw bars instead of a line
    #[arg(long)]
    bars: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum RecordWidth {
    #[value(name = "1")]
    I8,
    #[value(name = "2")]
    I16,
    #[value(name = "4")]
    I32,
    #[value(name = "8")]
    I64,
}

fn run(cli: Cli) -> Result<usize> {
    let mut config = match &cli.config {
        Some(path) => PlotConfig::read_config(path)?,
        None => PlotConfig::default(),
    };
    if cli.bars {
        config.style = ChartStyle::Bars;
    }
    let endian = if cli.big_endian {
        Endian::Big
    } else {
        Endian::Little
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| chart::default_output(&cli.input));

    match cli.width {
        RecordWidth::I8 => plot_records::<i8, _, _>(&cli.input, &output, endian, &config),
        RecordWidth::I16 => plot_records::<i16, _, _>(&cli.input, &output, endian, &config),
        RecordWidth::I32 => plot_records::<i32, _, _>(&cli.input, &output, endian, &config),
        RecordWidth::I64 => plot_records::<i64, _, _>(&cli.input, &output, endian, &config),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
