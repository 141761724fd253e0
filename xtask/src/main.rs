use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pixplot::{dump_histogram, histogram::HISTOGRAM_FILE_NAME, records::Endian};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for pixplot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample image and its histogram records for manual runs
    Fixtures {
        #[arg(long, default_value = "target/fixtures")]
        dir: PathBuf,
    },
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fixtures { dir } => fixtures(&dir),
        Commands::Ci => ci(),
    }
}

/// Diagonal color ramp plus the `hist.txt` the plotter reads by default.
fn fixtures(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let image_path = dir.join("ramp.png");
    image::RgbImage::from_fn(320, 240, |x, y| {
        image::Rgb([(x * 255 / 319) as u8, (y * 255 / 239) as u8, ((x + y) % 256) as u8])
    })
    .save(&image_path)
    .with_context(|| format!("writing {}", image_path.display()))?;

    let hist_path = dir.join(HISTOGRAM_FILE_NAME);
    dump_histogram(&image_path, &hist_path, Endian::Little)
        .with_context(|| format!("writing {}", hist_path.display()))?;

    println!("{}", image_path.display());
    println!("{}", hist_path.display());
    Ok(())
}

/// can run benches, tests, bundle reports and so on...
fn ci() -> Result<()> {
    run_command("cargo", &["fmt", "--all", "--check"])?;
    run_command(
        "cargo",
        &[
            "clippy",
            "--all-targets",
            "--all-features",
            "--",
            "-D",
            "warnings",
        ],
    )?;
    run_command("cargo", &["build", "--all-features"])?;
    run_command("cargo", &["test", "--all-features"])?;
    Ok(())
}

fn run_command(cmd: &str, args: &[&str]) -> Result<()> {
    use std::process::Command;
    let status = Command::new(cmd).args(args).status()?;
    if !status.success() {
        anyhow::bail!("Command failed: {} {}", cmd, args.join(" "));
    }
    Ok(())
}
