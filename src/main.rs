use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use pitch_stability::config::{Config, DEFAULT_CONFIG_PATH};
use pitch_stability::{Reduction, pipeline};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Reduce pitch-scan spectra into TSI and SP stability indices",
    long_about = None,
    after_help = "Examples:\n  pitch-stability\n  pitch-stability --config site/config.json --output site/result.json --csv site/records.csv\n"
)]
struct Args {
    /// JSON config with spectrum_path, cali_path and angle_num
    #[arg(long, short, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Result document path (overrides output_path from the config)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Also write one CSV row per record (overrides csv_path from the config)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Wait for Enter before exiting, for runs started by double-click
    #[arg(long)]
    pause: bool,
}

fn run(args: &Args) -> Result<Reduction> {
    let mut config = Config::load(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    if let Some(csv) = &args.csv {
        config.csv_path = Some(csv.clone());
    }

    pipeline::run_and_write(&config).context("reduction failed")
}

fn wait_for_enter() {
    println!("Press Enter to exit...");
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let status = match run(&args) {
        Ok(reduction) => {
            println!(
                "Done: {} pitch scans, {} loops, {} fields defaulted to 0",
                reduction.len(),
                reduction.loops.len(),
                reduction.substitutions.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    };

    if args.pause {
        wait_for_enter();
    }
    status
}
