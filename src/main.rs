use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;
mod convert;
mod error;
mod ffmpeg;
mod runner;

use config::Config;
use runner::SystemRunner;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert HEIC/HEIF images to PNG or JPEG using ffmpeg")]
struct Args {
    /// Output format: png, jpg or jpeg
    #[arg(long)]
    output: String,

    /// File or directory path to convert
    #[arg(long)]
    input: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let runner = SystemRunner;

    // Validate flags first: a bad format or path must fail before we so
    // much as look for ffmpeg.
    let config = Config::resolve(&args.output, &args.input)?;
    ffmpeg::verify_requirements(&runner)?;

    let jobs = convert::plan_jobs(&config)?;
    if jobs.is_empty() {
        println!(
            "No .{} files found in {}.",
            convert::INPUT_EXTENSION,
            config.input.display()
        );
    }
    convert::run_jobs(&runner, &jobs)?;

    println!("Processing completed successfully.");
    Ok(())
}
