use std::fs::File;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kinesis_core::{MotionConfig, Viewport};

mod commands;

#[derive(Parser)]
#[command(name = "kinesis")]
#[command(author, version, about = "A motion-driven single page in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the page in the terminal
    Run,
    /// Drive the page headlessly and print JSON snapshots
    Simulate {
        /// Number of frames to run
        #[arg(long, default_value_t = 600)]
        frames: u64,
        /// Simulated display refresh rate
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Print a snapshot every N frames
        #[arg(long, default_value_t = 30)]
        every: u64,
        /// Pace frames in wall-clock time
        #[arg(long)]
        realtime: bool,
        /// Viewport width in pixels
        #[arg(long, default_value_t = 160)]
        width: u16,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 96)]
        height: u16,
        /// Seed for the scramble effect
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the effective configuration
    Config {
        /// Write the defaults to the config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn env_filter(config: &MotionConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.general.log_level.as_str()))
}

/// Interactive runs log to a file so the alternate screen stays clean
fn init_file_logging(config: &MotionConfig) -> Result<()> {
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(&log_path)?;

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Headless commands log to stderr, leaving stdout to their output
fn init_stderr_logging(config: &MotionConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(MotionConfig::load()?);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            init_file_logging(&config)?;
            commands::run::run(config)
        }
        Commands::Simulate {
            frames,
            fps,
            every,
            realtime,
            width,
            height,
            seed,
        } => {
            init_stderr_logging(&config);
            let options = commands::simulate::SimulateOptions {
                frames,
                fps,
                every,
                realtime,
                viewport: Viewport::new(width as f64, height as f64),
                seed,
            };
            commands::simulate::run(&config, &options).await
        }
        Commands::Config { init } => {
            init_stderr_logging(&config);
            commands::config::run(&config, init)
        }
    }
}
