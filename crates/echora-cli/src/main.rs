//! echora CLI - echo and impulse-response convolution for audio files.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "echora")]
#[command(author, version, about = "Echo and convolution for WAV files", long_about = None)]
struct Cli {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a decaying echo to one file
    Echo(commands::echo::EchoArgs),

    /// Convolve one file with an impulse response
    Convolve(commands::convolve::ConvolveArgs),

    /// Process many files concurrently
    Batch(commands::batch::BatchArgs),

    /// List impulse responses in a folder
    Impulses(commands::impulses::ImpulsesArgs),

    /// Show WAV file metadata
    Info(commands::info::InfoArgs),

    /// Render to a temporary file and play it
    Preview(commands::preview::PreviewArgs),

    /// Write a starter configuration file
    InitConfig(commands::init_config::InitConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Echo(args) => commands::echo::run(args),
        Commands::Convolve(args) => commands::convolve::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Impulses(args) => commands::impulses::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::InitConfig(args) => commands::init_config::run(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
