use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod format;

/// Stash - Local Container Image Lister
///
/// A CLI tool for listing the images held in a local container storage.
#[derive(Parser, Debug)]
#[command(name = "stash")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control colored output: auto, always, never
    #[arg(long, global = true)]
    color: Option<String>,

    /// Storage configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Storage root directory
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Storage driver, selecting the <driver>-images directory
    #[arg(long, global = true, value_name = "NAME")]
    storage_driver: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List images in local storage
    Images(commands::images::ImagesArgs),
    /// Display version information
    Version,
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `-v`
fn init_tracing(verbosity: context::VerbosityLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let verbosity = context::VerbosityLevel::from_count(cli.verbose);
    init_tracing(verbosity);

    // Build context with precedence: defaults > env vars > CLI flags
    let ctx = context::AppContext::build(
        cli.color.as_deref().map(format::ColorChoice::from),
        verbosity,
        context::StorageOverrides {
            config: cli.config,
            root: cli.root,
            driver: cli.storage_driver,
        },
    );

    match cli.command {
        Commands::Images(args) => {
            commands::images::handlers::handle_images(&ctx, &args);
        }
        Commands::Version => {
            commands::version::print_version();
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
