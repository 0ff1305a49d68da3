use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "launchclock", version, about = "Themed countdown timer for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the countdown live until the target is reached
    Watch(commands::watch::WatchArgs),
    /// Print the current countdown once
    Status(commands::status::StatusArgs),
    /// Theme listing and previews
    Themes {
        #[command(subcommand)]
        action: commands::themes::ThemesAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Logs go to stderr so they never interleave with the rendered frame.
/// Filter with LAUNCHCLOCK_LOG (e.g. `LAUNCHCLOCK_LOG=debug`).
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("LAUNCHCLOCK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Status(args) => commands::status::run(args),
        Commands::Themes { action } => commands::themes::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
