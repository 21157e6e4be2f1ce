use breakclock_core::Config;
use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "breakclock", version, about = "25 + 5 session/break clock")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive clock (reads intents from stdin)
    Run(commands::run::RunArgs),
    /// Run the timer headless for a number of ticks and print the result
    Simulate(commands::simulate::SimulateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let loaded = Config::load();
    let level = loaded
        .as_ref()
        .map(|cfg| cfg.log.level.clone())
        .unwrap_or_else(|_| Config::default().log.level);
    logging::init(&level);
    let config = loaded.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "using default configuration");
        Config::default()
    });

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, &config),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
