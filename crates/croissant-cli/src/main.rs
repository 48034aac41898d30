use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "croissant", version, about = "Croissant penalty tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Penalty recording and removal
    Penalty {
        #[command(subcommand)]
        action: commands::penalty::PenaltyAction,
    },
    /// People management
    Person {
        #[command(subcommand)]
        action: commands::person::PersonAction,
    },
    /// Roster overview
    Roster {
        #[command(subcommand)]
        action: commands::roster::RosterAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Penalty { action } => commands::penalty::run(action),
        Commands::Person { action } => commands::person::run(action),
        Commands::Roster { action } => commands::roster::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
