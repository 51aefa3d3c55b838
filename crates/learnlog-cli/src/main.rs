use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "learnlog", version, about = "Learnlog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily streak tracking
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Module task lists
    Tasks {
        #[command(subcommand)]
        action: commands::tasks::TasksAction,
    },
    /// Preferences and data management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Login session management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Tasks { action } => commands::tasks::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Auth { action } => commands::auth::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
