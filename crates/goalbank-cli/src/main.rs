use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod format;

#[derive(Parser)]
#[command(name = "goalbank-cli", version, about = "Goalbank CLI")]
struct Cli {
    #[command(flatten)]
    session: commands::SessionOpts,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Savings goals
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Rewards, challenges, milestones and profile
    Achievements {
        #[command(subcommand)]
        action: commands::achievements::AchievementsAction,
    },
    /// Financial product recommendations
    Product {
        #[command(subcommand)]
        action: commands::product::ProductAction,
    },
    /// Monthly budget
    Budget {
        #[command(subcommand)]
        action: commands::budget::BudgetAction,
    },
    /// Apply a JSON file of inputs and print the resulting snapshot
    Replay {
        /// Path to a JSON array of inputs
        file: std::path::PathBuf,
        /// Print the events produced by each input as well
        #[arg(long)]
        events: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("GOALBANK_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = cli.session;
    let result = match cli.command {
        Commands::Goal { action } => commands::goal::run(&session, action),
        Commands::Achievements { action } => commands::achievements::run(&session, action),
        Commands::Product { action } => commands::product::run(&session, action),
        Commands::Budget { action } => commands::budget::run(&session, action),
        Commands::Replay { file, events } => commands::replay::run(&session, &file, events),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "goalbank-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
