//! Main entry point for the DashSync CLI.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::config::ClientConfig;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

mod commands;

use commands::session::{LoginArgs, Terminal};
use commands::users::UsersCommand;

/// DashSync CLI
#[derive(Parser)]
#[command(name = "dashsync")]
#[command(about = "Command-line client for the DashSync user directory", long_about = None)]
struct Cli {
    /// Path to a configuration file (`.toml` or `.json`)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the DashSync CLI
#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login(LoginArgs),

    /// Sign out and forget the stored session
    Logout,

    /// Show who is signed in
    Whoami,

    /// Browse and edit the user directory
    #[command(subcommand)]
    Users(UsersCommand),

    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)
        #[arg(
            long,
            short,
            help = "The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)"
        )]
        shell: clap_complete::Shell,
    },

    /// Print a default configuration file
    Config {
        /// Format of the configuration file (toml or json). Defaults to toml.
        #[arg(long, short, default_value = "toml")]
        format: String,
    },
}

fn init_tracing(default_level: &str) {
    let default_level = default_level.parse::<LevelFilter>().unwrap_or(LevelFilter::WARN);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy()
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let config = ClientConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Login(args) => Terminal::open(config).login(args).await,
        Commands::Logout => Terminal::open(config).logout(),
        Commands::Whoami => {
            Terminal::open(config).whoami();
            Ok(())
        }
        Commands::Users(command) => commands::users::run(Terminal::open(config), command).await,
        Commands::Completion { shell } => {
            commands::completion::generate_completion(shell);
            Ok(())
        }
        Commands::Config { format } => commands::config::print_config(&format),
    }
}
