//! Main entry point for the Newsdesk admin CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    articles::ArticlesCommand, banners::BannersCommand, categories::CategoriesCommand,
    session::SessionCommand, submissions::SubmissionsCommand, users::UsersCommand,
};

/// Newsdesk CLI
#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "Command-line client for the Newsdesk newsroom admin", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand that talks to the backend.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Backend API base URL, e.g. `https://news.example.com/api`
    #[arg(
        long,
        short,
        global = true,
        help = "Backend API base URL (overrides the config file and NEWSDESK_API_URL)"
    )]
    pub server: Option<String>,

    /// Path to the configuration file (optional)
    #[arg(
        long,
        short,
        global = true,
        help = "Path to the configuration file (e.g., newsdesk.yaml or newsdesk.json)"
    )]
    pub config: Option<PathBuf>,

    /// Credential file to use instead of the default location
    #[arg(
        long,
        global = true,
        help = "Credential file to use (defaults to NEWSDESK_CREDENTIALS or the user config directory)"
    )]
    pub credentials: Option<PathBuf>,
}

/// Subcommands for the Newsdesk CLI
#[derive(Subcommand)]
enum Commands {
    /// Log in, log out, or show the signed-in account
    #[command(subcommand)]
    Session(SessionCommand),

    /// List, inspect, and delete articles
    #[command(subcommand)]
    Articles(ArticlesCommand),

    /// Manage article categories
    #[command(subcommand)]
    Categories(CategoriesCommand),

    /// Manage advertising banners
    #[command(subcommand)]
    Banners(BannersCommand),

    /// Manage staff accounts (admins only)
    #[command(subcommand)]
    Users(UsersCommand),

    /// Moderate reader submissions
    #[command(subcommand)]
    Submissions(SubmissionsCommand),

    /// Upload an image and print its public URL
    Upload {
        /// Image file to upload
        file: PathBuf,
    },

    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)
        #[arg(
            long,
            short = 'S',
            help = "The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)"
        )]
        shell: String,
    },

    /// Generate a configuration file
    Config {
        /// Format of the configuration file to generate (yaml or json). Defaults to yaml.
        #[arg(
            long,
            short,
            help = "Format of the configuration file to generate (yaml or json). Defaults to yaml."
        )]
        format: Option<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// The session handle is single-threaded, so everything runs on one thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Session(command) => commands::session::run(&cli.global, command).await?,
        Commands::Articles(command) => commands::articles::run(&cli.global, command).await?,
        Commands::Categories(command) => commands::categories::run(&cli.global, command).await?,
        Commands::Banners(command) => commands::banners::run(&cli.global, command).await?,
        Commands::Users(command) => commands::users::run(&cli.global, command).await?,
        Commands::Submissions(command) => commands::submissions::run(&cli.global, command).await?,
        Commands::Upload { file } => commands::upload::upload_image(&cli.global, &file).await?,
        Commands::Completion { shell } => {
            let shell = shell
                .parse::<clap_complete::Shell>()
                .map_err(|err| anyhow::anyhow!("invalid shell type '{shell}': {err}"))?;
            commands::completion::generate_completion(shell);
        }
        Commands::Config { format } => {
            let format = format.unwrap_or_else(|| "yaml".to_string());
            commands::config::generate_config(&format)?;
        }
    }

    Ok(())
}
