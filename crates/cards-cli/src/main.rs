//! cards - print Trello boards and cards in the terminal.
//!
//! Credentials are kept in `~/.cardsrc`, written by `cards auth`.

mod commands;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cards_core::api::client::DEFAULT_BASE_URL;
use cards_core::{ApiClient, ConfigStore, Credentials};

#[derive(Parser)]
#[command(name = "cards", version, about = "Show Trello boards and cards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Trello API base URL. Flag only: never read from the environment or
    /// `.env`, since requests carry the saved key and token.
    #[arg(long, default_value = DEFAULT_BASE_URL, global = true, hide = true)]
    api_url: String,

    /// Credentials file (defaults to ~/.cardsrc)
    #[arg(long, env = "CARDS_CONFIG", global = true, hide = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a board to perform actions on
    Board(BoardArgs),
    /// Provide credentials to authorise Trello requests
    Auth(AuthArgs),
    /// Show all open boards
    Boards,
}

#[derive(Args)]
struct BoardArgs {
    /// Name of the board to perform actions on
    #[arg(default_value = "")]
    board: String,

    /// Action to perform on the board
    #[arg(value_enum, default_value_t = BoardAction::Show)]
    action: BoardAction,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum BoardAction {
    /// Show all cards for the given board
    Show,
}

#[derive(Args)]
struct AuthArgs {
    /// Trello API developer key for authorising requests
    #[arg(default_value = "")]
    key: String,
    /// Trello API developer token for authorising requests
    #[arg(default_value = "")]
    token: String,
    /// Trello username
    #[arg(default_value = "")]
    username: String,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing();

    let config_path = match cli.config {
        Some(path) => path,
        None => ConfigStore::default_path()?,
    };
    debug!(config = %config_path.display(), api_url = %cli.api_url, "Starting");
    let store = ConfigStore::new(config_path);

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Auth(args) => {
            let credentials = Credentials::new(args.key, args.token, args.username);
            commands::auth(&store, &credentials, &mut out)
        }
        Commands::Boards => {
            let client = ApiClient::with_base_url(&cli.api_url)?;
            commands::boards(&store, &client, &mut out).await
        }
        Commands::Board(args) => match args.action {
            BoardAction::Show => {
                let client = ApiClient::with_base_url(&cli.api_url)?;
                commands::show_board(&store, &client, &args.board, &mut out).await
            }
        },
    }
}
