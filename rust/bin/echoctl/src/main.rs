//! `echoctl`: the Echo inbox CLI.
//!
//! Prints the merged comments/DM feed and fetches AI reply suggestions
//! from the Echo backend.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use echo_inbox::{InteractionKind, ReplySlot};

use commands::suggest::SuggestArgs;

/// Echo inbox CLI tool.
#[derive(Parser, Debug)]
#[command(name = "echoctl", about = "Echo inbox CLI")]
struct Cli {
    /// Path to client config file (default: ~/.echo/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: text or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "text")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show latest comments and direct messages, newest first.
    Feed,

    /// Get reply suggestions for a comment or message.
    Suggest {
        /// Item kind: comment or message.
        kind: InteractionKind,
        /// Comment or message ID.
        id: String,
        /// Post the comment belongs to (looked up from the feed if omitted).
        #[arg(long)]
        post_id: Option<String>,
        /// Copy a reply to the clipboard: "main" or an alternative index.
        #[arg(long)]
        copy: Option<ReplySlot>,
    },

    /// Inspect or edit the client config.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the config file (token masked).
    Show,
    /// Set the backend URL.
    SetServer { url: String },
    /// Set the bearer token; an empty string clears it.
    SetToken { token: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);
    let output_json = cli.output == "json";

    match cli.command {
        Commands::Feed => {
            commands::feed::run(output_json, &config_path).await?;
        }

        Commands::Suggest {
            kind,
            id,
            post_id,
            copy,
        } => {
            let args = SuggestArgs {
                kind,
                id: &id,
                post_id: post_id.as_deref(),
                copy,
                output_json,
            };
            commands::suggest::run(args, &config_path).await?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config_path)?,
            ConfigAction::SetServer { url } => commands::config::set_server(&url, &config_path)?,
            ConfigAction::SetToken { token } => commands::config::set_token(&token, &config_path)?,
        },

        Commands::Version => {
            println!("echoctl v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
