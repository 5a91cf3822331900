use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing::warn;

use plugctl_core::{MessageEvent, PlugctlConfig};

/// Administrative utility for the chat-bot plugin host.
///
/// Runs the same rename handler the chat surface exposes, so an operator
/// with shell access can fix a plugin command without going through the bot.
#[derive(Parser)]
#[command(name = "plugctl", version, about = "Rename registered plugin commands")]
struct Cli {
    /// Path to plugctl.toml (default: $PLUGCTL_CONFIG or ~/.plugctl/plugctl.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename a registered command inside a plugin's entry file and reload it
    Rename {
        /// Plugin directory name under the plugins root
        plugin: String,
        /// Command token to replace
        old_command: String,
        /// Replacement token (letters, digits and underscores only)
        new_command: String,
    },
}

/// Console-backed event: replies go to stdout. The local operator already
/// has shell access to the plugin files, so they count as an administrator.
struct ConsoleEvent {
    text: String,
}

#[async_trait]
impl MessageEvent for ConsoleEvent {
    fn text(&self) -> &str {
        &self.text
    }

    fn sender_is_admin(&self) -> bool {
        true
    }

    async fn reply(&self, text: &str) -> plugctl_core::Result<()> {
        println!("{text}");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plugctl_cli=info,plugctl_rename=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // load config: explicit path > PLUGCTL_CONFIG env > ~/.plugctl/plugctl.toml
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("PLUGCTL_CONFIG").ok());
    let config = PlugctlConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        PlugctlConfig::default()
    });

    match cli.command {
        Commands::Rename {
            plugin,
            old_command,
            new_command,
        } => {
            // Same 4-token shape the chat surface delivers to the handler.
            let event = ConsoleEvent {
                text: format!("cmd {plugin} {old_command} {new_command}"),
            };
            plugctl_rename::handle_rename(&config, &event).await?;
        }
    }

    Ok(())
}
