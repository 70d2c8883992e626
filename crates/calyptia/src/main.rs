mod commands;
mod config;
mod confirm;
mod output;
mod session;

use clap::{Parser, Subcommand};

use commands::create::CreateCommands;
use commands::delete::DeleteCommands;
use commands::get::GetCommands;
use commands::keys::KeyKind;
use commands::settings::ConfigCommands;
use session::Session;

#[derive(Parser)]
#[command(name = "calyptia")]
#[command(version, about = "Calyptia Cloud CLI", long_about = None)]
struct Cli {
    /// Calyptia Cloud URL
    #[arg(long, env = "CALYPTIA_CLOUD_URL", global = true)]
    cloud_url: Option<String>,

    /// Calyptia Cloud project token
    #[arg(long, env = "CALYPTIA_CLOUD_TOKEN", global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the stored project token and cloud URL
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Display entities from the project
    Get {
        #[command(subcommand)]
        command: GetCommands,
    },
    /// Create entities
    Create {
        #[command(subcommand)]
        command: CreateCommands,
    },
    /// Delete entities by ID or name
    Delete {
        #[command(subcommand)]
        command: DeleteCommands,
    },
    /// Print shell-completion candidate keys for an entity kind
    #[command(hide = true)]
    Keys {
        #[arg(value_enum)]
        kind: KeyKind,
        /// Parent core-instance ID or name (pipelines only)
        #[arg(long)]
        core_instance: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { command } => commands::settings::handle(command),
        Commands::Get { command } => {
            let session = Session::connect(cli.cloud_url, cli.token)?;
            commands::get::handle(&session, command).await
        }
        Commands::Create { command } => {
            let session = Session::connect(cli.cloud_url, cli.token)?;
            commands::create::handle(&session, command).await
        }
        Commands::Delete { command } => {
            let session = Session::connect(cli.cloud_url, cli.token)?;
            commands::delete::handle(&session, command).await
        }
        Commands::Keys {
            kind,
            core_instance,
        } => {
            let session = Session::connect(cli.cloud_url, cli.token)?;
            commands::keys::handle(&session, kind, core_instance.as_deref()).await
        }
    }
}
