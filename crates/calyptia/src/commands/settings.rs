//! `calyptia config` — stored token and URL management

use clap::Subcommand;

use calyptia_cloud::project_id_from_token;

use crate::config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set the default project token so you don't have to specify it on all commands
    #[command(name = "set_token")]
    SetToken { token: String },
    /// Get the current configured default project token
    #[command(name = "current_token")]
    CurrentToken,
    /// Unset the current configured default project token
    #[command(name = "unset_token")]
    UnsetToken,
    /// Set the default cloud URL
    #[command(name = "set_url")]
    SetUrl { url: String },
    /// Get the current configured default cloud URL
    #[command(name = "current_url")]
    CurrentUrl,
    /// Unset the current configured default cloud URL
    #[command(name = "unset_url")]
    UnsetUrl,
}

pub fn handle(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::SetToken { token } => {
            // Reject tokens that don't even decode to a project ID.
            project_id_from_token(&token)?;
            config::save_token(&token)
        }
        ConfigCommands::CurrentToken => {
            if let Some(token) = config::stored_token()? {
                println!("{token}");
            }
            Ok(())
        }
        ConfigCommands::UnsetToken => config::delete_token(),
        ConfigCommands::SetUrl { url } => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("invalid cloud url scheme in {url:?}");
            }
            config::save_url(&url)
        }
        ConfigCommands::CurrentUrl => {
            if let Some(url) = config::stored_url()? {
                println!("{url}");
            }
            Ok(())
        }
        ConfigCommands::UnsetUrl => config::delete_url(),
    }
}
