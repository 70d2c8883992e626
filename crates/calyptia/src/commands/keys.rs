//! `calyptia keys` — completion candidate listings
//!
//! One key per line: unique names as-is, IDs where names collide. Shell
//! completion scripts call this to offer candidates for positional
//! KEY arguments.

use clap::ValueEnum;

use calyptia_core::Scope;

use crate::session::Session;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KeyKind {
    Agents,
    CoreInstances,
    Pipelines,
    Fleets,
    Environments,
}

pub async fn handle(
    session: &Session,
    kind: KeyKind,
    core_instance: Option<&str>,
) -> anyhow::Result<()> {
    let keys = match kind {
        KeyKind::Agents => session.directory.agent_keys().await?,
        KeyKind::CoreInstances => session.directory.core_instance_keys().await?,
        KeyKind::Pipelines => {
            let core_instance_id = match core_instance {
                Some(key) => Some(
                    session
                        .directory
                        .resolve_core_instance_id(key, &Scope::default())
                        .await?,
                ),
                None => None,
            };
            session
                .directory
                .pipeline_keys(core_instance_id.as_deref())
                .await?
        }
        KeyKind::Fleets => session.directory.fleet_keys().await?,
        KeyKind::Environments => session.directory.environment_keys().await?,
    };

    for key in keys {
        println!("{key}");
    }
    Ok(())
}
