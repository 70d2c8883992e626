//! `calyptia delete` — single and bulk deletions
//!
//! Single deletes resolve the key first, then delete. Bulk deletes
//! prefetch the full listing, confirm with the completion-key rendering of
//! it, then fan the per-item deletes out through the bulk runner; every
//! item is attempted and all failures are reported together.

use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use colored::Colorize;

use calyptia_cloud::{CloudClient, ListParams};
use calyptia_core::{NamedRef, Scope, run_all, unique_keys};

use crate::confirm;
use crate::session::Session;

#[derive(Subcommand)]
pub enum DeleteCommands {
    /// Delete a single agent by ID or name
    Agent {
        /// Agent ID or name
        agent: String,
        /// Confirm deletion
        #[arg(short, long)]
        yes: bool,
        /// Calyptia environment ID or name
        #[arg(long)]
        environment: Option<String>,
    },
    /// Delete many agents from the project
    Agents {
        /// Delete inactive agents only
        #[arg(long, default_value_t = true)]
        inactive: bool,
        /// Confirm deletion
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a single pipeline by ID or name
    Pipeline {
        /// Pipeline ID or name
        pipeline: String,
        /// Confirm deletion
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete many pipelines from a core instance
    Pipelines {
        /// Parent core-instance ID or name
        #[arg(long)]
        core_instance: String,
        /// Calyptia environment ID or name
        #[arg(long)]
        environment: Option<String>,
        /// Confirm deletion
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle(session: &Session, command: DeleteCommands) -> anyhow::Result<()> {
    match command {
        DeleteCommands::Agent {
            agent,
            yes,
            environment,
        } => {
            if !yes && !confirm::ask(&format!("Are you sure you want to delete {agent:?}?"))? {
                println!("Aborted");
                return Ok(());
            }

            let scope = match environment {
                Some(key) => {
                    Scope::environment(session.directory.resolve_environment_id(&key).await?)
                }
                None => Scope::default(),
            };
            let agent_id = session.directory.resolve_agent_id(&agent, &scope).await?;

            session
                .cloud
                .delete_agent(&agent_id)
                .await
                .context("could not delete agent")?;
            Ok(())
        }
        DeleteCommands::Agents { inactive, yes } => {
            let mut agents = session
                .cloud
                .agents(&session.project_id, ListParams::all())
                .await
                .context("could not prefetch agents to delete")?;

            if inactive {
                agents.retain(|a| match a.last_metrics_added_at {
                    None => true,
                    Some(t) => Utc::now() - t > chrono::Duration::minutes(5),
                });
            }

            if agents.is_empty() {
                println!("No agents to delete");
                return Ok(());
            }

            let refs: Vec<NamedRef> = agents
                .iter()
                .map(|a| NamedRef::new(&a.id, &a.name))
                .collect();
            if !yes && !confirm_bulk(&unique_keys(&refs))? {
                println!("Aborted");
                return Ok(());
            }

            let total = agents.len();
            run_all(agents, |a| async move {
                session
                    .cloud
                    .delete_agent(&a.id)
                    .await
                    .map_err(|e| format!("could not delete agent {:?}: {e}", a.id))
            })
            .await?;

            println!("{}", format!("Successfully deleted {total} agents").green());
            Ok(())
        }
        DeleteCommands::Pipeline { pipeline, yes } => {
            if !yes && !confirm::ask(&format!("Are you sure you want to delete {pipeline:?}?"))? {
                println!("Aborted");
                return Ok(());
            }

            let pipeline_id = session.directory.resolve_pipeline_id(&pipeline).await?;
            session
                .cloud
                .delete_pipeline(&pipeline_id)
                .await
                .context("could not delete pipeline")?;
            Ok(())
        }
        DeleteCommands::Pipelines {
            core_instance,
            environment,
            yes,
        } => {
            let scope = match environment {
                Some(key) => {
                    Scope::environment(session.directory.resolve_environment_id(&key).await?)
                }
                None => Scope::default(),
            };
            let core_instance_id = session
                .directory
                .resolve_core_instance_id(&core_instance, &scope)
                .await?;

            let pipelines = session
                .cloud
                .pipelines(ListParams {
                    core_instance_id: Some(core_instance_id),
                    ..ListParams::default()
                })
                .await
                .context("could not prefetch pipelines to delete")?;

            if pipelines.is_empty() {
                println!("No pipelines to delete");
                return Ok(());
            }

            let refs: Vec<NamedRef> = pipelines
                .iter()
                .map(|p| NamedRef::new(&p.id, &p.name))
                .collect();
            if !yes && !confirm_bulk(&unique_keys(&refs))? {
                println!("Aborted");
                return Ok(());
            }

            let total = pipelines.len();
            run_all(pipelines, |p| async move {
                session
                    .cloud
                    .delete_pipeline(&p.id)
                    .await
                    .map_err(|e| format!("could not delete pipeline {:?}: {e}", p.id))
            })
            .await?;

            println!(
                "{}",
                format!("Successfully deleted {total} pipelines").green()
            );
            Ok(())
        }
    }
}

fn confirm_bulk(keys: &[String]) -> std::io::Result<bool> {
    confirm::ask_strict(&format!(
        "You are about to delete:\n\n{}\n\nAre you sure you want to delete all of them?",
        keys.join("\n")
    ))
}
