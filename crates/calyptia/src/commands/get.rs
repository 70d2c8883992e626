//! `calyptia get` — listings and single-entity display

use anyhow::Context;
use clap::{Args, Subcommand};

use calyptia_cloud::{CloudClient, ListParams};
use calyptia_core::Scope;

use crate::output::{self, OutputFormat, agent_status, fmt_ago, print_json, print_yaml};
use crate::session::Session;

#[derive(Args)]
pub struct FormatFlags {
    /// Output format
    #[arg(short = 'o', long = "output-format", value_enum, default_value_t = OutputFormat::Table)]
    output_format: OutputFormat,

    /// Include entity IDs in table output
    #[arg(long)]
    show_ids: bool,
}

#[derive(Args)]
pub struct ListingFlags {
    /// Last N entries. 0 means no limit
    #[arg(short, long, default_value_t = 0)]
    last: u64,

    #[command(flatten)]
    format: FormatFlags,
}

impl ListingFlags {
    fn cap(&self) -> Option<u64> {
        (self.last != 0).then_some(self.last)
    }
}

#[derive(Subcommand)]
pub enum GetCommands {
    /// Display latest agents from the project
    Agents {
        #[command(flatten)]
        flags: ListingFlags,
        /// Calyptia environment ID or name
        #[arg(long)]
        environment: Option<String>,
    },
    /// Display a specific agent
    Agent {
        /// Agent ID or name
        agent: String,
        #[command(flatten)]
        format: FormatFlags,
        /// Calyptia environment ID or name
        #[arg(long)]
        environment: Option<String>,
    },
    /// Display latest core instances from the project
    #[command(name = "core_instances", aliases = ["instances", "aggregators"])]
    CoreInstances {
        #[command(flatten)]
        flags: ListingFlags,
    },
    /// Display pipelines of a core instance
    Pipelines {
        /// Parent core-instance ID or name
        #[arg(long)]
        core_instance: String,
        /// Calyptia environment ID or name
        #[arg(long)]
        environment: Option<String>,
        #[command(flatten)]
        flags: ListingFlags,
    },
    /// Display latest endpoints from a pipeline
    Endpoints {
        /// Parent pipeline ID or name
        #[arg(long)]
        pipeline: String,
        #[command(flatten)]
        flags: ListingFlags,
    },
    /// Display latest fleets from the project
    Fleets {
        #[command(flatten)]
        flags: ListingFlags,
    },
    /// Display latest environments from the project
    Environments {
        #[command(flatten)]
        flags: ListingFlags,
    },
    /// Display Kubernetes cluster objects reported by a core instance
    #[command(name = "cluster_objects")]
    ClusterObjects {
        /// Parent core-instance ID or name
        #[arg(long)]
        core_instance: String,
        #[command(flatten)]
        flags: ListingFlags,
    },
}

/// Resolves an optional `--environment` key to a scope.
async fn environment_scope(
    session: &Session,
    environment: Option<&str>,
) -> anyhow::Result<Scope> {
    match environment {
        Some(key) => {
            let id = session.directory.resolve_environment_id(key).await?;
            Ok(Scope::environment(id))
        }
        None => Ok(Scope::default()),
    }
}

pub async fn handle(session: &Session, command: GetCommands) -> anyhow::Result<()> {
    match command {
        GetCommands::Agents { flags, environment } => {
            let scope = environment_scope(session, environment.as_deref()).await?;
            let agents = session
                .cloud
                .agents(
                    &session.project_id,
                    ListParams {
                        environment_id: scope.environment_id,
                        last: flags.cap(),
                        ..ListParams::default()
                    },
                )
                .await
                .context("could not fetch your agents")?;

            render(&flags.format, &agents, AGENT_HEADERS, agent_row)
        }
        GetCommands::Agent {
            agent,
            format,
            environment,
        } => {
            let scope = environment_scope(session, environment.as_deref()).await?;
            let agent_id = session.directory.resolve_agent_id(&agent, &scope).await?;
            let agent = session
                .cloud
                .agent(&agent_id)
                .await
                .context("could not fetch your agent")?;

            render(&format, std::slice::from_ref(&agent), AGENT_HEADERS, agent_row)
        }
        GetCommands::CoreInstances { flags } => {
            let instances = session
                .cloud
                .core_instances(
                    &session.project_id,
                    ListParams {
                        last: flags.cap(),
                        ..ListParams::default()
                    },
                )
                .await
                .context("could not fetch your core instances")?;

            render(&flags.format, &instances, &["NAME", "VERSION", "STATUS", "AGE"], |i| {
                vec![
                    i.id.clone(),
                    i.name.clone(),
                    i.version.clone(),
                    i.status.clone().unwrap_or_default(),
                    fmt_ago(i.created_at),
                ]
            })
        }
        GetCommands::Pipelines {
            core_instance,
            environment,
            flags,
        } => {
            let scope = environment_scope(session, environment.as_deref()).await?;
            let core_instance_id = session
                .directory
                .resolve_core_instance_id(&core_instance, &scope)
                .await?;
            let pipelines = session
                .cloud
                .pipelines(ListParams {
                    core_instance_id: Some(core_instance_id),
                    last: flags.cap(),
                    ..ListParams::default()
                })
                .await
                .context("could not fetch your pipelines")?;

            render(&flags.format, &pipelines, &["NAME", "REPLICAS", "STATUS", "AGE"], |p| {
                vec![
                    p.id.clone(),
                    p.name.clone(),
                    p.replicas_count.to_string(),
                    p.status.clone().unwrap_or_default(),
                    fmt_ago(p.created_at),
                ]
            })
        }
        GetCommands::Endpoints { pipeline, flags } => {
            let pipeline_id = session.directory.resolve_pipeline_id(&pipeline).await?;
            let ports = session
                .cloud
                .pipeline_ports(
                    &pipeline_id,
                    ListParams {
                        last: flags.cap(),
                        ..ListParams::default()
                    },
                )
                .await
                .context("could not fetch your pipeline endpoints")?;

            render(&flags.format, &ports, ENDPOINT_HEADERS, endpoint_row)
        }
        GetCommands::Fleets { flags } => {
            let fleets = session
                .cloud
                .fleets(
                    &session.project_id,
                    ListParams {
                        last: flags.cap(),
                        ..ListParams::default()
                    },
                )
                .await
                .context("could not fetch your fleets")?;

            render(&flags.format, &fleets, &["NAME", "AGE"], |f| {
                vec![f.id.clone(), f.name.clone(), fmt_ago(f.created_at)]
            })
        }
        GetCommands::Environments { flags } => {
            let environments = session
                .cloud
                .environments(
                    &session.project_id,
                    ListParams {
                        last: flags.cap(),
                        ..ListParams::default()
                    },
                )
                .await
                .context("could not fetch your environments")?;

            render(&flags.format, &environments, &["NAME", "AGE"], |e| {
                vec![e.id.clone(), e.name.clone(), fmt_ago(e.created_at)]
            })
        }
        GetCommands::ClusterObjects {
            core_instance,
            flags,
        } => {
            let core_instance_id = session
                .directory
                .resolve_core_instance_id(&core_instance, &Scope::default())
                .await?;
            let objects = session
                .cloud
                .cluster_objects(
                    &core_instance_id,
                    ListParams {
                        last: flags.cap(),
                        ..ListParams::default()
                    },
                )
                .await
                .context("could not fetch your cluster objects")?;

            render(&flags.format, &objects, &["NAME", "KIND", "AGE"], |o| {
                vec![o.id.clone(), o.name.clone(), o.kind.clone(), fmt_ago(o.created_at)]
            })
        }
    }
}

const AGENT_HEADERS: &[&str] = &["NAME", "TYPE", "ENVIRONMENT", "VERSION", "STATUS", "AGE"];

fn agent_row(a: &calyptia_cloud::Agent) -> Vec<String> {
    vec![
        a.id.clone(),
        a.name.clone(),
        a.agent_type.clone(),
        a.environment_name.clone().unwrap_or_default(),
        a.version.clone(),
        agent_status(a.last_metrics_added_at),
        fmt_ago(a.created_at),
    ]
}

const ENDPOINT_HEADERS: &[&str] = &["PROTOCOL", "FRONTEND-PORT", "BACKEND-PORT", "ENDPOINT", "AGE"];

fn endpoint_row(p: &calyptia_cloud::PipelinePort) -> Vec<String> {
    // An empty endpoint means the load balancer has not allocated one yet.
    let endpoint = if p.endpoint.is_empty() {
        "Pending".to_string()
    } else {
        p.endpoint.clone()
    };
    vec![
        p.id.clone(),
        p.protocol.clone(),
        p.frontend_port.to_string(),
        p.backend_port.to_string(),
        endpoint,
        fmt_ago(p.created_at),
    ]
}

/// Renders a listing in the requested format. `row` returns the ID cell
/// first; it is dropped from table output unless `--show-ids` is set.
fn render<T: serde::Serialize>(
    format: &FormatFlags,
    items: &[T],
    headers: &[&str],
    row: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    match format.output_format {
        OutputFormat::Table => {
            let mut all_headers = vec!["ID"];
            all_headers.extend_from_slice(headers);

            let mut rows: Vec<Vec<String>> = items.iter().map(&row).collect();
            if !format.show_ids {
                for r in &mut rows {
                    r.remove(0);
                }
            }

            let headers: &[&str] = if format.show_ids { &all_headers } else { headers };
            output::print_table(headers, &rows);
            Ok(())
        }
        OutputFormat::Json => print_json(&items),
        OutputFormat::Yaml => print_yaml(&items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calyptia_cloud::PipelinePort;
    use chrono::Utc;

    fn port(endpoint: &str) -> PipelinePort {
        PipelinePort {
            id: "port-1".to_string(),
            protocol: "tcp".to_string(),
            frontend_port: 4318,
            backend_port: 4318,
            endpoint: endpoint.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_unallocated_endpoint_shows_as_pending() {
        let row = endpoint_row(&port(""));
        assert_eq!(&row[..4], &["port-1", "tcp", "4318", "4318"]);
        assert_eq!(row[4], "Pending");
    }

    #[test]
    fn test_allocated_endpoint_passes_through() {
        let row = endpoint_row(&port("tcp://lb.example.com:4318"));
        assert_eq!(row[4], "tcp://lb.example.com:4318");
    }
}
