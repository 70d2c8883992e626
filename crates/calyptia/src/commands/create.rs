//! `calyptia create` — core instance setup
//!
//! The Kubernetes variant registers the instance at the cloud and then
//! materializes it in the cluster. The other backends are not implemented.

use anyhow::Context;
use clap::Subcommand;
use colored::Colorize;

use calyptia_cloud::{CloudClient, CreateCoreInstance};
use calyptia_k8s::{DEFAULT_CORE_IMAGE, KubeClusterOps, Provisioner};

use crate::session::Session;

#[derive(Subcommand)]
pub enum CreateCommands {
    /// Setup a new core instance on either Kubernetes, Amazon EC2, or Google Compute Engine
    #[command(name = "core_instance", subcommand)]
    CoreInstance(CoreInstanceBackend),
}

#[derive(Subcommand)]
pub enum CoreInstanceBackend {
    /// Setup a new core instance on Kubernetes
    #[command(aliases = ["kube", "k8s"])]
    Kubernetes {
        /// Core instance name (autogenerated if empty)
        #[arg(long)]
        name: Option<String>,
        /// Disable health check pipeline creation alongside the core instance
        #[arg(long)]
        no_healthcheck_pipeline: bool,
        /// Calyptia environment ID or name
        #[arg(long)]
        environment: Option<String>,
        /// Tags to apply to the core instance
        #[arg(long)]
        tags: Vec<String>,
        /// Kubernetes namespace for the provisioned objects
        #[arg(long, default_value = "default")]
        kube_namespace: String,
        /// Core instance workload image
        #[arg(long, default_value = DEFAULT_CORE_IMAGE)]
        image: String,
    },
    /// Setup a new core instance on Amazon EC2 (TODO)
    #[command(aliases = ["ec2", "amazon"])]
    Aws,
    /// Setup a new core instance on Google Compute Engine (TODO)
    #[command(aliases = ["google", "gce"])]
    Gcp,
}

pub async fn handle(session: &Session, command: CreateCommands) -> anyhow::Result<()> {
    let CreateCommands::CoreInstance(backend) = command;
    match backend {
        CoreInstanceBackend::Kubernetes {
            name,
            no_healthcheck_pipeline,
            environment,
            tags,
            kube_namespace,
            image,
        } => {
            let environment_id = match environment {
                Some(key) => Some(session.directory.resolve_environment_id(&key).await?),
                None => None,
            };

            let name = name.unwrap_or_else(generated_name);

            let created = session
                .cloud
                .create_core_instance(
                    &session.project_id,
                    CreateCoreInstance {
                        name,
                        add_health_check_pipeline: !no_healthcheck_pipeline,
                        environment_id,
                        tags,
                    },
                )
                .await
                .context("could not create core instance at calyptia cloud")?;

            println!("core instance: {:?}", created.name);

            let kube_client = kube::Client::try_default()
                .await
                .context("could not load kubernetes configuration")?;

            let provisioner = Provisioner::new(
                KubeClusterOps::new(kube_client),
                &kube_namespace,
                &session.project_id,
                &session.project_token,
                &session.base_url,
            )
            .with_image(image);

            let set = provisioner.provision(&created).await?;

            println!("cluster role: {:?}", set.cluster_role);
            println!("service account: {:?}", set.service_account);
            println!("cluster role binding: {:?}", set.cluster_role_binding);
            println!("deployment: {:?}", set.deployment);
            println!("{}", "Core instance is ready".green());

            Ok(())
        }
        CoreInstanceBackend::Aws | CoreInstanceBackend::Gcp => {
            anyhow::bail!("not implemented")
        }
    }
}

/// Fallback name for unnamed instances: "core-" plus a short random
/// suffix.
fn generated_name() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("core-{}", &id[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names_are_distinct() {
        let a = generated_name();
        let b = generated_name();
        assert!(a.starts_with("core-"));
        assert_eq!(a.len(), "core-".len() + 8);
        assert_ne!(a, b);
    }
}
