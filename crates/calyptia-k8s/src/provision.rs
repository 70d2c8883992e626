//! Provisioning orchestrator
//!
//! One provisioning run creates, in order: namespace (ensured, shared
//! across all core instances in the project) → cluster role → service
//! account → cluster role binding → deployment. The order is load-bearing:
//! each later object references an earlier one by name.
//!
//! The first failing step aborts the run with a [`ProvisionError`] naming
//! the step. Completed steps are left in place; only the namespace ensure
//! is safe to rerun, the creates are unconditional and would fail with
//! "already exists" on a rerun after partial failure. There is no
//! deprovisioning counterpart: deleting a core instance at the cloud does
//! not tear these objects down, the ownership labels are what an operator
//! uses to find and remove them by hand.

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, EnvVar, Namespace, PodSpec, PodTemplateSpec, ServiceAccount,
};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, PolicyRule, RoleRef, Subject};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use tracing::info;

use calyptia_cloud::CreatedCoreInstance;

use crate::error::{ProvisionError, Result, Step};
use crate::labels::OwnershipLabels;
use crate::ops::ClusterOps;

/// Image of the core instance workload.
pub const DEFAULT_CORE_IMAGE: &str = "ghcr.io/calyptia/core";

/// Names of the cluster objects one provisioning run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedResourceSet {
    pub namespace: String,
    pub cluster_role: String,
    pub service_account: String,
    pub cluster_role_binding: String,
    pub deployment: String,
}

/// Drives the ordered creation of the cluster-side objects for one core
/// instance. All collaborators are explicit constructor arguments; nothing
/// is read from ambient state.
pub struct Provisioner<C> {
    ops: C,
    namespace: String,
    project_id: String,
    project_token: String,
    cloud_base_url: String,
    image: String,
}

impl<C: ClusterOps> Provisioner<C> {
    pub fn new(
        ops: C,
        namespace: impl Into<String>,
        project_id: impl Into<String>,
        project_token: impl Into<String>,
        cloud_base_url: impl Into<String>,
    ) -> Self {
        Self {
            ops,
            namespace: namespace.into(),
            project_id: project_id.into(),
            project_token: project_token.into(),
            cloud_base_url: cloud_base_url.into(),
            image: DEFAULT_CORE_IMAGE.to_string(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Materializes `instance` in the cluster.
    pub async fn provision(&self, instance: &CreatedCoreInstance) -> Result<ProvisionedResourceSet> {
        let labels = OwnershipLabels::new(&self.project_id, &instance.id);

        self.ensure_namespace().await?;

        let role = self
            .ops
            .create_cluster_role(cluster_role(&instance.name, &labels))
            .await
            .map_err(fail(Step::ClusterRole))?;
        let role_name = role.metadata.name.unwrap_or_default();
        info!(name = %role_name, "created cluster role");

        let account = self
            .ops
            .create_service_account(
                &self.namespace,
                service_account(&instance.name, &labels),
            )
            .await
            .map_err(fail(Step::ServiceAccount))?;
        let account_name = account.metadata.name.unwrap_or_default();
        info!(name = %account_name, "created service account");

        let binding = self
            .ops
            .create_cluster_role_binding(cluster_role_binding(
                &instance.name,
                &labels,
                &role_name,
                &account_name,
                &self.namespace,
            ))
            .await
            .map_err(fail(Step::ClusterRoleBinding))?;
        let binding_name = binding.metadata.name.unwrap_or_default();
        info!(name = %binding_name, "created cluster role binding");

        let deploy = self
            .ops
            .create_deployment(
                &self.namespace,
                self.deployment(instance, &labels, &account_name),
            )
            .await
            .map_err(fail(Step::Deployment))?;
        let deploy_name = deploy.metadata.name.unwrap_or_default();
        info!(name = %deploy_name, "created deployment");

        Ok(ProvisionedResourceSet {
            namespace: self.namespace.clone(),
            cluster_role: role_name,
            service_account: account_name,
            cluster_role_binding: binding_name,
            deployment: deploy_name,
        })
    }

    /// Creates the shared namespace only if it does not exist yet. A
    /// pre-existing namespace is satisfied, not an error.
    async fn ensure_namespace(&self) -> Result<()> {
        let existing = self
            .ops
            .get_namespace(&self.namespace)
            .await
            .map_err(fail(Step::EnsureNamespace))?;

        if existing.is_some() {
            info!(namespace = %self.namespace, "namespace already exists");
            return Ok(());
        }

        self.ops
            .create_namespace(Namespace {
                metadata: ObjectMeta {
                    name: Some(self.namespace.clone()),
                    ..Default::default()
                },
                ..Default::default()
            })
            .await
            .map_err(fail(Step::EnsureNamespace))?;
        info!(namespace = %self.namespace, "created namespace");

        Ok(())
    }

    fn deployment(
        &self,
        instance: &CreatedCoreInstance,
        labels: &OwnershipLabels,
        service_account_name: &str,
    ) -> Deployment {
        let label_map = labels.to_label_map();

        Deployment {
            metadata: ObjectMeta {
                name: Some(format!("{}-deployment", instance.name)),
                labels: Some(label_map.clone()),
                ..Default::default()
            },
            spec: Some(DeploymentSpec {
                replicas: Some(1),
                // The ownership labels double as the pod selector; this is
                // how the running pod set is located later.
                selector: LabelSelector {
                    match_labels: Some(label_map.clone()),
                    ..Default::default()
                },
                template: PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        labels: Some(label_map),
                        ..Default::default()
                    }),
                    spec: Some(PodSpec {
                        service_account_name: Some(service_account_name.to_string()),
                        automount_service_account_token: Some(true),
                        containers: vec![Container {
                            name: instance.name.clone(),
                            image: Some(self.image.clone()),
                            image_pull_policy: Some("Always".to_string()),
                            args: Some(vec!["-debug=true".to_string()]),
                            env: Some(vec![
                                env_var("AGGREGATOR_NAME", &instance.name),
                                env_var("PROJECT_TOKEN", &self.project_token),
                                env_var("AGGREGATOR_FLUENTBIT_CLOUD_URL", &self.cloud_base_url),
                            ]),
                            ..Default::default()
                        }],
                        ..Default::default()
                    }),
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

fn fail(step: Step) -> impl FnOnce(kube::Error) -> ProvisionError {
    move |source| ProvisionError { step, source }
}

fn env_var(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.to_string()),
        ..Default::default()
    }
}

fn cluster_role(instance_name: &str, labels: &OwnershipLabels) -> ClusterRole {
    ClusterRole {
        metadata: ObjectMeta {
            name: Some(format!("{instance_name}-cluster-role")),
            labels: Some(labels.to_label_map()),
            ..Default::default()
        },
        rules: Some(vec![PolicyRule {
            api_groups: Some(vec!["".to_string(), "apps".to_string()]),
            resources: Some(
                [
                    "namespaces",
                    "deployments",
                    "replicasets",
                    "pods",
                    "services",
                    "configmaps",
                    "deployments/scale",
                    "secrets",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ),
            verbs: [
                "get",
                "list",
                "create",
                "delete",
                "patch",
                "update",
                "watch",
                "deletecollection",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

fn service_account(instance_name: &str, labels: &OwnershipLabels) -> ServiceAccount {
    ServiceAccount {
        metadata: ObjectMeta {
            name: Some(format!("{instance_name}-service-account")),
            labels: Some(labels.to_label_map()),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn cluster_role_binding(
    instance_name: &str,
    labels: &OwnershipLabels,
    role_name: &str,
    service_account_name: &str,
    namespace: &str,
) -> ClusterRoleBinding {
    ClusterRoleBinding {
        metadata: ObjectMeta {
            name: Some(format!("{instance_name}-cluster-role-binding")),
            labels: Some(labels.to_label_map()),
            ..Default::default()
        },
        role_ref: RoleRef {
            api_group: "rbac.authorization.k8s.io".to_string(),
            kind: "ClusterRole".to_string(),
            name: role_name.to_string(),
        },
        subjects: Some(vec![Subject {
            kind: "ServiceAccount".to_string(),
            name: service_account_name.to_string(),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        }]),
    }
}
