//! Cluster client capability
//!
//! The provisioner drives object creation through [`ClusterOps`] rather
//! than a concrete client, so the sequencing logic is testable against an
//! in-memory fake. [`KubeClusterOps`] is the production implementation
//! over kube-rs. The one behavioral requirement beyond plain creates is
//! that a namespace lookup must distinguish "not found" from other errors,
//! which is what makes the idempotent namespace ensure possible.

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, ServiceAccount};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding};
use kube::api::{Api, PostParams};

#[async_trait]
pub trait ClusterOps: Send + Sync {
    async fn get_namespace(&self, name: &str) -> Result<Option<Namespace>, kube::Error>;
    async fn create_namespace(&self, namespace: Namespace) -> Result<Namespace, kube::Error>;
    async fn create_cluster_role(&self, role: ClusterRole) -> Result<ClusterRole, kube::Error>;
    async fn create_service_account(
        &self,
        namespace: &str,
        account: ServiceAccount,
    ) -> Result<ServiceAccount, kube::Error>;
    async fn create_cluster_role_binding(
        &self,
        binding: ClusterRoleBinding,
    ) -> Result<ClusterRoleBinding, kube::Error>;
    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: Deployment,
    ) -> Result<Deployment, kube::Error>;
}

/// kube-rs backed cluster operations.
#[derive(Clone)]
pub struct KubeClusterOps {
    client: kube::Client,
}

impl KubeClusterOps {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterOps for KubeClusterOps {
    async fn get_namespace(&self, name: &str) -> Result<Option<Namespace>, kube::Error> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        match api.get(name).await {
            Ok(ns) => Ok(Some(ns)),
            Err(kube::Error::Api(ae)) if ae.code == 404 => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_namespace(&self, namespace: Namespace) -> Result<Namespace, kube::Error> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        api.create(&PostParams::default(), &namespace).await
    }

    async fn create_cluster_role(&self, role: ClusterRole) -> Result<ClusterRole, kube::Error> {
        let api: Api<ClusterRole> = Api::all(self.client.clone());
        api.create(&PostParams::default(), &role).await
    }

    async fn create_service_account(
        &self,
        namespace: &str,
        account: ServiceAccount,
    ) -> Result<ServiceAccount, kube::Error> {
        let api: Api<ServiceAccount> = Api::namespaced(self.client.clone(), namespace);
        api.create(&PostParams::default(), &account).await
    }

    async fn create_cluster_role_binding(
        &self,
        binding: ClusterRoleBinding,
    ) -> Result<ClusterRoleBinding, kube::Error> {
        let api: Api<ClusterRoleBinding> = Api::all(self.client.clone());
        api.create(&PostParams::default(), &binding).await
    }

    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: Deployment,
    ) -> Result<Deployment, kube::Error> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        api.create(&PostParams::default(), &deployment).await
    }
}
