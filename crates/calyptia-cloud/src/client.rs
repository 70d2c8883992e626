//! Cloud API client
//!
//! [`CloudClient`] is the remote directory contract the workspace depends
//! on: exact-name filtered listings with a result cap, plus the handful of
//! mutating calls the commands need. [`ApiClient`] is the production
//! implementation over reqwest.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CloudError, Result};
use crate::types::{
    Agent, ClusterObject, CoreInstance, CreateCoreInstance, CreatedCoreInstance, Environment,
    Fleet, ListParams, Paginated, Pipeline, PipelinePort,
};

/// Default Calyptia Cloud endpoint.
pub const DEFAULT_CLOUD_URL: &str = "https://cloud-api.calyptia.com";

/// Remote directory contract.
///
/// Listings must honor `ListParams`: exact `name` match, environment /
/// core-instance scoping, and a `last` result cap (`None` = unlimited).
#[async_trait]
pub trait CloudClient: Send + Sync {
    async fn agents(&self, project_id: &str, params: ListParams) -> Result<Vec<Agent>>;
    async fn agent(&self, agent_id: &str) -> Result<Agent>;
    async fn delete_agent(&self, agent_id: &str) -> Result<()>;

    async fn core_instances(
        &self,
        project_id: &str,
        params: ListParams,
    ) -> Result<Vec<CoreInstance>>;
    async fn create_core_instance(
        &self,
        project_id: &str,
        payload: CreateCoreInstance,
    ) -> Result<CreatedCoreInstance>;
    async fn delete_core_instance(&self, core_instance_id: &str) -> Result<()>;

    async fn pipelines(&self, params: ListParams) -> Result<Vec<Pipeline>>;
    async fn delete_pipeline(&self, pipeline_id: &str) -> Result<()>;
    async fn pipeline_ports(
        &self,
        pipeline_id: &str,
        params: ListParams,
    ) -> Result<Vec<PipelinePort>>;

    async fn fleets(&self, project_id: &str, params: ListParams) -> Result<Vec<Fleet>>;
    async fn environments(&self, project_id: &str, params: ListParams) -> Result<Vec<Environment>>;
    async fn cluster_objects(
        &self,
        core_instance_id: &str,
        params: ListParams,
    ) -> Result<Vec<ClusterObject>>;
}

/// Reqwest-backed Calyptia Cloud client.
///
/// Authenticates every request with the project token header.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let base_url = base_url.into();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CloudError::InvalidUrl(base_url));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path)
    }

    fn query(params: &ListParams) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        if let Some(name) = &params.name {
            q.push(("name", name.clone()));
        }
        if let Some(env) = &params.environment_id {
            q.push(("environment_id", env.clone()));
        }
        if let Some(id) = &params.core_instance_id {
            q.push(("core_instance_id", id.clone()));
        }
        if let Some(last) = params.last {
            q.push(("last", last.to_string()));
        }
        q
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.header("X-Project-Token", token),
            None => req,
        }
    }

    async fn check<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(CloudError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json().await?)
    }

    async fn list<T: DeserializeOwned>(&self, path: &str, params: &ListParams) -> Result<Vec<T>> {
        debug!(path, ?params, "listing cloud entities");
        let resp = self
            .authorized(self.http.get(self.url(path)).query(&Self::query(params)))
            .send()
            .await?;
        let page: Paginated<T> = Self::check(resp).await?;
        Ok(page.items)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let resp = self.authorized(self.http.delete(self.url(path))).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(CloudError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CloudClient for ApiClient {
    async fn agents(&self, project_id: &str, params: ListParams) -> Result<Vec<Agent>> {
        self.list(&format!("projects/{project_id}/agents"), &params).await
    }

    async fn agent(&self, agent_id: &str) -> Result<Agent> {
        let resp = self
            .authorized(self.http.get(self.url(&format!("agents/{agent_id}"))))
            .send()
            .await?;
        Self::check(resp).await
    }

    async fn delete_agent(&self, agent_id: &str) -> Result<()> {
        self.delete(&format!("agents/{agent_id}")).await
    }

    async fn core_instances(
        &self,
        project_id: &str,
        params: ListParams,
    ) -> Result<Vec<CoreInstance>> {
        self.list(&format!("projects/{project_id}/aggregators"), &params).await
    }

    async fn create_core_instance(
        &self,
        project_id: &str,
        payload: CreateCoreInstance,
    ) -> Result<CreatedCoreInstance> {
        let resp = self
            .authorized(
                self.http
                    .post(self.url(&format!("projects/{project_id}/aggregators")))
                    .json(&payload),
            )
            .send()
            .await?;
        Self::check(resp).await
    }

    async fn delete_core_instance(&self, core_instance_id: &str) -> Result<()> {
        self.delete(&format!("aggregators/{core_instance_id}")).await
    }

    async fn pipelines(&self, params: ListParams) -> Result<Vec<Pipeline>> {
        match &params.core_instance_id {
            Some(id) => self.list(&format!("aggregators/{id}/pipelines"), &params).await,
            None => self.list("pipelines", &params).await,
        }
    }

    async fn delete_pipeline(&self, pipeline_id: &str) -> Result<()> {
        self.delete(&format!("pipelines/{pipeline_id}")).await
    }

    async fn pipeline_ports(
        &self,
        pipeline_id: &str,
        params: ListParams,
    ) -> Result<Vec<PipelinePort>> {
        self.list(&format!("pipelines/{pipeline_id}/ports"), &params).await
    }

    async fn fleets(&self, project_id: &str, params: ListParams) -> Result<Vec<Fleet>> {
        self.list(&format!("projects/{project_id}/fleets"), &params).await
    }

    async fn environments(&self, project_id: &str, params: ListParams) -> Result<Vec<Environment>> {
        self.list(&format!("projects/{project_id}/environments"), &params).await
    }

    async fn cluster_objects(
        &self,
        core_instance_id: &str,
        params: ListParams,
    ) -> Result<Vec<ClusterObject>> {
        self.list(
            &format!("aggregators/{core_instance_id}/cluster_objects"),
            &params,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unknown_scheme() {
        let err = ApiClient::new("ftp://cloud-api.calyptia.com", None).unwrap_err();
        assert!(matches!(err, CloudError::InvalidUrl(_)));
    }

    #[test]
    fn test_trims_trailing_slash() {
        let client = ApiClient::new("https://cloud-api.calyptia.com/", None).unwrap();
        assert_eq!(client.url("pipelines"), "https://cloud-api.calyptia.com/v1/pipelines");
    }

    #[test]
    fn test_query_includes_only_set_params() {
        let q = ApiClient::query(&ListParams {
            name: Some("flb".to_string()),
            last: Some(2),
            ..ListParams::default()
        });
        assert_eq!(
            q,
            vec![("name", "flb".to_string()), ("last", "2".to_string())]
        );
    }
}
