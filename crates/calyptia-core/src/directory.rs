//! Per-kind directory front
//!
//! [`Directory`] owns the cloud client and the project ID explicitly (no
//! ambient configuration) and instantiates the generic resolver for each
//! entity kind. It is the surface commands call: `resolve_*_id` for keys
//! the operator typed, `*_keys` for shell-completion candidate listings.

use std::sync::Arc;

use async_trait::async_trait;

use calyptia_cloud::{CloudClient, CloudError, ListParams};

use crate::error::Result;
use crate::keys::unique_keys;
use crate::kind::EntityKind;
use crate::resolve::{EntityLister, NamedRef, Scope, resolve};

#[derive(Clone)]
pub struct Directory {
    cloud: Arc<dyn CloudClient>,
    project_id: String,
}

impl Directory {
    pub fn new(cloud: Arc<dyn CloudClient>, project_id: impl Into<String>) -> Self {
        Self {
            cloud,
            project_id: project_id.into(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub async fn resolve_agent_id(&self, key: &str, scope: &Scope) -> Result<String> {
        resolve(&AgentLister { dir: self }, key, scope).await
    }

    pub async fn resolve_core_instance_id(&self, key: &str, scope: &Scope) -> Result<String> {
        resolve(&CoreInstanceLister { dir: self }, key, scope).await
    }

    pub async fn resolve_pipeline_id(&self, key: &str) -> Result<String> {
        resolve(&PipelineLister { dir: self }, key, &Scope::default()).await
    }

    pub async fn resolve_fleet_id(&self, key: &str) -> Result<String> {
        resolve(&FleetLister { dir: self }, key, &Scope::default()).await
    }

    pub async fn resolve_environment_id(&self, key: &str) -> Result<String> {
        resolve(&EnvironmentLister { dir: self }, key, &Scope::default()).await
    }

    /// Completion candidates for agents: unique names, IDs on collision.
    pub async fn agent_keys(&self) -> Result<Vec<String>> {
        let rows = AgentLister { dir: self }.list(ListParams::all()).await?;
        Ok(unique_keys(&rows))
    }

    pub async fn core_instance_keys(&self) -> Result<Vec<String>> {
        let rows = CoreInstanceLister { dir: self }.list(ListParams::all()).await?;
        Ok(unique_keys(&rows))
    }

    pub async fn pipeline_keys(&self, core_instance_id: Option<&str>) -> Result<Vec<String>> {
        let rows = PipelineLister { dir: self }
            .list(ListParams {
                core_instance_id: core_instance_id.map(str::to_string),
                ..ListParams::default()
            })
            .await?;
        Ok(unique_keys(&rows))
    }

    pub async fn fleet_keys(&self) -> Result<Vec<String>> {
        let rows = FleetLister { dir: self }.list(ListParams::all()).await?;
        Ok(unique_keys(&rows))
    }

    pub async fn environment_keys(&self) -> Result<Vec<String>> {
        let rows = EnvironmentLister { dir: self }.list(ListParams::all()).await?;
        Ok(unique_keys(&rows))
    }
}

macro_rules! lister {
    ($name:ident, $kind:expr, |$dir:ident, $params:ident| $body:expr) => {
        struct $name<'a> {
            dir: &'a Directory,
        }

        #[async_trait]
        impl EntityLister for $name<'_> {
            fn kind(&self) -> EntityKind {
                $kind
            }

            async fn list(
                &self,
                $params: ListParams,
            ) -> std::result::Result<Vec<NamedRef>, CloudError> {
                let $dir = self.dir;
                $body
            }
        }
    };
}

lister!(AgentLister, EntityKind::Agent, |dir, params| {
    let items = dir.cloud.agents(&dir.project_id, params).await?;
    Ok(items.into_iter().map(|a| NamedRef::new(a.id, a.name)).collect())
});

lister!(CoreInstanceLister, EntityKind::CoreInstance, |dir, params| {
    let items = dir.cloud.core_instances(&dir.project_id, params).await?;
    Ok(items.into_iter().map(|a| NamedRef::new(a.id, a.name)).collect())
});

lister!(PipelineLister, EntityKind::Pipeline, |dir, params| {
    let items = dir.cloud.pipelines(params).await?;
    Ok(items.into_iter().map(|p| NamedRef::new(p.id, p.name)).collect())
});

lister!(FleetLister, EntityKind::Fleet, |dir, params| {
    let items = dir.cloud.fleets(&dir.project_id, params).await?;
    Ok(items.into_iter().map(|f| NamedRef::new(f.id, f.name)).collect())
});

lister!(EnvironmentLister, EntityKind::Environment, |dir, params| {
    let items = dir.cloud.environments(&dir.project_id, params).await?;
    Ok(items.into_iter().map(|e| NamedRef::new(e.id, e.name)).collect())
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use calyptia_cloud::{
        Agent, ClusterObject, CoreInstance, CreateCoreInstance, CreatedCoreInstance, Environment,
        Fleet, Pipeline, PipelinePort,
    };
    use chrono::Utc;

    /// In-memory cloud with a fixed set of agents and environments.
    struct FakeCloud {
        agents: Vec<Agent>,
        environments: Vec<Environment>,
    }

    fn agent(id: &str, name: &str, environment_id: Option<&str>) -> Agent {
        Agent {
            id: id.to_string(),
            name: name.to_string(),
            agent_type: "fluentbit".to_string(),
            version: "v1.9".to_string(),
            environment_id: environment_id.map(str::to_string),
            environment_name: None,
            last_metrics_added_at: None,
            created_at: Utc::now(),
        }
    }

    fn filtered<T: Clone>(
        items: &[T],
        params: &ListParams,
        name_of: impl Fn(&T) -> &str,
        env_of: impl Fn(&T) -> Option<&str>,
    ) -> Vec<T> {
        let mut out: Vec<T> = items
            .iter()
            .filter(|it| match &params.name {
                Some(n) => name_of(it) == n,
                None => true,
            })
            .filter(|it| match &params.environment_id {
                Some(e) => env_of(it) == Some(e.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        if let Some(last) = params.last {
            out.truncate(last as usize);
        }
        out
    }

    #[async_trait]
    impl CloudClient for FakeCloud {
        async fn agents(
            &self,
            _project_id: &str,
            params: ListParams,
        ) -> calyptia_cloud::Result<Vec<Agent>> {
            Ok(filtered(
                &self.agents,
                &params,
                |a| &a.name,
                |a| a.environment_id.as_deref(),
            ))
        }

        async fn agent(&self, _agent_id: &str) -> calyptia_cloud::Result<Agent> {
            unimplemented!()
        }

        async fn delete_agent(&self, _agent_id: &str) -> calyptia_cloud::Result<()> {
            unimplemented!()
        }

        async fn core_instances(
            &self,
            _project_id: &str,
            _params: ListParams,
        ) -> calyptia_cloud::Result<Vec<CoreInstance>> {
            Ok(Vec::new())
        }

        async fn create_core_instance(
            &self,
            _project_id: &str,
            _payload: CreateCoreInstance,
        ) -> calyptia_cloud::Result<CreatedCoreInstance> {
            unimplemented!()
        }

        async fn delete_core_instance(&self, _core_instance_id: &str) -> calyptia_cloud::Result<()> {
            unimplemented!()
        }

        async fn pipelines(&self, _params: ListParams) -> calyptia_cloud::Result<Vec<Pipeline>> {
            Ok(Vec::new())
        }

        async fn delete_pipeline(&self, _pipeline_id: &str) -> calyptia_cloud::Result<()> {
            unimplemented!()
        }

        async fn pipeline_ports(
            &self,
            _pipeline_id: &str,
            _params: ListParams,
        ) -> calyptia_cloud::Result<Vec<PipelinePort>> {
            unimplemented!()
        }

        async fn fleets(
            &self,
            _project_id: &str,
            _params: ListParams,
        ) -> calyptia_cloud::Result<Vec<Fleet>> {
            Ok(Vec::new())
        }

        async fn environments(
            &self,
            _project_id: &str,
            params: ListParams,
        ) -> calyptia_cloud::Result<Vec<Environment>> {
            Ok(filtered(&self.environments, &params, |e| &e.name, |_| None))
        }

        async fn cluster_objects(
            &self,
            _core_instance_id: &str,
            _params: ListParams,
        ) -> calyptia_cloud::Result<Vec<ClusterObject>> {
            Ok(Vec::new())
        }
    }

    fn directory(cloud: FakeCloud) -> Directory {
        Directory::new(Arc::new(cloud), "proj-1")
    }

    #[tokio::test]
    async fn test_resolves_agent_by_name() {
        let dir = directory(FakeCloud {
            agents: vec![agent("id-1", "flb", None)],
            environments: Vec::new(),
        });
        let got = dir.resolve_agent_id("flb", &Scope::default()).await.unwrap();
        assert_eq!(got, "id-1");
    }

    #[tokio::test]
    async fn test_environment_scope_narrows_agent_resolution() {
        // Same name in two environments: unscoped resolution is ambiguous,
        // scoped resolution is not.
        let dir = directory(FakeCloud {
            agents: vec![agent("id-1", "flb", Some("env-1")), agent("id-2", "flb", Some("env-2"))],
            environments: Vec::new(),
        });

        let err = dir.resolve_agent_id("flb", &Scope::default()).await.unwrap_err();
        assert!(matches!(err, Error::Ambiguous { .. }));

        let got = dir
            .resolve_agent_id("flb", &Scope::environment("env-2"))
            .await
            .unwrap();
        assert_eq!(got, "id-2");
    }

    #[tokio::test]
    async fn test_resolves_environment_by_name() {
        let dir = directory(FakeCloud {
            agents: Vec::new(),
            environments: vec![Environment {
                id: "env-1".to_string(),
                name: "staging".to_string(),
                created_at: Utc::now(),
            }],
        });
        let got = dir.resolve_environment_id("staging").await.unwrap();
        assert_eq!(got, "env-1");
    }

    #[tokio::test]
    async fn test_agent_keys_follow_collision_rule() {
        let dir = directory(FakeCloud {
            agents: vec![
                agent("id-1", "dup", None),
                agent("id-2", "dup", None),
                agent("id-3", "solo", None),
            ],
            environments: Vec::new(),
        });
        let keys = dir.agent_keys().await.unwrap();
        assert_eq!(keys, vec!["id-1", "id-2", "solo"]);
    }
}
