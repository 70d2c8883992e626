//! Data types exchanged with Calyptia Cloud
//!
//! Every entity carries an opaque `id` assigned by the cloud directory and
//! a human-facing `name`. IDs are globally unique; names are not, which is
//! why key resolution exists at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A paginated listing as returned by the cloud API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Common listing filter.
///
/// `name` filters by exact display name. `last` caps the number of results;
/// `None` means no limit. Resolution queries use `last = Some(2)`: two rows
/// are enough to tell "unique" from "ambiguous" without over-fetching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub name: Option<String>,
    pub environment_id: Option<String>,
    pub core_instance_id: Option<String>,
    pub last: Option<u64>,
}

impl ListParams {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A Fluent Bit agent registered with the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub agent_type: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub environment_id: Option<String>,
    #[serde(default)]
    pub environment_name: Option<String>,
    #[serde(default)]
    pub last_metrics_added_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A core instance (historically "aggregator"): the cloud-side record of
/// one deployed collector workload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreInstance {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub environment_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A pipeline running on a core instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub replicas_count: u64,
    pub created_at: DateTime<Utc>,
}

/// A named group of agents sharing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fleet {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// An isolation scope for agents and core instances within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A Kubernetes object discovered by a core instance and reported back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// A network endpoint exposed by a pipeline.
///
/// `endpoint` stays empty until the load balancer finishes allocating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelinePort {
    pub id: String,
    #[serde(default)]
    pub protocol: String,
    pub frontend_port: u16,
    pub backend_port: u16,
    #[serde(default)]
    pub endpoint: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a new core instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCoreInstance {
    pub name: String,
    pub add_health_check_pipeline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// The cloud's response to a core instance registration. This is the
/// record the provisioner materializes in the cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedCoreInstance {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
