//! Kubernetes materialization of Calyptia core instances
//!
//! When a core instance is registered at the cloud, this crate creates its
//! cluster-side counterpart: a shared namespace (ensured idempotently), a
//! cluster role, a service account, a cluster role binding, and a
//! single-replica deployment running the core workload. Every object is
//! stamped with [`OwnershipLabels`] so it can be traced back to the cloud
//! project and instance that own it.
//!
//! Creation is strictly sequential (each object references the previous
//! one by name), first failure aborts, and nothing is rolled back.

pub mod error;
pub mod labels;
pub mod ops;
pub mod provision;

pub use error::{ProvisionError, Result, Step};
pub use labels::{CORE_INSTANCE_ID_LABEL, OwnershipLabels, PROJECT_ID_LABEL};
pub use ops::{ClusterOps, KubeClusterOps};
pub use provision::{DEFAULT_CORE_IMAGE, ProvisionedResourceSet, Provisioner};
