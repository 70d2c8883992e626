//! Provisioning error types

use std::fmt;

use thiserror::Error;

/// The provisioning step that was executing when a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    EnsureNamespace,
    ClusterRole,
    ServiceAccount,
    ClusterRoleBinding,
    Deployment,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Step::EnsureNamespace => "namespace",
            Step::ClusterRole => "cluster role",
            Step::ServiceAccount => "service account",
            Step::ClusterRoleBinding => "cluster role binding",
            Step::Deployment => "deployment",
        };
        f.write_str(s)
    }
}

/// A provisioning failure, qualified by the step that caused it.
///
/// The underlying cluster error is carried unchanged; later steps are never
/// attempted and completed steps are never rolled back.
#[derive(Error, Debug)]
#[error("could not create kubernetes {step}: {source}")]
pub struct ProvisionError {
    pub step: Step,
    #[source]
    pub source: kube::Error,
}

pub type Result<T, E = ProvisionError> = std::result::Result<T, E>;
