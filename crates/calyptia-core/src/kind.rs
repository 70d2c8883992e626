//! Entity kind taxonomy

use std::fmt;

/// The kinds of entities the directory can resolve.
///
/// The display form is the one users see in error messages
/// ("could not find core instance \"x\"").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Agent,
    CoreInstance,
    Pipeline,
    Fleet,
    Environment,
    ClusterObject,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Agent => "agent",
            EntityKind::CoreInstance => "core instance",
            EntityKind::Pipeline => "pipeline",
            EntityKind::Fleet => "fleet",
            EntityKind::Environment => "environment",
            EntityKind::ClusterObject => "cluster object",
        };
        f.write_str(s)
    }
}
