//! Ownership labels
//!
//! Every cluster object created on behalf of a core instance carries a
//! label pair linking it back to its cloud-side owner. The linkage is
//! informational (auditing, manual cleanup, pod lookup) and never used for
//! authorization.

use std::collections::BTreeMap;

pub const PROJECT_ID_LABEL: &str = "calyptia_project_id";
pub const CORE_INSTANCE_ID_LABEL: &str = "calyptia_aggregator_id";

/// Typed owner reference, converted to wire labels in exactly one place so
/// the key agreement is checked at compile time rather than by string
/// convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipLabels {
    pub project_id: String,
    pub core_instance_id: String,
}

impl OwnershipLabels {
    pub fn new(project_id: impl Into<String>, core_instance_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            core_instance_id: core_instance_id.into(),
        }
    }

    /// The label map stamped on every provisioned object. Also used as the
    /// deployment's pod selector, which is how the running pod set is
    /// located later.
    pub fn to_label_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (PROJECT_ID_LABEL.to_string(), self.project_id.clone()),
            (
                CORE_INSTANCE_ID_LABEL.to_string(),
                self.core_instance_id.clone(),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_map_keys_and_values() {
        let labels = OwnershipLabels::new("proj-1", "inst-1");
        let map = labels.to_label_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["calyptia_project_id"], "proj-1");
        assert_eq!(map["calyptia_aggregator_id"], "inst-1");
    }
}
