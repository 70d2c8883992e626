//! Shell-completion candidate keys
//!
//! Shares the collision rule with key resolution: a name that is unique in
//! the listing is a usable key, a name that collides is not, so the ID is
//! offered instead.

use std::collections::HashMap;

use crate::resolve::NamedRef;

/// Builds the completion candidate list for a full listing of one kind.
///
/// Emits the name for entities whose name is unique within the listing and
/// the ID for every entity whose name collides. Input order is preserved.
pub fn unique_keys(entities: &[NamedRef]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for e in entities {
        *counts.entry(e.name.as_str()).or_insert(0) += 1;
    }

    entities
        .iter()
        .map(|e| {
            if counts[e.name.as_str()] == 1 {
                e.name.clone()
            } else {
                e.id.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_names_pass_through_in_order() {
        let given = vec![
            NamedRef::new("id-1", "name-1"),
            NamedRef::new("id-2", "name-2"),
        ];
        assert_eq!(unique_keys(&given), vec!["name-1", "name-2"]);
    }

    #[test]
    fn test_colliding_names_become_ids() {
        let given = vec![
            NamedRef::new("id-1", "name"),
            NamedRef::new("id-2", "name"),
        ];
        assert_eq!(unique_keys(&given), vec!["id-1", "id-2"]);
    }

    #[test]
    fn test_mixed_listing() {
        let given = vec![
            NamedRef::new("id-1", "name"),
            NamedRef::new("id-2", "name"),
            NamedRef::new("id-3", "other-name"),
        ];
        assert_eq!(unique_keys(&given), vec!["id-1", "id-2", "other-name"]);
    }

    #[test]
    fn test_empty_listing() {
        assert!(unique_keys(&[]).is_empty());
    }
}
