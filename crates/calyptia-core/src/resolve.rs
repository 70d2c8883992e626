//! Key resolution
//!
//! Turns a human-supplied key (a display name or a pasted ID) into exactly
//! one canonical identifier, with one algorithm shared by every entity
//! kind. Kinds plug in through the [`EntityLister`] capability.

use async_trait::async_trait;
use tracing::debug;

use calyptia_cloud::{CloudError, ListParams};

use crate::error::{Error, Result};
use crate::ids::is_canonical_id;
use crate::kind::EntityKind;

/// The minimal shape of a directory row that resolution and completion
/// need: the canonical ID and the display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

impl NamedRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Optional scoping applied to a resolution query.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub environment_id: Option<String>,
}

impl Scope {
    pub fn environment(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: Some(environment_id.into()),
        }
    }
}

/// Listing capability for one entity kind.
///
/// Implementations wrap one directory listing call; [`resolve`] is generic
/// over this so the resolution algorithm exists exactly once.
#[async_trait]
pub trait EntityLister {
    fn kind(&self) -> EntityKind;

    async fn list(
        &self,
        params: ListParams,
    ) -> std::result::Result<Vec<NamedRef>, CloudError>;
}

/// Resolves `key` to a canonical ID.
///
/// Queries for entities named exactly `key` (capped at two results — enough
/// to distinguish unique from ambiguous). One match wins outright, even if
/// `key` also happens to look like an ID. Otherwise an ID-shaped key is
/// returned as-is, unverified: operators can always fall back to pasting an
/// ID when names collide, and a stale or mistyped ID surfaces on the next
/// mutating call instead of costing an extra round trip here.
pub async fn resolve<L: EntityLister + Sync>(
    lister: &L,
    key: &str,
    scope: &Scope,
) -> Result<String> {
    let matches = lister
        .list(ListParams {
            name: Some(key.to_string()),
            environment_id: scope.environment_id.clone(),
            last: Some(2),
            ..ListParams::default()
        })
        .await?;

    debug!(kind = %lister.kind(), key, matched = matches.len(), "resolved key");

    if matches.len() == 1 {
        return Ok(matches.into_iter().next().map(|m| m.id).unwrap_or_default());
    }

    if is_canonical_id(key) {
        return Ok(key.to_string());
    }

    if matches.is_empty() {
        Err(Error::NotFound {
            kind: lister.kind(),
            key: key.to_string(),
        })
    } else {
        Err(Error::Ambiguous {
            kind: lister.kind(),
            key: key.to_string(),
        })
    }
}
