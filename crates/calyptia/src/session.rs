//! Per-invocation session
//!
//! Bundles the cloud client, the per-kind directory and the project
//! identity, all resolved once at startup and passed explicitly to
//! command handlers. There is no ambient global configuration.

use std::sync::Arc;

use anyhow::Context;

use calyptia_cloud::{ApiClient, CloudClient, DEFAULT_CLOUD_URL, project_id_from_token};
use calyptia_core::Directory;

use crate::config;

pub struct Session {
    pub cloud: Arc<ApiClient>,
    pub directory: Directory,
    pub project_id: String,
    pub project_token: String,
    pub base_url: String,
}

impl Session {
    /// Resolves the cloud URL and token (flag/env first, then stored
    /// config, then the default URL) and builds the client stack.
    pub fn connect(cloud_url: Option<String>, token: Option<String>) -> anyhow::Result<Self> {
        let base_url = match cloud_url {
            Some(url) => url,
            None => config::stored_url()?.unwrap_or_else(|| DEFAULT_CLOUD_URL.to_string()),
        };

        let token = match token {
            Some(token) => token,
            None => config::stored_token()?.context(
                "no project token configured; run `calyptia config set_token TOKEN` \
                 or pass --token",
            )?,
        };

        let project_id =
            project_id_from_token(&token).context("could not decode the project token")?;

        let cloud = Arc::new(ApiClient::new(&base_url, Some(token.clone()))?);
        let directory = Directory::new(cloud.clone() as Arc<dyn CloudClient>, &project_id);
        tracing::debug!(%base_url, %project_id, "session established");

        Ok(Self {
            cloud,
            directory,
            project_id,
            project_token: token,
            base_url,
        })
    }
}
