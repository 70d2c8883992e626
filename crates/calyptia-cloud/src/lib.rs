//! Calyptia Cloud API surface
//!
//! This crate defines the data types exchanged with Calyptia Cloud, the
//! [`CloudClient`] trait that the rest of the workspace programs against,
//! and a reqwest-backed implementation of it.
//!
//! Commands never talk HTTP directly; they hold a `CloudClient` and an
//! explicit project ID, so everything above this crate can be exercised
//! against an in-memory client in tests.

pub mod client;
pub mod error;
pub mod token;
pub mod types;

pub use client::{ApiClient, CloudClient, DEFAULT_CLOUD_URL};
pub use error::{CloudError, Result};
pub use token::project_id_from_token;
pub use types::{
    Agent, ClusterObject, CoreInstance, CreateCoreInstance, CreatedCoreInstance, Environment,
    Fleet, ListParams, Paginated, Pipeline, PipelinePort,
};
