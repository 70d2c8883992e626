//! Core logic of the Calyptia CLI
//!
//! Everything a command needs between "the operator typed a string" and
//! "the cloud call goes out":
//!
//! - [`ids::is_canonical_id`] — is a key already a canonical identifier?
//! - [`resolve::resolve`] — turn a name-or-ID key into exactly one ID, or
//!   a classified error.
//! - [`keys::unique_keys`] — shell-completion candidates for a listing.
//! - [`bulk::run_all`] — fan out independent per-item calls and report
//!   every failure.
//! - [`directory::Directory`] — the per-kind front over the cloud client
//!   that instantiates the generic resolver for each entity kind.
//!
//! This crate knows nothing about Kubernetes or about output formatting.

pub mod bulk;
pub mod directory;
pub mod error;
pub mod ids;
pub mod keys;
pub mod kind;
pub mod resolve;

pub use bulk::{AggregateError, run_all};
pub use directory::Directory;
pub use error::{Error, Result};
pub use ids::is_canonical_id;
pub use keys::unique_keys;
pub use kind::EntityKind;
pub use resolve::{EntityLister, NamedRef, Scope, resolve};
