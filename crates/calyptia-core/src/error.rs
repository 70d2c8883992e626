//! Error taxonomy for key resolution
//!
//! Bulk operations report their own [`crate::bulk::AggregateError`]; callers
//! of [`crate::bulk::run_all`] receive it directly.

use thiserror::Error;

use crate::kind::EntityKind;

#[derive(Error, Debug)]
pub enum Error {
    /// No entity of `kind` matched `key`, and `key` is not ID-shaped.
    #[error("could not find {kind} {key:?}")]
    NotFound { kind: EntityKind, key: String },

    /// More than one entity of `kind` shares the name `key`, and `key` is
    /// not ID-shaped, so resolution refuses to guess.
    #[error("ambiguous {kind} name {key:?}, use ID instead")]
    Ambiguous { kind: EntityKind, key: String },

    /// A remote call failed; the underlying error is surfaced unchanged.
    #[error(transparent)]
    Transport(#[from] calyptia_cloud::CloudError),
}

pub type Result<T> = std::result::Result<T, Error>;
