//! Error types for library mutations.
//!
//! All failures here are locally recoverable; nothing in the crate panics on
//! bad input. Operations whose only failure mode is "not there" report it
//! through `bool`/`Option` instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LibraryError {
    #[error("animation name must not be empty")]
    EmptyName,

    #[error("animation named \"{0}\" already exists")]
    NameCollision(String),

    #[error("animation named \"{0}\" does not exist")]
    NotFound(String),

    #[error("no free auto-generated name; rename one of the \"New Animation\" entries")]
    NameGeneration,
}
