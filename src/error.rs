//! Content errors raised while loading a collection

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a build because a content file cannot be trusted
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{}: missing required front-matter field `{field}`", path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{}: invalid date `{value}`", path.display())]
    InvalidDate { path: PathBuf, value: String },

    #[error("{}: malformed front-matter: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("duplicate slug `{slug}` ({} and {})", first.display(), second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {message}", path.display())]
    Render { path: PathBuf, message: String },
}

impl ContentError {
    /// The file the error was reported against
    pub fn path(&self) -> &std::path::Path {
        match self {
            ContentError::MissingField { path, .. }
            | ContentError::InvalidDate { path, .. }
            | ContentError::Malformed { path, .. }
            | ContentError::Io { path, .. }
            | ContentError::Render { path, .. } => path,
            ContentError::DuplicateSlug { second, .. } => second,
        }
    }
}
