//! declmeta error handling.
//!
//! The tree, tag, merge and filter operations never fail; absent or invalid
//! input is a defined no-op there. Errors only arise in the outer layers that
//! touch the filesystem or decode external data: loading declaration events,
//! loading filter configuration and writing generator output.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias for the fallible outer layers.
pub type Result<T> = std::result::Result<T, DeclMetaError>;

/// Unified error type for declmeta's I/O and decoding failures.
#[derive(Debug, Error, Diagnostic)]
pub enum DeclMetaError {
    #[error("could not read or write '{}'", path.display())]
    #[diagnostic(code(declmeta::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid declaration events in '{}'", path.display())]
    #[diagnostic(
        code(declmeta::events::decode),
        help("expected a JSON array of declaration events or a single translation_unit event")
    )]
    Events {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid filter configuration in '{}': {message}", path.display())]
    #[diagnostic(
        code(declmeta::config::decode),
        help("kinds use snake_case names such as class_decl or struct_decl")
    )]
    Config { path: PathBuf, message: String },

    #[error("failed to write generated output")]
    #[diagnostic(code(declmeta::generator::write))]
    Generator {
        #[source]
        source: std::io::Error,
    },
}

impl DeclMetaError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        DeclMetaError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn config(path: &Path, message: impl Into<String>) -> Self {
        DeclMetaError::Config {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
