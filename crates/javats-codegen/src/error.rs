//! Error types for TypeScript generation
//!
//! - [`ResolveError`]: a type name could not be qualified. Always recovered from.
//! - [`EmitError`]: aborts a conversion.
//! - [`ConfigError`]: invalid or unreadable emitter configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Type '{name}' not found in scope, imports, package or java.lang")]
    NotFound { name: String },

    #[error("Type '{name}' not found under resolved scope '{scope}'")]
    UnknownScope { scope: String, name: String },
}

#[derive(Error, Debug)]
pub enum EmitError {
    /// Raised for untranslatable constructs in strict mode
    #[error("Unsupported construct: {reason}")]
    Unsupported { reason: String },

    #[error("Malformed declaration tree: {0}")]
    Structure(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration field '{field}' must not be empty")]
    Empty { field: &'static str },

    #[error("Failed to parse configuration: {message}")]
    Parse { message: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
