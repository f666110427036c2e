use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {format} class index: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("Unsupported class index format: '{0}'")]
    UnsupportedFormat(String),
}
