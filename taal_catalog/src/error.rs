use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by catalog operations and the JSON loader.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("taal not found: {name}")]
    NotFound { name: String },

    #[error("taal already exists: {name}")]
    AlreadyExists { name: String },

    #[error("unable to access taal data file '{}'", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing taal data from {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("error encoding taal data")]
    Encode(#[source] serde_json::Error),

    #[error("malformed taal data for '{name}': {reason}")]
    Malformed { name: String, reason: String },
}
