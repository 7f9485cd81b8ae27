use thiserror::Error;

use taal_catalog::CatalogError;

use crate::tempo::{MAX_BPM, MIN_BPM};

/// Why an encode call produced no output.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("invalid tempo: {bpm} BPM (must be {}-{})", MIN_BPM, MAX_BPM)]
    InvalidTempo { bpm: u32 },

    #[error("invalid pattern: beat count must be positive (got {beats})")]
    InvalidPattern { beats: u32 },

    #[error("invalid encoder configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("failed to open MIDI output for writing: {sink}")]
    SinkUnavailable {
        sink:   String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
