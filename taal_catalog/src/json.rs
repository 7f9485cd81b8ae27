//! JSON document format for the catalog.
//!
//! ```json
//! {
//!     "Hindustani": {
//!         "Dadra": { "beats": 6, "bols": ["Dha", "Dhin", "Na", "Dha", "Tin", "Na"] }
//!     }
//! }
//! ```
//!
//! Top-level keys are system groups; each maps taal names to their beat
//! count and bol sequence.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{CatalogError, PatternCatalog, Taal, TaalCatalog};

type Document<T> = BTreeMap<String, BTreeMap<String, T>>;

/// Entry as read; fields are optional so a missing one can be reported
/// against the taal name.
#[derive(Deserialize)]
struct RawEntry {
    beats: Option<u32>,
    bols:  Option<Vec<String>>,
}

#[derive(Serialize)]
struct Entry<'a> {
    beats: u32,
    bols:  &'a [String],
}

impl TaalCatalog {
    /// Load a catalog from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.merge_json_file(path)?;
        Ok(catalog)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.merge_json_str(text, "<string>")?;
        Ok(catalog)
    }

    /// Read a JSON file into this catalog.  Entries whose names already
    /// exist are replaced.
    pub fn merge_json_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let n = self.merge_json_str(&text, &path.display().to_string())?;
        info!("loaded {} taals from {}", n, path.display());
        Ok(n)
    }

    fn merge_json_str(&mut self, text: &str, origin: &str) -> Result<usize, CatalogError> {
        let doc: Document<RawEntry> = serde_json::from_str(text).map_err(|source| {
            CatalogError::Parse { origin: origin.to_string(), source }
        })?;

        let mut loaded = Vec::new();
        for (system, entries) in doc {
            for (name, raw) in entries {
                let (beats, bols) = match (raw.beats, raw.bols) {
                    (Some(beats), Some(bols)) => (beats, bols),
                    _ => {
                        return Err(CatalogError::Malformed {
                            name,
                            reason: "missing 'beats' or 'bols'".to_string(),
                        })
                    }
                };
                loaded.push(Taal { name, system: system.clone(), beats, bols });
            }
        }

        // Nothing is applied unless the whole document validated.
        let n = loaded.len();
        for taal in loaded {
            debug!("loaded taal {}", taal);
            self.put(taal);
        }
        Ok(n)
    }

    /// Render the catalog as a pretty-printed JSON document
    /// (4-space indent).
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        let mut doc: Document<Entry<'_>> = BTreeMap::new();
        for taal in self.list() {
            doc.entry(taal.system.clone())
                .or_default()
                .insert(taal.name.clone(), Entry { beats: taal.beats, bols: &taal.bols });
        }

        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        doc.serialize(&mut ser).map_err(CatalogError::Encode)?;
        buf.push(b'\n');
        String::from_utf8(buf)
            .map_err(|e| CatalogError::Encode(<serde_json::Error as serde::ser::Error>::custom(e)))
    }

    /// Write the catalog to `path`, creating parent directories.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| CatalogError::Io { path: path.to_path_buf(), source };

        let text = self.to_json_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, text).map_err(io_err)?;
        info!("saved {} taals to {}", self.len(), path.display());
        Ok(())
    }
}
