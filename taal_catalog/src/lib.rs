//! # taal_catalog
//!
//! Named rhythmic cycles (*taals*) and the catalog that owns them.
//!
//! A [`Taal`] is a named, cyclic sequence of percussion syllables (*bols*)
//! with a fixed beat count.  The [`PatternCatalog`] trait is the single
//! interface through which callers insert, remove, look up and list taals;
//! [`TaalCatalog`] is the in-memory implementation, loadable from and
//! savable to a JSON document.
//!
//! ## Quick start
//!
//! ```rust
//! use taal_catalog::{PatternCatalog, Taal, TaalCatalog};
//!
//! let mut catalog = TaalCatalog::with_defaults();
//! catalog.insert(Taal::from_bols("Chautaal", ["Dha", "Dha", "Din", "Ta"])).unwrap();
//!
//! let keherwa = catalog.lookup("Keherwa").unwrap();
//! assert_eq!(keherwa.beats, 8);
//! ```

mod catalog;
mod error;
mod json;

pub use catalog::{TaalCatalog, DEFAULT_SYSTEM, CUSTOM_SYSTEM};
pub use error::CatalogError;

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Pattern — what the encoder consumes
// ════════════════════════════════════════════════════════════════════════════

/// One rhythmic cycle: an ordered bol sequence and the beat count it spans.
///
/// `bols.len()` is not required to equal `beats`; consumers use `beats` only
/// to derive per-note duration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub beats: u32,
    pub bols:  Vec<String>,
}

impl Pattern {
    pub fn new<I, S>(beats: u32, bols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Pattern { beats, bols: bols.into_iter().map(Into::into).collect() }
    }

    pub fn len(&self) -> usize { self.bols.len() }
    pub fn is_empty(&self) -> bool { self.bols.is_empty() }
}

// ════════════════════════════════════════════════════════════════════════════
// Taal — a named catalog entry
// ════════════════════════════════════════════════════════════════════════════

/// A named taal as stored in a catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Taal {
    pub name:   String,
    /// Grouping key in the JSON document ("Hindustani", "Custom", …).
    pub system: String,
    pub beats:  u32,
    pub bols:   Vec<String>,
}

impl Taal {
    pub fn new<I, S>(name: &str, system: &str, beats: u32, bols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Taal {
            name:   name.to_string(),
            system: system.to_string(),
            beats,
            bols:   bols.into_iter().map(Into::into).collect(),
        }
    }

    /// A custom taal whose beat count is the number of bols given.
    pub fn from_bols<I, S>(name: &str, bols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bols: Vec<String> = bols.into_iter().map(Into::into).collect();
        Taal {
            name:   name.to_string(),
            system: CUSTOM_SYSTEM.to_string(),
            beats:  bols.len() as u32,
            bols,
        }
    }

    /// Move the taal into a different system group.
    pub fn in_system(mut self, system: &str) -> Self {
        self.system = system.to_string();
        self
    }

    /// Copy out the part the encoder needs.
    pub fn pattern(&self) -> Pattern {
        Pattern { beats: self.beats, bols: self.bols.clone() }
    }
}

impl std::fmt::Display for Taal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} beats): {}", self.name, self.beats, self.bols.join(" "))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PatternCatalog — the one interface callers depend on
// ════════════════════════════════════════════════════════════════════════════

/// Insert / remove / lookup / list over named taals.
///
/// Implementations own their entries exclusively.  [`lookup`] hands out a
/// copy of the pattern so nothing outside the catalog can mutate it.
///
/// [`lookup`]: PatternCatalog::lookup
pub trait PatternCatalog {
    /// Add a taal.  Fails with [`CatalogError::AlreadyExists`] on a
    /// duplicate name.
    fn insert(&mut self, taal: Taal) -> Result<(), CatalogError>;

    /// Remove and return the taal called `name`.
    fn remove(&mut self, name: &str) -> Result<Taal, CatalogError>;

    /// Pattern for the taal called `name`.
    fn lookup(&self, name: &str) -> Result<Pattern, CatalogError>;

    /// All taals, ordered by name.
    fn list(&self) -> Vec<&Taal>;
}
