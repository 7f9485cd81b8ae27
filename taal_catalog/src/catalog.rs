//! In-memory taal catalog.

use std::collections::BTreeMap;

use log::debug;

use crate::{CatalogError, Pattern, PatternCatalog, Taal};

/// System group used for the built-in taals.
pub const DEFAULT_SYSTEM: &str = "Hindustani";

/// System group for taals added at runtime.
pub const CUSTOM_SYSTEM: &str = "Custom";

// ════════════════════════════════════════════════════════════════════════════
// Built-in thekas
// ════════════════════════════════════════════════════════════════════════════

const BUILTIN: &[(&str, u32, &[&str])] = &[
    ("Teentaal", 16, &[
        "Dha", "Dhin", "Dhin", "Dha",
        "Dha", "Dhin", "Dhin", "Dha",
        "Dha", "Tin",  "Tin",  "Ta",
        "Ta",  "Dhin", "Dhin", "Dha",
    ]),
    ("Jhaptaal", 10, &[
        "Dhi", "Na",
        "Dhi", "Dhi", "Na",
        "Ti",  "Na",
        "Dhi", "Dhi", "Na",
    ]),
    ("Ektaal", 12, &[
        "Dhin", "Dhin", "DhaGe", "Tirakita",
        "Tu",   "Na",   "Kat",   "Ta",
        "DhaGe", "Tirakita", "Dhi", "Na",
    ]),
    ("Rupak", 7, &[
        "Tin", "Tin", "Na",
        "Dhi", "Na",
        "Dhi", "Na",
    ]),
    ("Keherwa", 8, &[
        "Dha", "Ge", "Na", "Ti",
        "Na",  "Ka", "Dhi", "Na",
    ]),
    ("Dadra", 6, &[
        "Dha", "Dhin", "Na",
        "Dha", "Tin",  "Na",
    ]),
];

// ════════════════════════════════════════════════════════════════════════════
// TaalCatalog
// ════════════════════════════════════════════════════════════════════════════

/// Name-keyed store of [`Taal`]s.
///
/// The catalog exclusively owns its entries; reads hand out shared
/// references or copies.
#[derive(Clone, Debug, Default)]
pub struct TaalCatalog {
    taals: BTreeMap<String, Taal>,
}

impl TaalCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog pre-loaded with the common Hindustani thekas.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for &(name, beats, bols) in BUILTIN {
            catalog.put(Taal::new(name, DEFAULT_SYSTEM, beats, bols.iter().copied()));
        }
        catalog
    }

    /// Borrow the taal called `name`.
    pub fn get(&self, name: &str) -> Option<&Taal> {
        self.taals.get(name)
    }

    pub fn len(&self) -> usize { self.taals.len() }
    pub fn is_empty(&self) -> bool { self.taals.is_empty() }

    /// Distinct system groups, sorted.
    pub fn systems(&self) -> Vec<&str> {
        let mut systems: Vec<&str> = self.taals.values().map(|t| t.system.as_str()).collect();
        systems.sort_unstable();
        systems.dedup();
        systems
    }

    /// Insert or replace without the duplicate check.  Used by the loader,
    /// where a later entry with the same name wins.
    pub(crate) fn put(&mut self, taal: Taal) {
        if let Some(old) = self.taals.insert(taal.name.clone(), taal) {
            debug!("replaced taal '{}' from system '{}'", old.name, old.system);
        }
    }
}

impl PatternCatalog for TaalCatalog {
    fn insert(&mut self, taal: Taal) -> Result<(), CatalogError> {
        if self.taals.contains_key(&taal.name) {
            return Err(CatalogError::AlreadyExists { name: taal.name });
        }
        debug!("adding taal '{}' ({} beats)", taal.name, taal.beats);
        self.taals.insert(taal.name.clone(), taal);
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<Taal, CatalogError> {
        self.taals
            .remove(name)
            .ok_or_else(|| CatalogError::NotFound { name: name.to_string() })
    }

    fn lookup(&self, name: &str) -> Result<Pattern, CatalogError> {
        self.taals
            .get(name)
            .map(Taal::pattern)
            .ok_or_else(|| CatalogError::NotFound { name: name.to_string() })
    }

    fn list(&self) -> Vec<&Taal> {
        self.taals.values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_beats() {
        let c = TaalCatalog::with_defaults();
        assert_eq!(c.len(), 6);
        for t in c.list() {
            assert_eq!(t.beats as usize, t.bols.len(), "{}", t.name);
        }
        assert_eq!(c.get("Teentaal").unwrap().beats, 16);
        assert_eq!(c.get("Rupak").unwrap().beats, 7);
    }

    #[test]
    fn insert_rejects_duplicate() {
        let mut c = TaalCatalog::with_defaults();
        let err = c.insert(Taal::from_bols("Dadra", ["Dha"])).unwrap_err();
        assert!(matches!(err, CatalogError::AlreadyExists { ref name } if name == "Dadra"));
        assert_eq!(c.get("Dadra").unwrap().beats, 6);
    }

    #[test]
    fn remove_then_lookup_fails() {
        let mut c = TaalCatalog::with_defaults();
        let removed = c.remove("Keherwa").unwrap();
        assert_eq!(removed.beats, 8);
        assert!(matches!(c.lookup("Keherwa"), Err(CatalogError::NotFound { .. })));
        assert!(matches!(c.remove("Keherwa"), Err(CatalogError::NotFound { .. })));
    }

    #[test]
    fn list_is_sorted_by_name() {
        let c = TaalCatalog::with_defaults();
        let names: Vec<&str> = c.list().iter().map(|t| t.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn systems_are_deduplicated() {
        let mut c = TaalCatalog::with_defaults();
        c.insert(Taal::from_bols("Mine", ["Dha", "Na"])).unwrap();
        assert_eq!(c.systems(), vec![CUSTOM_SYSTEM, DEFAULT_SYSTEM]);
    }

    #[test]
    fn put_replaces_existing() {
        let mut c = TaalCatalog::new();
        c.put(Taal::new("X", "A", 4, ["Dha"]));
        c.put(Taal::new("X", "B", 5, ["Na"]));
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("X").unwrap().system, "B");
    }
}
