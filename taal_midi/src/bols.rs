//! Bol → percussion key mapping.

use std::collections::HashMap;

use log::debug;

/// Key used for any bol the map does not know (middle C).
pub const DEFAULT_PITCH: u8 = 60;

/// General MIDI percussion keys for the common tabla bols.
pub const STANDARD_BOLS: &[(&str, u8)] = &[
    ("Dha",  36),
    ("Dhin", 38),
    ("Na",   40),
    ("Ti",   42),
    ("Ge",   44),
    ("Ka",   46),
    ("Ta",   48),
    ("Tom",  50),
    ("Nam",  52),
    ("Jo",   54),
    ("Nu",   56),
    ("Di",   58),
    ("Mi",   60),
];

// ════════════════════════════════════════════════════════════════════════════
// BolMap
// ════════════════════════════════════════════════════════════════════════════

/// Maps a bol to a MIDI key number (0–127).
///
/// Lookups never fail: a bol missing from the table resolves to the
/// map's default pitch.  The map is immutable once built and can be shared
/// freely between threads.
///
/// # Example
/// ```rust
/// use taal_midi::BolMap;
///
/// let map = BolMap::standard();
/// assert_eq!(map.note_for("Dha"), 36);
/// assert_eq!(map.note_for("Dhin"), 38);
/// assert_eq!(map.note_for("Xyz"), 60);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BolMap {
    table:         HashMap<String, u8>,
    default_pitch: u8,
}

impl Default for BolMap {
    fn default() -> Self {
        Self::standard()
    }
}

impl BolMap {
    /// The standard tabla table with fallback [`DEFAULT_PITCH`].
    pub fn standard() -> Self {
        Self::custom(STANDARD_BOLS.iter().copied(), DEFAULT_PITCH)
    }

    /// A map holding only `entries`.  Pitches above 127 are clamped.
    pub fn custom<I, S>(entries: I, default_pitch: u8) -> Self
    where
        I: IntoIterator<Item = (S, u8)>,
        S: Into<String>,
    {
        BolMap {
            table: entries
                .into_iter()
                .map(|(bol, pitch)| (bol.into(), pitch.min(127)))
                .collect(),
            default_pitch: default_pitch.min(127),
        }
    }

    /// Add or override one entry.
    pub fn with(mut self, bol: &str, pitch: u8) -> Self {
        self.table.insert(bol.to_string(), pitch.min(127));
        self
    }

    /// Change the fallback pitch.
    pub fn with_default_pitch(mut self, pitch: u8) -> Self {
        self.default_pitch = pitch.min(127);
        self
    }

    pub fn default_pitch(&self) -> u8 { self.default_pitch }

    /// Key for `bol` if the table has one.
    pub fn get(&self, bol: &str) -> Option<u8> {
        self.table.get(bol).copied()
    }

    /// Key for `bol`, falling back to the default pitch.
    pub fn note_for(&self, bol: &str) -> u8 {
        match self.get(bol) {
            Some(pitch) => pitch,
            None => {
                debug!("unknown bol '{}', using pitch {}", bol, self.default_pitch);
                self.default_pitch
            }
        }
    }

    pub fn len(&self) -> usize { self.table.len() }
    pub fn is_empty(&self) -> bool { self.table.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table() {
        let m = BolMap::standard();
        assert_eq!(m.len(), STANDARD_BOLS.len());
        assert_eq!(m.note_for("Dha"), 36);
        assert_eq!(m.note_for("Na"), 40);
        assert_eq!(m.note_for("Mi"), 60);
    }

    #[test]
    fn unknown_falls_back() {
        let m = BolMap::standard();
        assert_eq!(m.get("Xyz"), None);
        assert_eq!(m.note_for("Xyz"), DEFAULT_PITCH);
        // lookups are case-sensitive
        assert_eq!(m.note_for("dha"), DEFAULT_PITCH);
    }

    #[test]
    fn overrides_and_default() {
        let m = BolMap::standard().with("Tin", 41).with_default_pitch(37);
        assert_eq!(m.note_for("Tin"), 41);
        assert_eq!(m.note_for("Tirakita"), 37);
    }

    #[test]
    fn pitches_clamped_to_127() {
        let m = BolMap::custom([("Boom", 200u8)], 255);
        assert_eq!(m.note_for("Boom"), 127);
        assert_eq!(m.default_pitch(), 127);
    }
}
