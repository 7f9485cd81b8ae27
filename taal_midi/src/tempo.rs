//! Tempo and the named laya presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::smf::{MAX_TEMPO_MICROS, MICROS_PER_MINUTE};

/// Slowest tempo whose quarter note still fits the 24-bit tempo field.
pub const MIN_BPM: u32 = MICROS_PER_MINUTE.div_ceil(MAX_TEMPO_MICROS);

/// Fastest tempo whose quarter note is still at least one microsecond.
pub const MAX_BPM: u32 = MICROS_PER_MINUTE;

/// Beats per minute.
///
/// The value is validated by the encoder, not here, so a `Tempo` of 0 can
/// be constructed and is reported as
/// [`EncodeError::InvalidTempo`](crate::EncodeError::InvalidTempo).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tempo {
    pub bpm: u32,
}

impl Tempo {
    pub fn new(bpm: u32) -> Self {
        Tempo { bpm }
    }

    /// `60_000_000 / bpm`, truncating.  `None` when the tempo cannot be
    /// written into a tempo meta-event.
    pub fn micros_per_quarter(self) -> Option<u32> {
        if !(MIN_BPM..=MAX_BPM).contains(&self.bpm) {
            return None;
        }
        Some(MICROS_PER_MINUTE / self.bpm)
    }
}

impl From<Laya> for Tempo {
    fn from(laya: Laya) -> Self {
        Tempo::new(laya.bpm())
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BPM", self.bpm)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Laya
// ════════════════════════════════════════════════════════════════════════════

/// Traditional tempo classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Laya {
    /// Slow.
    Vilambit,
    /// Medium.
    Madhya,
    /// Fast.
    Drut,
}

impl Laya {
    pub fn all() -> [Laya; 3] {
        [Laya::Vilambit, Laya::Madhya, Laya::Drut]
    }

    pub fn bpm(self) -> u32 {
        match self {
            Laya::Vilambit => 60,
            Laya::Madhya   => 90,
            Laya::Drut     => 120,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Laya::Vilambit => "Vilambit",
            Laya::Madhya   => "Madhya",
            Laya::Drut     => "Drut",
        }
    }
}

impl fmt::Display for Laya {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised laya name.
#[derive(Debug, thiserror::Error)]
#[error("unknown laya '{0}' (expected Vilambit, Madhya or Drut)")]
pub struct ParseLayaError(String);

impl FromStr for Laya {
    type Err = ParseLayaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vilambit" | "bilambit" => Ok(Laya::Vilambit),
            "madhya"                => Ok(Laya::Madhya),
            "drut"                  => Ok(Laya::Drut),
            _ => Err(ParseLayaError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micros_at_common_tempos() {
        assert_eq!(Tempo::new(60).micros_per_quarter(), Some(1_000_000));
        assert_eq!(Tempo::new(120).micros_per_quarter(), Some(500_000));
        // truncating division
        assert_eq!(Tempo::new(90).micros_per_quarter(), Some(666_666));
    }

    #[test]
    fn too_slow_or_zero_has_no_micros() {
        assert_eq!(MIN_BPM, 4);
        assert_eq!(Tempo::new(0).micros_per_quarter(), None);
        assert_eq!(Tempo::new(3).micros_per_quarter(), None);
        assert_eq!(Tempo::new(4).micros_per_quarter(), Some(15_000_000));
    }

    #[test]
    fn too_fast_has_no_micros() {
        assert_eq!(Tempo::new(MAX_BPM).micros_per_quarter(), Some(1));
        assert_eq!(Tempo::new(MAX_BPM + 1).micros_per_quarter(), None);
        assert_eq!(Tempo::new(100_000_000).micros_per_quarter(), None);
        assert_eq!(Tempo::new(u32::MAX).micros_per_quarter(), None);
    }

    #[test]
    fn laya_presets() {
        assert_eq!(Tempo::from(Laya::Vilambit).bpm, 60);
        assert_eq!(Tempo::from(Laya::Madhya).bpm, 90);
        assert_eq!(Tempo::from(Laya::Drut).bpm, 120);
    }

    #[test]
    fn laya_parsing() {
        assert_eq!("Bilambit".parse::<Laya>().unwrap(), Laya::Vilambit);
        assert_eq!(" DRUT ".parse::<Laya>().unwrap(), Laya::Drut);
        assert!("presto".parse::<Laya>().is_err());
        for l in Laya::all() {
            assert_eq!(l.name().parse::<Laya>().unwrap(), l);
        }
    }
}
