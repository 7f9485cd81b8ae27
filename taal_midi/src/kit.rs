//! Drum-kit program numbers for the percussion channel.

use std::fmt;
use std::str::FromStr;

/// General MIDI 2 drum kits, selected by a Program Change on channel 10.
///
/// Use [`DrumKit::program`] to get the raw `u8` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DrumKit {
    Standard   = 0,
    Room       = 8,
    Power      = 16,
    Electronic = 24,
    Analog     = 25,
    Jazz       = 32,
    Brush      = 40,
    Orchestra  = 48,
    Sfx        = 56,
}

impl DrumKit {
    pub const ALL: [DrumKit; 9] = [
        DrumKit::Standard,
        DrumKit::Room,
        DrumKit::Power,
        DrumKit::Electronic,
        DrumKit::Analog,
        DrumKit::Jazz,
        DrumKit::Brush,
        DrumKit::Orchestra,
        DrumKit::Sfx,
    ];

    /// Raw MIDI program number.
    pub fn program(self) -> u8 { self as u8 }

    pub fn name(self) -> &'static str {
        match self {
            DrumKit::Standard   => "Standard",
            DrumKit::Room       => "Room",
            DrumKit::Power      => "Power",
            DrumKit::Electronic => "Electronic",
            DrumKit::Analog     => "Analog",
            DrumKit::Jazz       => "Jazz",
            DrumKit::Brush      => "Brush",
            DrumKit::Orchestra  => "Orchestra",
            DrumKit::Sfx        => "SFX",
        }
    }

    /// The kit a raw program number selects, if it names one.
    pub fn from_program(program: u8) -> Option<DrumKit> {
        Self::ALL.into_iter().find(|k| k.program() == program)
    }
}

impl fmt::Display for DrumKit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.program())
    }
}

/// Unrecognised kit name.
#[derive(Debug, thiserror::Error)]
#[error("unknown drum kit '{0}'")]
pub struct ParseKitError(String);

impl FromStr for DrumKit {
    type Err = ParseKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseKitError(s.to_string()))
    }
}
