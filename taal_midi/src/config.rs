//! Encoder tunables.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "cycles": 8, "velocity": 100, "bol_pitches": { "Tin": 41 } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bols::{BolMap, DEFAULT_PITCH};
use crate::smf::PPQN;
use crate::EncodeError;

/// Where the file goes when the caller does not say.
pub const DEFAULT_OUTPUT: &str = "output/taal_track.mid";

/// Channel 10 in one-based numbering, the General MIDI percussion channel.
pub const PERCUSSION_CHANNEL: u8 = 9;

pub const DEFAULT_CYCLES:   u32 = 4;
pub const DEFAULT_VELOCITY: u8  = 80;

// ════════════════════════════════════════════════════════════════════════════
// DurationMode
// ════════════════════════════════════════════════════════════════════════════

/// How long each note lasts, in ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurationMode {
    /// One quarter note divided by the taal's beat count: `480 / beats`.
    #[default]
    CycleBeats,
    /// One quarter note scaled by the tempo relative to 60 BPM:
    /// `480 * 60 / bpm`, at least one tick.
    TempoScaled,
}

impl DurationMode {
    /// Note length in ticks.  Callers guarantee `beats > 0` and `bpm > 0`.
    pub fn ticks(self, beats: u32, bpm: u32) -> u32 {
        match self {
            DurationMode::CycleBeats  => PPQN as u32 / beats,
            DurationMode::TempoScaled => (PPQN as u32 * 60 / bpm).max(1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DurationMode::CycleBeats  => "cycle-beats",
            DurationMode::TempoScaled => "tempo-scaled",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// EncoderConfig
// ════════════════════════════════════════════════════════════════════════════

/// Everything the encoder can be told, with the stock defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    /// Destination used by [`SmfEncoder::encode_to_default_path`].
    ///
    /// [`SmfEncoder::encode_to_default_path`]: crate::SmfEncoder::encode_to_default_path
    pub output:        PathBuf,
    /// Zero-based MIDI channel (0–15).
    pub channel:       u8,
    /// Program Change sent before the notes; `None` sends none.
    pub program:       Option<u8>,
    /// Key for bols missing from the pitch table.
    pub default_pitch: u8,
    /// Full passes through the pattern.
    pub cycles:        u32,
    /// Velocity for both note-on and note-off.
    pub velocity:      u8,
    pub duration_mode: DurationMode,
    /// Additions to, or overrides of, the standard bol table.
    pub bol_pitches:   BTreeMap<String, u8>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            output:        PathBuf::from(DEFAULT_OUTPUT),
            channel:       PERCUSSION_CHANNEL,
            program:       Some(0),
            default_pitch: DEFAULT_PITCH,
            cycles:        DEFAULT_CYCLES,
            velocity:      DEFAULT_VELOCITY,
            duration_mode: DurationMode::CycleBeats,
            bol_pitches:   BTreeMap::new(),
        }
    }
}

impl EncoderConfig {
    /// Parse a JSON config; absent keys keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, EncodeError> {
        let config: EncoderConfig = serde_json::from_str(text)
            .map_err(|e| EncodeError::InvalidConfig { reason: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EncodeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| EncodeError::InvalidConfig {
            reason: format!("{}: {}", path.display(), e),
        })?;
        Self::from_json_str(&text)
    }

    /// Reject values that do not fit their MIDI fields.
    pub fn validate(&self) -> Result<(), EncodeError> {
        let invalid = |reason: String| Err(EncodeError::InvalidConfig { reason });

        if self.channel > 15 {
            return invalid(format!("channel {} is outside 0-15", self.channel));
        }
        if let Some(p) = self.program.filter(|&p| p > 127) {
            return invalid(format!("program {} is outside 0-127", p));
        }
        if self.velocity > 127 {
            return invalid(format!("velocity {} is outside 0-127", self.velocity));
        }
        if self.default_pitch > 127 {
            return invalid(format!("default pitch {} is outside 0-127", self.default_pitch));
        }
        if let Some((bol, p)) = self.bol_pitches.iter().find(|(_, p)| **p > 127) {
            return invalid(format!("pitch {} for bol '{}' is outside 0-127", p, bol));
        }
        Ok(())
    }

    /// The standard bol table with this config's overrides applied.
    pub fn bol_map(&self) -> BolMap {
        self.bol_pitches
            .iter()
            .fold(BolMap::standard(), |map, (bol, &pitch)| map.with(bol, pitch))
            .with_default_pitch(self.default_pitch)
    }
}
