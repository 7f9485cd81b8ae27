//! The taal → Standard MIDI File encoder.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use taal_catalog::{Pattern, PatternCatalog};
use tempfile::NamedTempFile;

use crate::bols::BolMap;
use crate::config::{DurationMode, EncoderConfig};
use crate::kit::DrumKit;
use crate::smf::TrackBuffer;
use crate::vlq::vlq_len;
use crate::{EncodeError, Tempo};

// ════════════════════════════════════════════════════════════════════════════
// SmfEncoder
// ════════════════════════════════════════════════════════════════════════════

/// Serialises one pattern at one tempo into a format-0 MIDI file.
///
/// The encoder holds only immutable configuration, so one instance can be
/// shared across threads and reused for any number of calls.  Each call
/// validates its inputs, builds the whole file in memory, and only then
/// touches the sink.
///
/// # Builder pattern
///
/// ```rust,no_run
/// use taal_midi::{DrumKit, Laya, Pattern, SmfEncoder};
///
/// let dadra = Pattern::new(6, ["Dha", "Dhin", "Na", "Dha", "Tin", "Na"]);
///
/// SmfEncoder::new()
///     .kit(DrumKit::Jazz)
///     .cycles(8)
///     .velocity(96)
///     .encode_to_path(&dadra, Laya::Madhya.into(), "dadra.mid")
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct SmfEncoder {
    config: EncoderConfig,
    bols:   BolMap,
}

impl Default for SmfEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SmfEncoder {
    /// Encoder with the stock settings: channel 10, Standard kit, 4 cycles,
    /// velocity 80, fallback pitch 60, `480 / beats` durations.
    pub fn new() -> Self {
        let config = EncoderConfig::default();
        let bols = config.bol_map();
        SmfEncoder { config, bols }
    }

    /// Encoder from an explicit configuration.
    pub fn from_config(config: EncoderConfig) -> Result<Self, EncodeError> {
        config.validate()?;
        let bols = config.bol_map();
        Ok(SmfEncoder { config, bols })
    }

    pub fn config(&self) -> &EncoderConfig { &self.config }
    pub fn bols(&self) -> &BolMap { &self.bols }

    // ── setters (builder pattern) ─────────────────────────────────────────

    /// Set the MIDI channel (0–15).
    pub fn channel(mut self, ch: u8) -> Self {
        self.config.channel = ch.min(15);
        self
    }

    /// Send a Program Change with this raw program number (0–127).
    pub fn program(mut self, program: u8) -> Self {
        self.config.program = Some(program.min(127));
        self
    }

    /// Select a drum kit by name.
    pub fn kit(self, kit: DrumKit) -> Self {
        self.program(kit.program())
    }

    /// Omit the Program Change event.
    pub fn no_program(mut self) -> Self {
        self.config.program = None;
        self
    }

    /// Number of full passes through the pattern.
    pub fn cycles(mut self, n: u32) -> Self {
        self.config.cycles = n;
        self
    }

    /// Note velocity (0–127).
    pub fn velocity(mut self, v: u8) -> Self {
        self.config.velocity = v.min(127);
        self
    }

    /// Key for bols the pitch table does not know.
    pub fn default_pitch(mut self, pitch: u8) -> Self {
        self.bols = self.bols.with_default_pitch(pitch);
        self.config.default_pitch = self.bols.default_pitch();
        self
    }

    pub fn duration_mode(mut self, mode: DurationMode) -> Self {
        self.config.duration_mode = mode;
        self
    }

    /// Destination for [`encode_to_default_path`](Self::encode_to_default_path).
    pub fn output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.output = path.into();
        self
    }

    /// Replace the whole pitch table.
    pub fn bol_map(mut self, map: BolMap) -> Self {
        self.config.default_pitch = map.default_pitch();
        self.bols = map;
        self
    }

    // ── encoding ──────────────────────────────────────────────────────────

    /// Build the complete file in memory.
    ///
    /// Track layout: tempo, optional program change, then for each of
    /// `cycles` passes a note-on/note-off pair per bol, then end-of-track.
    pub fn to_bytes(&self, pattern: &Pattern, tempo: Tempo) -> Result<Vec<u8>, EncodeError> {
        let micros = tempo
            .micros_per_quarter()
            .ok_or(EncodeError::InvalidTempo { bpm: tempo.bpm })?;
        if pattern.beats == 0 {
            return Err(EncodeError::InvalidPattern { beats: pattern.beats });
        }

        let cfg      = &self.config;
        let ch       = cfg.channel;
        let vel      = cfg.velocity;
        let duration = cfg.duration_mode.ticks(pattern.beats, tempo.bpm);
        let keys: Vec<u8> = pattern.bols.iter().map(|b| self.bols.note_for(b)).collect();

        debug!(
            "encoding {} bols x {} cycles at {} ({} ticks/note, {})",
            keys.len(), cfg.cycles, tempo, duration, cfg.duration_mode.name()
        );

        let notes = track_notes(&keys, cfg.cycles, duration, cfg.program.is_some())?;
        let mut track = TrackBuffer::with_note_capacity(notes);
        track.tempo(0, micros);
        if let Some(program) = cfg.program {
            track.program_change(0, ch, program);
        }
        for _ in 0..cfg.cycles {
            for &key in &keys {
                track.note_on(0, ch, key, vel);
                track.note_off(duration, ch, key, vel);
            }
        }
        track.end_of_track(0);

        track.into_file_bytes()
    }

    /// Encode into any byte sink.  The sink is written once and flushed;
    /// on a validation error nothing is written.
    pub fn encode<W: Write + ?Sized>(
        &self,
        pattern: &Pattern,
        tempo:   Tempo,
        sink:    &mut W,
    ) -> Result<(), EncodeError> {
        let bytes = self.to_bytes(pattern, tempo)?;
        sink.write_all(&bytes)
            .and_then(|()| sink.flush())
            .map_err(|source| EncodeError::SinkUnavailable { sink: "stream".to_string(), source })
    }

    /// Encode into a file at `path`.
    ///
    /// The bytes go to a scratch file in the destination directory which is
    /// renamed over `path` once complete, so `path` never holds a partial
    /// file.  Missing parent directories are created.
    pub fn encode_to_path<P: AsRef<Path>>(
        &self,
        pattern: &Pattern,
        tempo:   Tempo,
        path:    P,
    ) -> Result<(), EncodeError> {
        let path  = path.as_ref();
        let bytes = self.to_bytes(pattern, tempo)?;

        let unavailable = |source: std::io::Error| EncodeError::SinkUnavailable {
            sink: path.display().to_string(),
            source,
        };

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(unavailable)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(unavailable)?;
        tmp.write_all(&bytes).map_err(unavailable)?;
        tmp.flush().map_err(unavailable)?;
        #[cfg(unix)]
        {
            // Scratch files are created 0600.
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))
                .map_err(unavailable)?;
        }
        tmp.persist(path).map_err(|e| unavailable(e.error))?;

        debug!("wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    /// Encode to the configured output path.
    pub fn encode_to_default_path(&self, pattern: &Pattern, tempo: Tempo) -> Result<(), EncodeError> {
        self.encode_to_path(pattern, tempo, &self.config.output)
    }

    /// Look `name` up in `catalog` and encode it to `path`.
    pub fn encode_named<C, P>(
        &self,
        catalog: &C,
        name:    &str,
        tempo:   Tempo,
        path:    P,
    ) -> Result<(), EncodeError>
    where
        C: PatternCatalog + ?Sized,
        P: AsRef<Path>,
    {
        let pattern = catalog.lookup(name)?;
        self.encode_to_path(&pattern, tempo, path)
    }
}

/// Number of note pairs in the track, after checking that the whole body
/// fits the 32-bit chunk length.
fn track_notes(
    keys:     &[u8],
    cycles:   u32,
    duration: u32,
    program:  bool,
) -> Result<usize, EncodeError> {
    // tempo 7, program change 3, end-of-track 4
    let fixed: u64 = 7 + (if program { 3 } else { 0 }) + 4;
    let per_pair = (4 + 3 + vlq_len(duration)) as u64;
    let pairs = (keys.len() as u64).checked_mul(u64::from(cycles));
    let body = pairs
        .and_then(|n| n.checked_mul(per_pair))
        .and_then(|n| n.checked_add(fixed));
    match (pairs, body) {
        (Some(pairs), Some(body)) if body <= u64::from(u32::MAX) => {
            usize::try_from(pairs).map_err(|_| too_long(keys.len(), cycles))
        }
        _ => Err(too_long(keys.len(), cycles)),
    }
}

fn too_long(bols: usize, cycles: u32) -> EncodeError {
    EncodeError::InvalidConfig {
        reason: format!("{} bols x {} cycles does not fit in one MIDI track", bols, cycles),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
