//! Standard MIDI File framing and the track event buffer.
//!
//! Everything here writes big-endian explicitly via `to_be_bytes`; no host
//! integer is ever copied into the stream as raw memory.

use crate::vlq::write_vlq;
use crate::EncodeError;

/// Pulses per quarter note written into every header.
pub const PPQN: u16 = 480;

/// Microseconds per minute, the numerator of the tempo meta-event.
pub const MICROS_PER_MINUTE: u32 = 60_000_000;

/// Largest value the 3-byte tempo meta-event can hold.
pub const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;

pub const HEADER_TAG: &[u8; 4] = b"MThd";
pub const TRACK_TAG:  &[u8; 4] = b"MTrk";

// ── status bytes ──────────────────────────────────────────────────────────
const NOTE_OFF:       u8 = 0x80;
const NOTE_ON:        u8 = 0x90;
const PROGRAM_CHANGE: u8 = 0xC0;
const META:           u8 = 0xFF;
const META_TEMPO:     u8 = 0x51;
const META_EOT:       u8 = 0x2F;

// ════════════════════════════════════════════════════════════════════════════
// Header chunk
// ════════════════════════════════════════════════════════════════════════════

/// The 14-byte `MThd` chunk for a format-0, single-track file.
pub fn header_chunk() -> [u8; 14] {
    let mut h = [0u8; 14];
    h[0..4].copy_from_slice(HEADER_TAG);
    h[4..8].copy_from_slice(&6u32.to_be_bytes());
    h[8..10].copy_from_slice(&0u16.to_be_bytes());  // format 0
    h[10..12].copy_from_slice(&1u16.to_be_bytes()); // 1 track
    h[12..14].copy_from_slice(&PPQN.to_be_bytes());
    h
}

// ════════════════════════════════════════════════════════════════════════════
// TrackBuffer — append-only event body of one MTrk chunk
// ════════════════════════════════════════════════════════════════════════════

/// Accumulates the body of a track chunk event by event.
///
/// Every event is preceded by its delta-time as a VLQ.  The buffer is only
/// framed ([`TrackBuffer::into_file_bytes`]) once the body is complete, so
/// the chunk length is known before anything is written out.
#[derive(Debug, Default)]
pub struct TrackBuffer {
    body: Vec<u8>,
}

impl TrackBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for `notes` note-on/off pairs plus the fixed events.
    pub fn with_note_capacity(notes: usize) -> Self {
        // tempo 7 + program 3 + eot 4, and at most 4 + 6 bytes per pair
        TrackBuffer { body: Vec::with_capacity(notes.saturating_mul(10).saturating_add(14)) }
    }

    /// `FF 51 03 tt tt tt` — microseconds per quarter note.
    pub fn tempo(&mut self, delta: u32, micros_per_quarter: u32) {
        debug_assert!(micros_per_quarter <= MAX_TEMPO_MICROS);
        write_vlq(&mut self.body, delta);
        self.body.extend_from_slice(&[META, META_TEMPO, 0x03]);
        self.body.extend_from_slice(&micros_per_quarter.to_be_bytes()[1..]);
    }

    /// `Cn pp`
    pub fn program_change(&mut self, delta: u32, channel: u8, program: u8) {
        write_vlq(&mut self.body, delta);
        self.body.push(PROGRAM_CHANGE | (channel & 0x0F));
        self.body.push(program & 0x7F);
    }

    /// `9n kk vv`
    pub fn note_on(&mut self, delta: u32, channel: u8, key: u8, velocity: u8) {
        self.channel_event(delta, NOTE_ON, channel, key, velocity);
    }

    /// `8n kk vv`
    pub fn note_off(&mut self, delta: u32, channel: u8, key: u8, velocity: u8) {
        self.channel_event(delta, NOTE_OFF, channel, key, velocity);
    }

    /// `FF 2F 00`
    pub fn end_of_track(&mut self, delta: u32) {
        write_vlq(&mut self.body, delta);
        self.body.extend_from_slice(&[META, META_EOT, 0x00]);
    }

    fn channel_event(&mut self, delta: u32, status: u8, channel: u8, key: u8, velocity: u8) {
        write_vlq(&mut self.body, delta);
        self.body.push(status | (channel & 0x0F));
        self.body.push(key & 0x7F);
        self.body.push(velocity & 0x7F);
    }

    pub fn len(&self) -> usize { self.body.len() }
    pub fn is_empty(&self) -> bool { self.body.is_empty() }
    pub fn as_bytes(&self) -> &[u8] { &self.body }

    /// Frame the body as `MTrk <len> <body>`.  Fails when the body is too
    /// long for the 32-bit chunk length.
    pub fn track_chunk(&self) -> Result<Vec<u8>, EncodeError> {
        let len = u32::try_from(self.body.len()).map_err(|_| EncodeError::InvalidConfig {
            reason: format!("track body of {} bytes exceeds the chunk length field", self.body.len()),
        })?;
        let mut chunk = Vec::with_capacity(8 + self.body.len());
        chunk.extend_from_slice(TRACK_TAG);
        chunk.extend_from_slice(&len.to_be_bytes());
        chunk.extend_from_slice(&self.body);
        Ok(chunk)
    }

    /// Complete format-0 file: header chunk followed by this track.
    pub fn into_file_bytes(self) -> Result<Vec<u8>, EncodeError> {
        let chunk = self.track_chunk()?;
        let mut out = Vec::with_capacity(14 + chunk.len());
        out.extend_from_slice(&header_chunk());
        out.extend_from_slice(&chunk);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_bytes_exact() {
        assert_eq!(
            header_chunk(),
            [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0]
        );
    }

    #[test]
    fn tempo_event_layout() {
        let mut t = TrackBuffer::new();
        t.tempo(0, 500_000); // 120 BPM
        assert_eq!(t.as_bytes(), [0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]);
    }

    #[test]
    fn program_change_masks_channel() {
        let mut t = TrackBuffer::new();
        t.program_change(0, 9, 0);
        assert_eq!(t.as_bytes(), [0x00, 0xC9, 0x00]);
    }

    #[test]
    fn note_pair_layout() {
        let mut t = TrackBuffer::new();
        t.note_on(0, 9, 36, 80);
        t.note_off(60, 9, 36, 80);
        assert_eq!(t.as_bytes(), [0x00, 0x99, 36, 80, 60, 0x89, 36, 80]);
    }

    #[test]
    fn long_delta_uses_vlq() {
        let mut t = TrackBuffer::new();
        t.note_off(480, 0, 60, 0);
        assert_eq!(t.as_bytes(), [0x83, 0x60, 0x80, 60, 0]);
    }

    #[test]
    fn end_of_track_layout() {
        let mut t = TrackBuffer::new();
        t.end_of_track(0);
        assert_eq!(t.as_bytes(), [0x00, 0xFF, 0x2F, 0x00]);
    }

    #[test]
    fn track_chunk_length_matches_body() {
        let mut t = TrackBuffer::new();
        t.tempo(0, 1_000_000);
        t.end_of_track(0);
        let chunk = t.track_chunk().unwrap();
        assert_eq!(&chunk[0..4], b"MTrk");
        assert_eq!(u32::from_be_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]), 11);
        assert_eq!(chunk.len(), 8 + 11);
    }

    #[test]
    fn file_bytes_are_header_plus_chunk() {
        let mut t = TrackBuffer::new();
        t.end_of_track(0);
        let chunk = t.track_chunk().unwrap();
        let file = t.into_file_bytes().unwrap();
        assert_eq!(&file[..14], &header_chunk());
        assert_eq!(&file[14..], &chunk[..]);
    }
}
