//! MIDI variable-length quantities.
//!
//! Seven bits per byte, most-significant group first; every byte but the
//! last has bit 7 set.  `0` is the single byte `0x00`.

/// Largest value a MIDI delta-time may carry (four VLQ bytes).
pub const MAX_DELTA: u32 = 0x0FFF_FFFF;

/// Append `value` to `buf` as a VLQ.
pub fn write_vlq(buf: &mut Vec<u8>, mut value: u32) {
    // A u32 needs at most five 7-bit groups.
    let mut bytes = [0u8; 5];
    let mut i = bytes.len() - 1;
    bytes[i] = (value & 0x7F) as u8;
    value >>= 7;
    while value > 0 {
        i -= 1;
        bytes[i] = ((value & 0x7F) | 0x80) as u8;
        value >>= 7;
    }
    buf.extend_from_slice(&bytes[i..]);
}

/// Decode one VLQ from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed, or `None` if the
/// input ends mid-quantity or runs past five bytes.
pub fn read_vlq(bytes: &[u8]) -> Option<(u32, usize)> {
    let mut value: u32 = 0;
    for (i, &b) in bytes.iter().enumerate().take(5) {
        value = (value << 7) | (b & 0x7F) as u32;
        if b & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }
    None
}

/// Number of bytes `value` occupies once encoded.
pub fn vlq_len(value: u32) -> usize {
    let bits = 32 - value.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(v: u32) -> Vec<u8> {
        let mut b = Vec::new();
        write_vlq(&mut b, v);
        b
    }

    #[test]
    fn zero_is_single_byte() {
        assert_eq!(enc(0), [0x00]);
    }

    #[test]
    fn vlq_single_byte() {
        assert_eq!(enc(0x40), [0x40]);
        assert_eq!(enc(0x7F), [0x7F]);
    }

    #[test]
    fn vlq_two_bytes() {
        assert_eq!(enc(128), [0x81, 0x00]);
        assert_eq!(enc(480), [0x83, 0x60]);
        assert_eq!(enc(0x3FFF), [0xFF, 0x7F]);
    }

    #[test]
    fn vlq_reference_values() {
        // Values from the SMF 1.0 specification table.
        assert_eq!(enc(0x2000), [0xC0, 0x00]);
        assert_eq!(enc(0x4000), [0x81, 0x80, 0x00]);
        assert_eq!(enc(0x1F_FFFF), [0xFF, 0xFF, 0x7F]);
        assert_eq!(enc(0x20_0000), [0x81, 0x80, 0x80, 0x00]);
        assert_eq!(enc(MAX_DELTA), [0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn full_u32_takes_five_bytes() {
        assert_eq!(enc(u32::MAX), [0x8F, 0xFF, 0xFF, 0xFF, 0x7F]);
        assert_eq!(read_vlq(&enc(u32::MAX)), Some((u32::MAX, 5)));
    }

    #[test]
    fn continuation_bits() {
        for v in [0u32, 1, 127, 128, 480, 16_383, 16_384, 1 << 21, MAX_DELTA] {
            let b = enc(v);
            let (last, init) = b.split_last().unwrap();
            assert_eq!(last & 0x80, 0, "{v}");
            assert!(init.iter().all(|x| x & 0x80 != 0), "{v}");
            assert_eq!(b.len(), vlq_len(v), "{v}");
        }
    }

    #[test]
    fn decode_recovers_value() {
        let mut v = 0u32;
        while v <= MAX_DELTA {
            assert_eq!(read_vlq(&enc(v)), Some((v, vlq_len(v))));
            v = v * 3 + 1;
        }
    }

    #[test]
    fn decode_stops_at_first_terminal_byte() {
        assert_eq!(read_vlq(&[0x83, 0x60, 0x90, 0x24]), Some((480, 2)));
    }

    #[test]
    fn decode_truncated_is_none() {
        assert_eq!(read_vlq(&[0x81, 0x80]), None);
        assert_eq!(read_vlq(&[]), None);
    }
}
