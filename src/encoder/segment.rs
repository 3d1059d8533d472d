//! Segment modes and optimal segmentation of a payload.

use crate::encoder::bitstream::BitBuffer;
use crate::error::{EncodeError, Result};
use crate::models::Version;

/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
pub(crate) const ALPHANUMERIC_CHARSET: &[u8; 45] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Encoding mode of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Digits, 3 per 10 bits (mode 0001)
    Numeric,
    /// [`ALPHANUMERIC_CHARSET`], 2 per 11 bits (mode 0010)
    Alphanumeric,
    /// Arbitrary bytes, 8 bits each (mode 0100)
    Byte,
    /// Extended Channel Interpretation designator (mode 0111)
    Eci(u32),
}

impl Mode {
    /// 4-bit mode indicator
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
            Mode::Eci(_) => 0b0111,
        }
    }

    /// Width of the character count field at `version`
    pub fn char_count_bits(&self, version: Version) -> usize {
        let group = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][group],
            Mode::Alphanumeric => [9, 11, 13][group],
            Mode::Byte => [8, 16, 16][group],
            Mode::Eci(_) => 0,
        }
    }
}

/// Whether `byte` is in the alphanumeric character set
pub fn is_alphanumeric(byte: u8) -> bool {
    alphanumeric_value(byte).is_some()
}

pub(crate) fn alphanumeric_value(byte: u8) -> Option<u32> {
    ALPHANUMERIC_CHARSET
        .iter()
        .position(|&c| c == byte)
        .map(|i| i as u32)
}

/// A run of payload bytes encoded in one mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    data: Vec<u8>,
}

impl Segment {
    /// Numeric segment; fails on anything but ASCII digits
    pub fn make_numeric(digits: &[u8]) -> Result<Self> {
        if let Some(&bad) = digits.iter().find(|b| !b.is_ascii_digit()) {
            return Err(EncodeError::UnsupportedCharacter {
                mode: Mode::Numeric,
                byte: bad,
            });
        }
        Ok(Self {
            mode: Mode::Numeric,
            data: digits.to_vec(),
        })
    }

    /// Alphanumeric segment; fails on bytes outside the character set
    pub fn make_alphanumeric(text: &[u8]) -> Result<Self> {
        if let Some(&bad) = text.iter().find(|&&b| !is_alphanumeric(b)) {
            return Err(EncodeError::UnsupportedCharacter {
                mode: Mode::Alphanumeric,
                byte: bad,
            });
        }
        Ok(Self {
            mode: Mode::Alphanumeric,
            data: text.to_vec(),
        })
    }

    /// Byte segment holding `data` as is
    pub fn make_bytes(data: &[u8]) -> Self {
        Self {
            mode: Mode::Byte,
            data: data.to_vec(),
        }
    }

    /// ECI designator; assignment numbers above 999999 are rejected
    pub fn make_eci(assignment: u32) -> Result<Self> {
        if assignment >= 1_000_000 {
            return Err(EncodeError::InvalidVersionOrLevel(format!(
                "ECI assignment {} is outside 0..=999999",
                assignment
            )));
        }
        Ok(Self {
            mode: Mode::Eci(assignment),
            data: Vec::new(),
        })
    }

    /// Segment mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Payload bytes covered by this segment (empty for ECI)
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bits of the encoded data part, excluding mode and count fields
    pub fn data_bits(&self) -> usize {
        let n = self.data.len();
        match self.mode {
            Mode::Numeric => 10 * (n / 3) + [0, 4, 7][n % 3],
            Mode::Alphanumeric => 11 * (n / 2) + 6 * (n % 2),
            Mode::Byte => 8 * n,
            Mode::Eci(a) if a < 1 << 7 => 8,
            Mode::Eci(a) if a < 1 << 14 => 16,
            Mode::Eci(_) => 24,
        }
    }

    /// Total bits at `version`, or `None` if the count field overflows
    pub fn total_bits(&self, version: Version) -> Option<usize> {
        let ccbits = self.mode.char_count_bits(version);
        if ccbits > 0 && self.data.len() >= 1 << ccbits {
            return None;
        }
        Some(4 + ccbits + self.data_bits())
    }

    /// Append mode indicator, count and data bits
    pub(crate) fn write_to(&self, bb: &mut BitBuffer, version: Version) {
        bb.append_bits(self.mode.indicator(), 4);
        match self.mode {
            Mode::Eci(a) => {
                if a < 1 << 7 {
                    bb.append_bits(a, 8);
                } else if a < 1 << 14 {
                    bb.append_bits(0b10, 2);
                    bb.append_bits(a, 14);
                } else {
                    bb.append_bits(0b110, 3);
                    bb.append_bits(a, 21);
                }
                return;
            }
            _ => bb.append_bits(self.data.len() as u32, self.mode.char_count_bits(version)),
        }
        match self.mode {
            Mode::Numeric => {
                for chunk in self.data.chunks(3) {
                    let value = chunk
                        .iter()
                        .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
                    bb.append_bits(value, chunk.len() * 3 + 1);
                }
            }
            Mode::Alphanumeric => {
                for chunk in self.data.chunks(2) {
                    let values: Vec<u32> =
                        chunk.iter().filter_map(|&c| alphanumeric_value(c)).collect();
                    if values.len() == 2 {
                        bb.append_bits(values[0] * 45 + values[1], 11);
                    } else {
                        bb.append_bits(values[0], 6);
                    }
                }
            }
            Mode::Byte => {
                for &b in &self.data {
                    bb.append_bits(u32::from(b), 8);
                }
            }
            Mode::Eci(_) => {}
        }
    }
}

/// Sum of segment bits at `version`; `None` if any count field overflows
pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
    segments
        .iter()
        .try_fold(0usize, |acc, s| Some(acc + s.total_bits(version)?))
}

const MODES: [Mode; 3] = [Mode::Byte, Mode::Alphanumeric, Mode::Numeric];

/// Split `payload` into segments with minimal total bit length at `version`.
///
/// Dynamic programming over break points; costs are kept in sixths of a bit
/// so alphanumeric (5.5 bits/char) and numeric (3.33 bits/digit) stay integral.
pub fn optimal_segments(payload: &[u8], version: Version) -> Vec<Segment> {
    if payload.is_empty() {
        return Vec::new();
    }
    let head_costs: [u64; 3] =
        MODES.map(|m| ((4 + m.char_count_bits(version)) * 6) as u64);

    // char_modes[i][j]: mode of byte i on the cheapest path ending in state j
    let mut char_modes: Vec<[Option<usize>; 3]> = vec![[None; 3]; payload.len()];
    let mut prev_costs = head_costs;

    for (i, &c) in payload.iter().enumerate() {
        let mut cur_costs = [u64::MAX; 3];
        cur_costs[0] = prev_costs[0] + 48;
        char_modes[i][0] = Some(0);
        if is_alphanumeric(c) {
            cur_costs[1] = prev_costs[1] + 33;
            char_modes[i][1] = Some(1);
        }
        if c.is_ascii_digit() {
            cur_costs[2] = prev_costs[2] + 20;
            char_modes[i][2] = Some(2);
        }

        // Switching after byte i: round up to a whole bit, then pay the new header
        for to in 0..3 {
            for from in 0..3 {
                if char_modes[i][from].is_none() {
                    continue;
                }
                let new_cost = cur_costs[from].div_ceil(6) * 6 + head_costs[to];
                if char_modes[i][to].is_none() || new_cost < cur_costs[to] {
                    cur_costs[to] = new_cost;
                    char_modes[i][to] = char_modes[i][from];
                }
            }
        }
        prev_costs = cur_costs;
    }

    let mut state = 0;
    for j in 1..3 {
        if prev_costs[j] < prev_costs[state] {
            state = j;
        }
    }

    let mut modes_per_byte = vec![0usize; payload.len()];
    for i in (0..payload.len()).rev() {
        // Always Some: byte mode is reachable from every state
        state = char_modes[i][state].unwrap_or(0);
        modes_per_byte[i] = state;
    }

    let mut segments = Vec::new();
    let mut start = 0;
    for i in 1..=payload.len() {
        if i == payload.len() || modes_per_byte[i] != modes_per_byte[start] {
            segments.push(Segment {
                mode: MODES[modes_per_byte[start]],
                data: payload[start..i].to_vec(),
            });
            start = i;
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_char_count_bits() {
        assert_eq!(Mode::Numeric.char_count_bits(v(9)), 10);
        assert_eq!(Mode::Numeric.char_count_bits(v(10)), 12);
        assert_eq!(Mode::Alphanumeric.char_count_bits(v(27)), 13);
        assert_eq!(Mode::Byte.char_count_bits(v(26)), 16);
        assert_eq!(Mode::Eci(26).char_count_bits(v(40)), 0);
    }

    #[test]
    fn test_segment_bit_lengths() {
        assert_eq!(Segment::make_numeric(b"01234567").unwrap().data_bits(), 27);
        assert_eq!(Segment::make_alphanumeric(b"AC-42").unwrap().data_bits(), 28);
        assert_eq!(Segment::make_bytes(b"abc").data_bits(), 24);
        assert_eq!(Segment::make_eci(26).unwrap().total_bits(v(1)), Some(12));
        assert_eq!(Segment::make_eci(1000).unwrap().data_bits(), 16);
        assert_eq!(Segment::make_eci(100_000).unwrap().data_bits(), 24);
    }

    #[test]
    fn test_unsupported_characters() {
        assert_eq!(
            Segment::make_numeric(b"12a"),
            Err(EncodeError::UnsupportedCharacter {
                mode: Mode::Numeric,
                byte: b'a'
            })
        );
        assert!(Segment::make_alphanumeric(b"hello").is_err());
        assert!(Segment::make_eci(1_000_000).is_err());
    }

    #[test]
    fn test_count_overflow() {
        let seg = Segment::make_bytes(&[0u8; 256]);
        assert_eq!(seg.total_bits(v(9)), None);
        assert_eq!(seg.total_bits(v(10)), Some(4 + 16 + 2048));
    }

    #[test]
    fn test_optimal_single_mode() {
        let segs = optimal_segments(b"0123456789", v(1));
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].mode(), Mode::Numeric);

        let segs = optimal_segments(b"HELLO WORLD", v(1));
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].mode(), Mode::Alphanumeric);

        let segs = optimal_segments(b"hello", v(1));
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].mode(), Mode::Byte);
    }

    #[test]
    fn test_optimal_mixed_payload() {
        let payload = b"abc0123456789012345678901234567890";
        let segs = optimal_segments(payload, v(1));
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].mode(), Mode::Byte);
        assert_eq!(segs[0].data(), b"abc");
        assert_eq!(segs[1].mode(), Mode::Numeric);

        let joined: Vec<u8> = segs.iter().flat_map(|s| s.data().to_vec()).collect();
        assert_eq!(joined, payload.to_vec());
        let single = Segment::make_bytes(payload).total_bits(v(1)).unwrap();
        assert!(total_bits(&segs, v(1)).unwrap() < single);
    }

    #[test]
    fn test_short_digit_run_stays_in_byte_mode() {
        let segs = optimal_segments(b"ab12cd", v(1));
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].mode(), Mode::Byte);
    }

    #[test]
    fn test_segment_write_numeric() {
        let mut bb = BitBuffer::new();
        Segment::make_numeric(b"01234567").unwrap().write_to(&mut bb, v(1));
        // 0001 0000001000 0000001100 0101011001 1000011
        assert_eq!(bb.len(), 4 + 10 + 27);
        assert_eq!(bb.to_bytes()[..5], [0x10, 0x20, 0x0C, 0x56, 0x61]);
    }
}
