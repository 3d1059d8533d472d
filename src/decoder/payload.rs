use crate::decoder::modes::{
    alphanumeric::AlphanumericDecoder, byte::ByteDecoder, numeric::NumericDecoder,
};
use crate::encoder::segment::Mode;
use crate::error::DecodeError;
use crate::models::Version;

/// Segments parsed out of the corrected data codewords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPayload {
    /// Concatenated segment bytes
    pub bytes: Vec<u8>,
    /// Modes in stream order, ECI designators included
    pub modes: Vec<Mode>,
    /// First ECI assignment seen, if any
    pub eci: Option<u32>,
}

/// Parse segments until the terminator or until fewer than four bits remain
pub fn parse(data_codewords: &[u8], version: Version) -> Result<ParsedPayload, DecodeError> {
    let bits: Vec<bool> = data_codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 != 0))
        .collect();
    let mut reader = BitReader::new(&bits);
    let mut parsed = ParsedPayload::default();

    while reader.remaining() >= 4 {
        let indicator = reader.read_bits(4)?;
        let mode = match indicator {
            0 => break,
            0b0001 => Mode::Numeric,
            0b0010 => Mode::Alphanumeric,
            0b0100 => Mode::Byte,
            0b0111 => {
                let assignment = read_eci(&mut reader)?;
                parsed.eci.get_or_insert(assignment);
                parsed.modes.push(Mode::Eci(assignment));
                continue;
            }
            other => {
                return Err(DecodeError::Payload(format!(
                    "unsupported mode indicator {:04b}",
                    other
                )));
            }
        };

        let count = reader.read_bits(mode.char_count_bits(version))? as usize;
        let body = reader.rest();
        let (bytes, used) = match mode {
            Mode::Numeric => NumericDecoder::decode(body, count)?,
            Mode::Alphanumeric => AlphanumericDecoder::decode(body, count)?,
            _ => ByteDecoder::decode(body, count)?,
        };
        reader.advance(used);
        parsed.bytes.extend_from_slice(&bytes);
        parsed.modes.push(mode);
    }

    Ok(parsed)
}

fn read_eci(reader: &mut BitReader<'_>) -> Result<u32, DecodeError> {
    let first = reader.read_bits(8)?;
    if first & 0x80 == 0 {
        Ok(first)
    } else if first & 0xC0 == 0x80 {
        Ok(((first & 0x3F) << 8) | reader.read_bits(8)?)
    } else if first & 0xE0 == 0xC0 {
        Ok(((first & 0x1F) << 16) | reader.read_bits(16)?)
    } else {
        Err(DecodeError::Payload(format!("bad ECI designator {:08b}", first)))
    }
}

struct BitReader<'a> {
    bits: &'a [bool],
    idx: usize,
}

impl<'a> BitReader<'a> {
    fn new(bits: &'a [bool]) -> Self {
        Self { bits, idx: 0 }
    }

    fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.idx)
    }

    fn rest(&self) -> &'a [bool] {
        &self.bits[self.idx.min(self.bits.len())..]
    }

    fn advance(&mut self, n: usize) {
        self.idx = (self.idx + n).min(self.bits.len());
    }

    fn read_bits(&mut self, n: usize) -> Result<u32, DecodeError> {
        if self.idx + n > self.bits.len() {
            return Err(DecodeError::Payload("bit stream ended inside a field".into()));
        }
        let val = self.bits[self.idx..self.idx + n]
            .iter()
            .fold(0u32, |acc, &b| (acc << 1) | u32::from(b));
        self.idx += n;
        Ok(val)
    }
}
