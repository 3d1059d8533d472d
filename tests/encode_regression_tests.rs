//! Integration tests for symbol encoding
//!
//! These tests pin capacity limits, structural layout, mask selection and
//! readback across versions and error correction levels.

use qrmatrix::decoder::read_symbol;
use qrmatrix::encoder::format::format_bits;
use qrmatrix::encoder::function_patterns::alignment_pattern_positions;
use qrmatrix::encoder::mask::penalty_score;
use qrmatrix::encoder::tables::max_byte_payload;
use qrmatrix::{
    Component, ECLevel, EncodeError, EncodeOptions, MaskPattern, RegionTag, Symbol, Version, encode,
    encode_text,
};

/// Deterministic pseudo-random bytes (xorshift)
fn payload_bytes(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(0x9E37_79B9) | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

fn v(n: u8) -> Version {
    Version::new(n).unwrap()
}

#[test]
fn test_byte_capacity_boundaries() {
    for version in Version::all() {
        for ec_level in ECLevel::ALL {
            let max = max_byte_payload(version, ec_level).unwrap();
            // Lowercase letters keep the whole payload in one byte segment
            let options = EncodeOptions::new(ec_level)
                .with_version(version)
                .with_mask(MaskPattern::Pattern0);

            let symbol = encode(&vec![b'a'; max], &options).unwrap();
            assert_eq!(symbol.version(), version);

            let err = encode(&vec![b'a'; max + 1], &options).unwrap_err();
            assert!(
                matches!(err, EncodeError::CapacityExceeded { .. }),
                "version {} level {:?}: {:?}",
                version.number(),
                ec_level,
                err
            );
        }
    }
}

#[test]
fn test_known_capacities() {
    assert_eq!(max_byte_payload(v(1), ECLevel::L).unwrap(), 17);
    assert_eq!(max_byte_payload(v(1), ECLevel::H).unwrap(), 7);
    assert_eq!(max_byte_payload(v(10), ECLevel::M).unwrap(), 213);
    assert_eq!(max_byte_payload(v(40), ECLevel::L).unwrap(), 2953);
    assert_eq!(max_byte_payload(v(40), ECLevel::H).unwrap(), 1273);
}

#[test]
fn test_overflow_beyond_version40() {
    let err = encode(&vec![b'a'; 2954], &EncodeOptions::new(ECLevel::L)).unwrap_err();
    assert_eq!(
        err,
        EncodeError::CapacityExceeded {
            needed_bits: Some(4 + 16 + 2954 * 8),
            capacity_bits: 2956 * 8,
        }
    );
    assert!(encode(&vec![b'a'; 2953], &EncodeOptions::new(ECLevel::L)).is_ok());
}

#[test]
fn test_roundtrip_lengths_and_levels() {
    for len in 1..=100 {
        for ec_level in ECLevel::ALL {
            let payload = payload_bytes(len, len as u32 * 4 + ec_level.ordinal() as u32);
            let symbol = encode(&payload, &EncodeOptions::new(ec_level)).unwrap();
            let decoded = read_symbol(&symbol).unwrap();
            assert_eq!(decoded.payload, payload, "len {} level {:?}", len, ec_level);
            assert_eq!(decoded.ec_level, ec_level);
            assert_eq!(decoded.corrected_codewords, 0);
        }
    }
}

#[test]
fn test_roundtrip_mixed_modes() {
    let text = "Invoice 2024-000123: TOTAL 1234567890 EUR / paid \u{2713}";
    let symbol = encode_text(text, &EncodeOptions::new(ECLevel::M)).unwrap();
    assert_eq!(read_symbol(&symbol).unwrap().text(), text);
}

#[test]
fn test_encoding_is_deterministic() {
    let payload = payload_bytes(321, 7);
    let options = EncodeOptions::new(ECLevel::Q);
    let a = encode(&payload, &options).unwrap();
    let b = encode(&payload, &options).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_hello_is_version1() {
    let symbol = encode_text("HELLO", &EncodeOptions::new(ECLevel::L)).unwrap();
    assert_eq!(symbol.version().number(), 1);
    assert_eq!(symbol.side_length(), 21);
}

#[test]
fn test_chosen_mask_has_lowest_penalty() {
    for (len, level) in [(10, ECLevel::L), (80, ECLevel::H), (400, ECLevel::M), (1200, ECLevel::Q)] {
        let symbol = encode(&payload_bytes(len, 99), &EncodeOptions::new(level)).unwrap();
        let penalties = symbol.penalties().unwrap();
        let chosen = symbol.mask_pattern().id() as usize;
        let min = *penalties.iter().min().unwrap();
        assert_eq!(penalties[chosen], min);
        assert!(penalties[..chosen].iter().all(|&p| p > min));
        assert_eq!(penalty_score(symbol.matrix()), min);
    }
}

#[test]
fn test_format_bits_match_level_and_mask() {
    for ec_level in ECLevel::ALL {
        let symbol = encode(b"format check", &EncodeOptions::new(ec_level)).unwrap();
        let expected = format_bits(ec_level, symbol.mask_pattern());
        let size = symbol.side_length();
        // Second copy: bits 0-7 along row 8 from the right edge
        let read: u16 = (0..8)
            .map(|i| u16::from(symbol.is_dark(8, size - 1 - i)) << i)
            .chain((8..15).map(|i| u16::from(symbol.is_dark(size - 15 + i, 8)) << i))
            .sum();
        assert_eq!(read, expected);
        assert!(symbol.is_dark(size - 8, 8), "dark module");
    }
}

fn assert_finders_and_timing(symbol: &Symbol) {
    let size = symbol.side_length();
    for (r0, c0) in [(0, 0), (0, size - 7), (size - 7, 0)] {
        for dr in 0..7 {
            for dc in 0..7 {
                let ring = dr.min(dc).min(6 - dr).min(6 - dc);
                assert_eq!(symbol.is_dark(r0 + dr, c0 + dc), ring != 1);
                assert_eq!(symbol.region_at(r0 + dr, c0 + dc), Some(RegionTag::Finder));
            }
        }
    }
    for i in 8..size - 8 {
        assert_eq!(symbol.is_dark(6, i), i % 2 == 0);
        assert_eq!(symbol.is_dark(i, 6), i % 2 == 0);
    }
}

fn assert_alignment_patterns(symbol: &Symbol) {
    let positions = alignment_pattern_positions(symbol.version());
    let last = positions.len() - 1;
    for (i, &row) in positions.iter().enumerate() {
        for (j, &col) in positions.iter().enumerate() {
            if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                continue;
            }
            assert!(symbol.is_dark(row, col));
            assert!(!symbol.is_dark(row - 1, col));
            assert!(symbol.is_dark(row + 2, col + 2));
            assert_eq!(symbol.region_at(row, col), Some(RegionTag::Alignment));
        }
    }
}

#[test]
fn test_version7_structure() {
    let options = EncodeOptions::new(ECLevel::M).with_version(v(7));
    let symbol = encode(b"structure", &options).unwrap();
    assert_eq!(symbol.side_length(), 45);
    assert_finders_and_timing(&symbol);
    assert_eq!(alignment_pattern_positions(v(7)), vec![6, 22, 38]);
    assert_alignment_patterns(&symbol);
    assert_eq!(symbol.region_at(5, 34), Some(RegionTag::VersionInfo));
    assert_eq!(symbol.region_at(34, 5), Some(RegionTag::VersionInfo));
}

#[test]
fn test_version40_structure() {
    let payload = payload_bytes(2000, 40);
    let options = EncodeOptions::new(ECLevel::L).with_version(v(40));
    let symbol = encode(&payload, &options).unwrap();
    assert_eq!(symbol.side_length(), 177);
    assert_finders_and_timing(&symbol);
    assert_alignment_patterns(&symbol);
    assert_eq!(read_symbol(&symbol).unwrap().payload, payload);
}

#[test]
fn test_components_cover_every_module() {
    let symbol = encode(b"components", &EncodeOptions::new(ECLevel::H)).unwrap();
    let size = symbol.side_length();
    let pupils = symbol.modules_in(Component::EyePupil);
    let outer = symbol.modules_in(Component::EyeOuter);
    let on = symbol.modules_in(Component::OnPixels);
    let off = symbol.modules_in(Component::OffPixels);
    assert_eq!(pupils.len(), 27);
    assert_eq!(outer.len(), 120);
    assert_eq!(pupils.len() + outer.len() + on.len() + off.len(), size * size);
    assert!(on.iter().all(|&(r, c)| symbol.is_dark(r, c)));
    assert!(off.iter().all(|&(r, c)| !symbol.is_dark(r, c)));
    assert!(symbol.module_at(size, 0).is_none());
}

#[test]
fn test_numeric_payload_prefers_small_version() {
    // 41 digits fit version 1-L only in numeric mode
    let digits = "12345678901234567890123456789012345678901";
    let symbol = encode_text(digits, &EncodeOptions::new(ECLevel::L)).unwrap();
    assert_eq!(symbol.version().number(), 1);
    assert_eq!(read_symbol(&symbol).unwrap().text(), digits);
}

// Reference symbols produced by an independent encoder with automatic mask selection
const HELLO_LOW: [&str; 21] = [
    "111111100100101111111",
    "100000101001001000001",
    "101110100100001011101",
    "101110101001001011101",
    "101110100011101011101",
    "100000101110101000001",
    "111111101010101111111",
    "000000000011100000000",
    "111110111100110101010",
    "101001000000100101111",
    "000000101111010011001",
    "011111010010000110000",
    "011001101111010010100",
    "000000001101111001011",
    "111111101010101100101",
    "100000100111111001001",
    "101110101000100100100",
    "101110101010100100100",
    "101110101001010010100",
    "100000101010000110101",
    "111111101001010010100",
];

const EXAMPLE_URL_QUARTILE: [&str; 29] = [
    "11111110110110001000101111111",
    "10000010101001100101101000001",
    "10111010110010101000101011101",
    "10111010101011010011001011101",
    "10111010101110101111001011101",
    "10000010010110010011001000001",
    "11111110101010101010101111111",
    "00000000101000100001000000000",
    "01101011011101000001101011111",
    "01001000111000100001111000101",
    "11111010000101000001100001011",
    "01000101010111010110111100010",
    "10011110110100101101001100000",
    "00001001101110101110111100011",
    "10010110010111001010001100111",
    "11011101011010000111101100001",
    "10110110110110101010001001001",
    "00001100011010011111010000111",
    "10111111011110111010010111111",
    "01011101100101101101001101001",
    "10011011100010011100111110011",
    "00000000101101000001100010011",
    "11111110100001000101101010111",
    "10000010001101111000100010011",
    "10111010111000000000111111010",
    "10111010011111010000110010100",
    "10111010110001100001000111001",
    "10000010110110010101001100010",
    "11111110011001001101000010011",
];

fn assert_matches_rows(symbol: &Symbol, rows: &[&str]) {
    assert_eq!(symbol.side_length(), rows.len());
    for (row, line) in rows.iter().enumerate() {
        for (col, cell) in line.bytes().enumerate() {
            assert_eq!(
                symbol.is_dark(row, col),
                cell == b'1',
                "module at row {} col {}",
                row,
                col
            );
        }
    }
}

#[test]
fn test_hello_low_matches_reference() {
    let symbol = encode_text("HELLO", &EncodeOptions::new(ECLevel::L)).unwrap();
    assert_eq!(symbol.version().number(), 1);
    assert_eq!(symbol.mask_pattern(), MaskPattern::Pattern2);
    assert_matches_rows(&symbol, &HELLO_LOW);
}

#[test]
fn test_multi_block_url_matches_reference() {
    let symbol = encode_text("https://example.com/abc", &EncodeOptions::new(ECLevel::Q)).unwrap();
    assert_eq!(symbol.version().number(), 3);
    assert_eq!(symbol.mask_pattern(), MaskPattern::Pattern0);
    assert_matches_rows(&symbol, &EXAMPLE_URL_QUARTILE);
}

#[test]
fn test_hello_mask_is_reproducible() {
    let options = EncodeOptions::new(ECLevel::L);
    let first = encode(b"HELLO", &options).unwrap();
    for _ in 0..5 {
        let again = encode(b"HELLO", &options).unwrap();
        assert_eq!(again, first);
    }
    assert_eq!(read_symbol(&first).unwrap().text(), "HELLO");
}

#[test]
fn test_symbol_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Symbol>();
}
