//! QR symbol encoder
//!
//! Payload bytes flow through segmentation, bit stream assembly,
//! Reed-Solomon blocks, zig-zag placement and mask selection into an
//! immutable [`Symbol`].

/// Data codeword assembly (terminator, bit and pad codewords)
pub mod bitstream;
/// Block splitting and interleaving
pub mod blocks;
/// BCH format and version information
pub mod format;
/// Finder, separator, timing, alignment and reserved areas
pub mod function_patterns;
/// Mask patterns and penalty scoring
pub mod mask;
/// Zig-zag codeword placement
pub mod placement;
/// Reed-Solomon EC codeword generation
pub mod reed_solomon;
/// Encoding modes and optimal segmentation
pub mod segment;
/// Capacity and block structure tables
pub mod tables;

use crate::config;
use crate::error::{EncodeError, Result};
use crate::models::{ECLevel, MaskPattern, Symbol, Version};
use function_patterns::FunctionPatterns;
use segment::Segment;

/// Per-call encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    /// Error correction level (default L)
    pub ec_level: ECLevel,
    /// Fixed version; `None` picks the smallest version that fits
    pub version: Option<Version>,
    /// Fixed mask; `None` scores all eight and keeps the best
    pub mask: Option<MaskPattern>,
    /// ECI assignment number written before the data segments
    pub eci: Option<u32>,
}

impl EncodeOptions {
    /// Options for `ec_level` with automatic version and mask
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            ec_level,
            ..Self::default()
        }
    }

    /// Pin the version
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Pin the mask pattern
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Prefix an ECI designator
    pub fn with_eci(mut self, assignment: u32) -> Self {
        self.eci = Some(assignment);
        self
    }

    fn candidate_versions(&self) -> Vec<Version> {
        match self.version {
            Some(v) => vec![v],
            None => Version::all().collect(),
        }
    }
}

/// Encode raw bytes with optimal mode segmentation
pub fn encode(payload: &[u8], options: &EncodeOptions) -> Result<Symbol> {
    let eci = options.eci.map(Segment::make_eci).transpose()?;

    // Segmentation only changes at the count-field boundaries (9/26)
    let mut cached: Option<(usize, Vec<Segment>)> = None;
    let mut last_needed = None;
    let mut last_capacity = 0;
    for version in options.candidate_versions() {
        let group = count_bits_group(version);
        if cached.as_ref().is_none_or(|(g, _)| *g != group) {
            let mut segments: Vec<Segment> = eci.iter().cloned().collect();
            segments.extend(segment::optimal_segments(payload, version));
            cached = Some((group, segments));
        }
        let Some((_, segments)) = cached.as_ref() else {
            continue;
        };
        let capacity = tables::num_data_codewords(version, options.ec_level)? * 8;
        let needed = segment::total_bits(segments, version);
        if needed.is_some_and(|bits| bits <= capacity) {
            tracing::debug!(
                version = version.number(),
                segments = segments.len(),
                payload_len = payload.len(),
                "selected version"
            );
            return build_symbol(segments, version, options);
        }
        last_needed = needed;
        last_capacity = capacity;
    }

    Err(EncodeError::CapacityExceeded {
        needed_bits: last_needed,
        capacity_bits: last_capacity,
    })
}

/// Encode UTF-8 text as its bytes
pub fn encode_text(text: &str, options: &EncodeOptions) -> Result<Symbol> {
    encode(text.as_bytes(), options)
}

/// Encode caller-built segments as given
pub fn encode_segments(segments: &[Segment], options: &EncodeOptions) -> Result<Symbol> {
    let mut all: Vec<Segment> = options
        .eci
        .map(Segment::make_eci)
        .transpose()?
        .into_iter()
        .collect();
    all.extend_from_slice(segments);

    let mut last_needed = None;
    let mut last_capacity = 0;
    for version in options.candidate_versions() {
        let capacity = tables::num_data_codewords(version, options.ec_level)? * 8;
        let needed = segment::total_bits(&all, version);
        if needed.is_some_and(|bits| bits <= capacity) {
            tracing::debug!(version = version.number(), segments = all.len(), "selected version");
            return build_symbol(&all, version, options);
        }
        last_needed = needed;
        last_capacity = capacity;
    }
    Err(EncodeError::CapacityExceeded {
        needed_bits: last_needed,
        capacity_bits: last_capacity,
    })
}

fn count_bits_group(version: Version) -> usize {
    match version.number() {
        1..=9 => 0,
        10..=26 => 1,
        _ => 2,
    }
}

fn build_symbol(segments: &[Segment], version: Version, options: &EncodeOptions) -> Result<Symbol> {
    let ec_level = options.ec_level;
    let data = bitstream::encode_data_codewords(segments, version, ec_level)?;
    let blocks = blocks::split_into_blocks(&data, version, ec_level)?;
    let codewords = blocks::interleave(&blocks);

    let patterns = FunctionPatterns::new(version);
    let mut matrix = patterns.modules().clone();
    placement::place_codewords(&mut matrix, &patterns, &codewords)?;
    // Version blocks are mask-independent and count toward the penalty
    format::draw_version_bits(&mut matrix, version);

    let (chosen, penalties) = match options.mask {
        Some(mask) => (mask, None),
        None => {
            let parallel = usize::from(version.number()) >= config::parallel_mask_min_version();
            let selection = mask::select_mask(&matrix, &patterns, ec_level, parallel);
            (selection.chosen, Some(selection.penalties))
        }
    };
    tracing::debug!(mask = chosen.id(), ?penalties, "selected mask");

    mask::apply_mask(&mut matrix, chosen, &patterns);
    format::draw_format_bits(&mut matrix, ec_level, chosen);

    Ok(Symbol::new(
        version,
        ec_level,
        chosen,
        matrix,
        patterns.regions().to_vec(),
        penalties,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegionTag;

    #[test]
    fn test_hello_fits_version1() {
        let symbol = encode_text("HELLO", &EncodeOptions::default()).unwrap();
        assert_eq!(symbol.version().number(), 1);
        assert_eq!(symbol.side_length(), 21);
        assert_eq!(symbol.ec_level(), ECLevel::L);
        assert!(symbol.penalties().is_some());
    }

    #[test]
    fn test_forced_mask_skips_scoring() {
        let options = EncodeOptions::new(ECLevel::M).with_mask(MaskPattern::Pattern3);
        let symbol = encode(b"forced", &options).unwrap();
        assert_eq!(symbol.mask_pattern(), MaskPattern::Pattern3);
        assert!(symbol.penalties().is_none());
    }

    #[test]
    fn test_explicit_version_too_small() {
        let options = EncodeOptions::new(ECLevel::H).with_version(Version::new(1).unwrap());
        let err = encode(&[b'a'; 10], &options).unwrap_err();
        assert!(matches!(err, EncodeError::CapacityExceeded { capacity_bits: 72, .. }));
    }

    #[test]
    fn test_explicit_version_larger_than_needed() {
        let v5 = Version::new(5).unwrap();
        let symbol = encode(b"1", &EncodeOptions::new(ECLevel::Q).with_version(v5)).unwrap();
        assert_eq!(symbol.version(), v5);
        assert_eq!(symbol.side_length(), 37);
    }

    #[test]
    fn test_empty_payload() {
        let symbol = encode(b"", &EncodeOptions::new(ECLevel::H)).unwrap();
        assert_eq!(symbol.version().number(), 1);
    }

    #[test]
    fn test_eci_prefix_costs_capacity() {
        // v1-L holds 17 bytes; an ECI header (12 bits) pushes 17 bytes to v2
        let payload = [b'a'; 17];
        let plain = encode(&payload, &EncodeOptions::default()).unwrap();
        assert_eq!(plain.version().number(), 1);
        let with_eci = encode(&payload, &EncodeOptions::default().with_eci(26)).unwrap();
        assert_eq!(with_eci.version().number(), 2);
    }

    #[test]
    fn test_invalid_eci_rejected() {
        let err = encode(b"x", &EncodeOptions::default().with_eci(1_000_000)).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidVersionOrLevel(_)));
    }

    #[test]
    fn test_encode_segments_as_given() {
        let segs = [
            Segment::make_alphanumeric(b"ABC").unwrap(),
            Segment::make_numeric(b"123").unwrap(),
        ];
        let symbol = encode_segments(&segs, &EncodeOptions::new(ECLevel::M)).unwrap();
        assert_eq!(symbol.version().number(), 1);
    }

    #[test]
    fn test_version_info_drawn_from_v7() {
        let options = EncodeOptions::default().with_version(Version::new(7).unwrap());
        let symbol = encode(b"v7", &options).unwrap();
        let size = symbol.side_length();
        assert_eq!(symbol.region_at(0, size - 11), Some(RegionTag::VersionInfo));
        // 0x07C94: bit 2 set -> (row 0, col size - 9)
        assert!(symbol.is_dark(0, size - 9));
        assert!(symbol.is_dark(size - 9, 0));
        // bit 0 clear
        assert!(!symbol.is_dark(0, size - 11));
    }

    #[test]
    fn test_versions_with_narrow_first_alignment_gap() {
        // v36 and v39 put their second alignment center closer than the regular step
        for (n, second) in [(36, 24), (39, 26)] {
            let version = Version::new(n).unwrap();
            let options = EncodeOptions::new(ECLevel::L).with_version(version);
            let symbol = encode(b"hi", &options).unwrap();
            assert_eq!(symbol.version(), version);
            assert_eq!(symbol.region_at(6, second), Some(RegionTag::Alignment));
            assert_eq!(symbol.region_at(second, second), Some(RegionTag::Alignment));
        }
    }
}
