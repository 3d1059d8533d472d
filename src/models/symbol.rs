use super::{BitMatrix, ECLevel, MaskPattern, Version};

/// Structural role of a module within the symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionTag {
    /// 7x7 finder pattern in three corners
    Finder,
    /// Light border around each finder pattern
    Separator,
    /// Horizontal timing strip on row 6
    TimingH,
    /// Vertical timing strip on column 6
    TimingV,
    /// 5x5 alignment pattern
    Alignment,
    /// Format information copies and the fixed dark module
    Format,
    /// Version information blocks (version 7+)
    VersionInfo,
    /// Data and error correction codewords
    Data,
}

impl RegionTag {
    /// Whether the module belongs to a function pattern rather than data
    pub fn is_function(&self) -> bool {
        !matches!(self, RegionTag::Data)
    }
}

/// Styling components the presentation layer draws separately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Outer 7x7 ring of a finder pattern, including its light inner ring
    EyeOuter,
    /// 3x3 center of a finder pattern
    EyePupil,
    /// Dark module outside the finder patterns
    OnPixels,
    /// Light module outside the finder patterns
    OffPixels,
}

/// One cell of the finished symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    /// Dark (`true`) or light module color
    pub dark: bool,
    /// Structural role of the module
    pub region: RegionTag,
}

/// A finished QR code symbol. Immutable once built by the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    version: Version,
    ec_level: ECLevel,
    mask_pattern: MaskPattern,
    modules: BitMatrix,
    regions: Vec<RegionTag>,
    penalties: Option<[u32; 8]>,
}

impl Symbol {
    pub(crate) fn new(
        version: Version,
        ec_level: ECLevel,
        mask_pattern: MaskPattern,
        modules: BitMatrix,
        regions: Vec<RegionTag>,
        penalties: Option<[u32; 8]>,
    ) -> Self {
        debug_assert_eq!(modules.width(), version.size());
        debug_assert_eq!(regions.len(), version.size() * version.size());
        Self {
            version,
            ec_level,
            mask_pattern,
            modules,
            regions,
            penalties,
        }
    }

    /// Symbol version (1-40)
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Mask applied to the data modules
    pub fn mask_pattern(&self) -> MaskPattern {
        self.mask_pattern
    }

    /// Width and height in modules
    pub fn side_length(&self) -> usize {
        self.version.size()
    }

    /// Module color and region at (row, col); `None` outside the symbol
    pub fn module_at(&self, row: usize, col: usize) -> Option<Module> {
        let region = self.region_at(row, col)?;
        Some(Module {
            dark: self.modules.get(col, row),
            region,
        })
    }

    /// Whether the module at (row, col) is dark. Coordinates outside the
    /// symbol read as light, like the quiet zone around it.
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.modules.get(col, row)
    }

    /// Region of the module at (row, col); `None` outside the symbol
    pub fn region_at(&self, row: usize, col: usize) -> Option<RegionTag> {
        let size = self.side_length();
        if row >= size || col >= size {
            return None;
        }
        Some(self.regions[row * size + col])
    }

    /// Styling component of the module at (row, col)
    pub fn component_at(&self, row: usize, col: usize) -> Option<Component> {
        let region = self.region_at(row, col)?;
        if region == RegionTag::Finder {
            let size = self.side_length();
            let local_row = if row >= size - 7 { row - (size - 7) } else { row };
            let local_col = if col >= size - 7 { col - (size - 7) } else { col };
            let in_pupil = (2..=4).contains(&local_row) && (2..=4).contains(&local_col);
            return Some(if in_pupil {
                Component::EyePupil
            } else {
                Component::EyeOuter
            });
        }
        Some(if self.is_dark(row, col) {
            Component::OnPixels
        } else {
            Component::OffPixels
        })
    }

    /// (row, col) of every module belonging to `component`, row-major
    pub fn modules_in(&self, component: Component) -> Vec<(usize, usize)> {
        let size = self.side_length();
        let mut out = Vec::new();
        for row in 0..size {
            for col in 0..size {
                if self.component_at(row, col) == Some(component) {
                    out.push((row, col));
                }
            }
        }
        out
    }

    /// Rows of module colors, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = Vec<bool>> + '_ {
        let size = self.side_length();
        (0..size).map(move |row| (0..size).map(|col| self.modules.get(col, row)).collect())
    }

    /// Module colors as a bit matrix indexed (x = col, y = row)
    pub fn matrix(&self) -> &BitMatrix {
        &self.modules
    }

    /// Penalty of each mask candidate, when the mask was chosen automatically
    pub fn penalties(&self) -> Option<&[u32; 8]> {
        self.penalties.as_ref()
    }
}
