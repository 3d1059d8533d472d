use crate::models::{BitMatrix, RegionTag, Version};

/// Function patterns of one version: their colors and the region of every module.
/// Format and version areas are reserved light until the mask is known.
pub struct FunctionPatterns {
    modules: BitMatrix,
    regions: Vec<RegionTag>,
    version: Version,
}

impl FunctionPatterns {
    /// Stamp every function pattern of `version`
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut patterns = Self {
            modules: BitMatrix::new(size, size),
            regions: vec![RegionTag::Data; size * size],
            version,
        };

        // Timing strips (row 6 and column 6); later patterns overwrite the crossings
        for i in 0..size {
            patterns.mark(6, i, i % 2 == 0, RegionTag::TimingV);
            patterns.mark(i, 6, i % 2 == 0, RegionTag::TimingH);
        }

        // Finder patterns + separators, clipped to bounds
        patterns.mark_finder(3, 3);
        patterns.mark_finder(size - 4, 3);
        patterns.mark_finder(3, size - 4);

        let align = alignment_pattern_positions(version);
        let last = align.len().saturating_sub(1);
        for (i, &cx) in align.iter().enumerate() {
            for (j, &cy) in align.iter().enumerate() {
                // Skip the three finder corners
                if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                    continue;
                }
                patterns.mark_alignment(cx, cy);
            }
        }

        // Format info areas
        for i in 0..9 {
            if i != 6 {
                patterns.mark(8, i, false, RegionTag::Format);
                patterns.mark(i, 8, false, RegionTag::Format);
            }
        }
        for i in 0..8 {
            patterns.mark(size - 1 - i, 8, false, RegionTag::Format);
            patterns.mark(8, size - 1 - i, false, RegionTag::Format);
        }

        // Dark module
        patterns.mark(8, size - 8, true, RegionTag::Format);

        // Version info (v7+)
        if version.number() >= 7 {
            for i in 0..18 {
                let a = size - 11 + i % 3;
                let b = i / 3;
                patterns.mark(a, b, false, RegionTag::VersionInfo);
                patterns.mark(b, a, false, RegionTag::VersionInfo);
            }
        }

        patterns
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Version the patterns were built for
    pub fn version(&self) -> Version {
        self.version
    }

    /// Whether (x, y) is reserved for a function pattern
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.region(x, y).is_function()
    }

    /// Region tag at (x, y)
    pub fn region(&self, x: usize, y: usize) -> RegionTag {
        self.regions[y * self.size() + x]
    }

    /// Region tags, row-major
    pub fn regions(&self) -> &[RegionTag] {
        &self.regions
    }

    /// Colors of the function modules; data modules are light
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Modules left for data and EC codewords (including remainder bits)
    pub fn data_modules_count(&self) -> usize {
        self.regions.iter().filter(|r| !r.is_function()).count()
    }

    fn mark(&mut self, x: usize, y: usize, dark: bool, region: RegionTag) {
        let size = self.size();
        self.modules.set(x, y, dark);
        self.regions[y * size + x] = region;
    }

    fn mark_finder(&mut self, cx: usize, cy: usize) {
        let size = self.size() as isize;
        for dy in -4isize..=4 {
            for dx in -4isize..=4 {
                let x = cx as isize + dx;
                let y = cy as isize + dy;
                if x < 0 || y < 0 || x >= size || y >= size {
                    continue;
                }
                let dist = dx.abs().max(dy.abs());
                let region = if dist <= 3 {
                    RegionTag::Finder
                } else {
                    RegionTag::Separator
                };
                self.mark(x as usize, y as usize, dist != 2 && dist != 4, region);
            }
        }
    }

    fn mark_alignment(&mut self, cx: usize, cy: usize) {
        for dy in 0..5 {
            for dx in 0..5 {
                let dist = (dx as isize - 2).abs().max((dy as isize - 2).abs());
                self.mark(cx - 2 + dx, cy - 2 + dy, dist != 1, RegionTag::Alignment);
            }
        }
    }
}

/// Alignment pattern centers for a given version, ascending.
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let v = version.number() as usize;
    if v == 1 {
        return Vec::new();
    }
    let num_align = v / 7 + 2;
    let step = (v * 8 + num_align * 3 + 5) / (num_align * 4 - 4) * 2;

    // Spaced back from the last center; only the first gap may be narrower
    let last = version.size() - 7;
    let mut positions = Vec::with_capacity(num_align);
    positions.push(6);
    positions.extend((1..num_align).map(|i| last - (num_align - 1 - i) * step));
    positions
}
