use crate::snapshot::{GridSize, Rgb};

/// Where one target cell animates from
///
/// Several targets may share a source; the mapping is not a bijection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelCorrespondence {
    pub source: (u32, u32),
    pub target: (u32, u32),
    pub source_color: Rgb,
    pub target_color: Rgb,
}

impl PixelCorrespondence {
    /// A target that stays where it is
    pub fn identity(x: u32, y: u32, source_color: Rgb, target_color: Rgb) -> Self {
        Self {
            source: (x, y),
            target: (x, y),
            source_color,
            target_color,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }

    /// Grid distance the dot travels
    pub fn travel(&self) -> f64 {
        let dx = self.target.0 as f64 - self.source.0 as f64;
        let dy = self.target.1 as f64 - self.source.1 as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One dot's complete animation record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPixel {
    pub correspondence: PixelCorrespondence,

    /// Offset from the transition start before this dot moves (ms)
    pub start_delay: f64,

    /// How long this dot takes once it starts (ms)
    pub pixel_duration: f64,
}

impl TransitionPixel {
    /// Time at which this dot reaches its target, relative to the transition start
    pub fn end_time(&self) -> f64 {
        self.start_delay + self.pixel_duration
    }
}

/// Every dot record of one transition, one per target cell in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSet {
    size: GridSize,
    pixels: Vec<TransitionPixel>,
}

impl TransitionSet {
    /// Returns `None` unless there is exactly one record per target cell
    pub fn new(size: GridSize, pixels: Vec<TransitionPixel>) -> Option<Self> {
        if pixels.len() != size.cell_count() {
            return None;
        }
        Some(Self { size, pixels })
    }

    /// Set for a zero-cell grid
    pub fn empty() -> Self {
        Self {
            size: GridSize::new(0, 0),
            pixels: Vec::new(),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn pixels(&self) -> &[TransitionPixel] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitionPixel> {
        self.pixels.iter()
    }

    /// Time at which the last dot arrives
    pub fn finish_time(&self) -> f64 {
        self.pixels
            .iter()
            .map(TransitionPixel::end_time)
            .fold(0.0, f64::max)
    }
}
