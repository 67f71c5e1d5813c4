use image::{ImageBuffer, Rgb as Pixel, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;
use crate::snapshot::color::Rgb;

/// Dimensions of a dot grid, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Grid for a discrete fidelity input: `width = 4 * min_dots * fidelity`,
    /// `height = 0.75 * width`. Returns `None` for fidelity zero.
    pub fn from_fidelity(min_dots: u32, fidelity: u32) -> Option<Self> {
        let width = 4u32.checked_mul(min_dots)?.checked_mul(fidelity)?;
        if width == 0 {
            return None;
        }
        // 0.75 * 4 * m * k is always the integer 3 * m * k
        Some(Self::new(width, width / 4 * 3))
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Row-major index to cell coordinates
    pub fn coords(&self, index: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((index % w) as u32, (index / w) as u32)
    }

    /// Length of the RGBA buffer a capture of this size delivers
    pub fn rgba_len(&self) -> usize {
        self.cell_count() * 4
    }
}

/// Immutable grid of RGB samples captured at one instant
///
/// Backed by an `RgbImage`. No mutable access is exposed.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    buffer: RgbImage,
}

impl Snapshot {
    /// Wrap an RGB image buffer
    pub fn new(buffer: RgbImage) -> Self {
        Self { buffer }
    }

    /// Build a snapshot by evaluating `f` for every cell
    pub fn from_fn<F>(size: GridSize, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        let buffer = ImageBuffer::from_fn(size.width, size.height, |x, y| Pixel(f(x, y)));
        Self { buffer }
    }

    /// Snapshot of a single flat color
    pub fn filled(size: GridSize, color: Rgb) -> Self {
        Self::from_fn(size, |_, _| color)
    }

    /// Build from a flat row-major RGBA buffer of `width * height * 4` bytes.
    /// Alpha is ignored.
    pub fn from_rgba(size: GridSize, data: &[u8]) -> Result<Self, CaptureError> {
        let expected = size.rgba_len();
        if data.len() != expected {
            return Err(CaptureError::BufferSize {
                width: size.width,
                height: size.height,
                expected,
                actual: data.len(),
            });
        }

        let rgb: Vec<u8> = data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        // Length checked above, so from_raw cannot fail
        ImageBuffer::from_raw(size.width, size.height, rgb)
            .map(Self::new)
            .ok_or(CaptureError::BufferSize {
                width: size.width,
                height: size.height,
                expected,
                actual: data.len(),
            })
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.buffer.width(), self.buffer.height())
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn cell_count(&self) -> usize {
        self.size().cell_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Color at a cell, or `None` when out of bounds
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if self.size().contains(x, y) {
            Some(self.buffer.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Color at a row-major cell index
    pub fn color_at_index(&self, index: usize) -> Rgb {
        let (x, y) = self.size().coords(index);
        self.buffer.get_pixel(x, y).0
    }

    /// Cells in row-major order as `(x, y, color)`
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, Rgb)> + '_ {
        self.buffer.enumerate_pixels().map(|(x, y, p)| (x, y, p.0))
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }
}
