use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::error::{RenderError, Result};
use crate::render::RenderSurface;

/// Software canvas that rasterizes draw commands into an RGB image
///
/// Circles are filled without anti-aliasing: a pixel is covered when its
/// center lies inside the circle.
#[derive(Clone, Debug)]
pub struct CanvasSurface {
    buffer: RgbImage,
    fill: [u8; 3],
}

impl CanvasSurface {
    /// Create a black canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: ImageBuffer::new(width, height),
            fill: [255, 255, 255],
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Color of a canvas pixel
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.buffer.get_pixel(x, y).0
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    /// Save the canvas as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.buffer.save(path).map_err(|e| {
            RenderError::SaveFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl RenderSurface for CanvasSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.buffer.dimensions() != (width, height) {
            self.buffer = ImageBuffer::new(width, height);
        }
    }

    fn background(&mut self, gray: u8, alpha: u8) {
        let a = alpha as f32 / 255.0;
        let target = gray as f32;
        for pixel in self.buffer.pixels_mut() {
            for channel in pixel.0.iter_mut() {
                let value = *channel as f32;
                *channel = (value + (target - value) * a).round() as u8;
            }
        }
    }

    fn fill_color(&mut self, r: f64, g: f64, b: f64) {
        self.fill = [to_channel(r), to_channel(g), to_channel(b)];
    }

    fn draw_circle(&mut self, center_x: f64, center_y: f64, diameter: f64) {
        let radius = diameter / 2.0;
        if radius <= 0.0 {
            return;
        }

        let (width, height) = self.buffer.dimensions();
        let min_x = (center_x - radius).floor().max(0.0) as u32;
        let min_y = (center_y - radius).floor().max(0.0) as u32;
        let max_x = ((center_x + radius).ceil().max(0.0) as u32).min(width);
        let max_y = ((center_y + radius).ceil().max(0.0) as u32).min(height);

        let radius_sq = radius * radius;
        let fill = Rgb(self.fill);
        for y in min_y..max_y {
            let dy = y as f64 + 0.5 - center_y;
            for x in min_x..max_x {
                let dx = x as f64 + 0.5 - center_x;
                if dx * dx + dy * dy <= radius_sq {
                    self.buffer.put_pixel(x, y, fill);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_circle_fills_center_not_corner() {
        let mut canvas = CanvasSurface::new(20, 20);
        canvas.fill_color(255.0, 0.0, 0.0);
        canvas.draw_circle(10.0, 10.0, 9.0);

        assert_eq!(canvas.get_pixel(10, 10), [255, 0, 0]);
        assert_eq!(canvas.get_pixel(0, 0), [0, 0, 0]);
        assert_eq!(canvas.get_pixel(19, 19), [0, 0, 0]);
    }

    #[test]
    fn test_circle_clipped_at_edges() {
        let mut canvas = CanvasSurface::new(10, 10);
        canvas.fill_color(0.0, 255.0, 0.0);
        canvas.draw_circle(-2.0, 5.0, 10.0);
        canvas.draw_circle(15.0, 15.0, 30.0);
        assert_eq!(canvas.get_pixel(0, 5), [0, 255, 0]);
    }

    #[test]
    fn test_fill_color_rounds_and_clamps() {
        let mut canvas = CanvasSurface::new(4, 4);
        canvas.fill_color(12.6, -3.0, 300.0);
        canvas.draw_circle(2.0, 2.0, 4.0);
        assert_eq!(canvas.get_pixel(2, 2), [13, 0, 255]);
    }

    #[test]
    fn test_background_full_alpha_clears() {
        let mut canvas = CanvasSurface::new(4, 4);
        canvas.fill_color(200.0, 200.0, 200.0);
        canvas.draw_circle(2.0, 2.0, 4.0);
        canvas.background(0, 255);
        assert_eq!(canvas.get_pixel(2, 2), [0, 0, 0]);
    }

    #[test]
    fn test_background_partial_alpha_fades() {
        let mut canvas = CanvasSurface::new(4, 4);
        canvas.fill_color(200.0, 200.0, 200.0);
        canvas.draw_circle(2.0, 2.0, 4.0);
        canvas.background(0, 128);
        let faded = canvas.get_pixel(2, 2)[0];
        assert!(faded > 0 && faded < 200);
    }

    #[test]
    fn test_save_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let canvas = CanvasSurface::new(8, 6);
        canvas.save_png(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_resize() {
        let mut canvas = CanvasSurface::new(8, 6);
        canvas.resize(16, 12);
        assert_eq!(canvas.dimensions(), (16, 12));
    }
}
