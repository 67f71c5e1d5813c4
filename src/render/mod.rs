//! # Rendering
//!
//! The engine never touches pixels directly. It issues fill and circle
//! commands through [`RenderSurface`]; [`CanvasSurface`] rasterizes them into
//! an RGB image and [`RecordingSurface`] just remembers them.

pub mod canvas;
pub mod geometry;
pub mod recorder;

pub use canvas::CanvasSurface;
pub use geometry::CellGeometry;
pub use recorder::{DrawCommand, RecordingSurface};

/// Drawing target for the transition engine
pub trait RenderSurface {
    /// Current canvas size in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Resize the canvas; existing content may be discarded
    fn resize(&mut self, width: u32, height: u32);

    /// Wash the whole canvas with a gray level at the given alpha
    fn background(&mut self, gray: u8, alpha: u8);

    /// Set the fill color used by subsequent shapes
    fn fill_color(&mut self, r: f64, g: f64, b: f64);

    /// Draw a filled circle
    fn draw_circle(&mut self, center_x: f64, center_y: f64, diameter: f64);
}
