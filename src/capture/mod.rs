//! # Capture Devices
//!
//! Sources of RGBA frames at grid resolution. The engine never talks to a
//! device directly: a driver polls the device and forwards frames as
//! [`EngineEvent::FrameReady`](crate::engine::EngineEvent::FrameReady), and
//! applies the engine's reconfigure requests back to the device.

pub mod image_sequence;
pub mod synthetic;

pub use image_sequence::ImageSequenceCamera;
pub use synthetic::SyntheticCamera;

use crate::snapshot::GridSize;

/// A camera-like frame source
pub trait CaptureDevice {
    /// Returns the name of this device, for logs
    fn name(&self) -> &str;

    /// Switch to delivering frames of the given grid size
    fn configure(&mut self, grid: GridSize);

    /// Grid size frames are currently delivered at
    fn grid(&self) -> GridSize;

    /// Latest frame at time `now_ms` as a flat row-major RGBA buffer of
    /// `width * height * 4` bytes, or `None` if nothing is available yet
    fn poll_frame(&mut self, now_ms: f64) -> Option<Vec<u8>>;
}
