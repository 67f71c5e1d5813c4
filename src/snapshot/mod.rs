//! # Snapshots
//!
//! Immutable low-resolution color grids captured at one instant, plus the
//! grid geometry and color distance they are compared with.

pub mod color;
pub mod types;

pub use color::{color_distance, Rgb};
pub use types::{GridSize, Snapshot};
