//! # Transition Engine
//!
//! Owns every piece of mutable animation state (snapshots, the active
//! transition, capture timestamps) and advances it one display frame at a
//! time. Inputs arrive as [`EngineEvent`] values and are applied at the next
//! tick boundary, never in the middle of drawing a frame.

pub mod machine;
pub mod events;

pub use machine::{EngineStats, Phase, TickReport, TransitionEngine};
pub use events::EngineEvent;
