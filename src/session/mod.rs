//! # Render Session
//!
//! Offline driver: steps a fixed-rate clock, shuttles frames from a capture
//! device into the engine, and writes every rendered canvas to disk.

pub mod clock;
pub mod render_session;

pub use clock::FrameClock;
pub use render_session::{RenderSession, ScheduledChange, SessionSummary};
