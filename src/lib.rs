//! # dotmorph
//!
//! Morph successive low-resolution camera snapshots into each other as a
//! swarm of colored dots.
//!
//! Each capture is downsampled to a small grid and drawn as one dot per
//! cell. When a new capture arrives every dot of the new image flies in from
//! the best-matching dot of the previous one (same position if the color
//! barely changed, otherwise the nearest color anywhere), each with its own
//! jittered start and duration.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dotmorph::{
//!     capture::SyntheticCamera,
//!     config::Config,
//!     session::RenderSession,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let camera = SyntheticCamera::new(config.grid.size(), 42);
//!
//! let mut session = RenderSession::new(config, Box::new(camera), 640, 30.0, Some(42))?;
//! session.run(20_000.0, Some(std::path::Path::new("frames/")))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`snapshot`] - Immutable captured grids and color distance
//! - [`transition`] - Matching, scheduling and interpolation of dots
//! - [`engine`] - Tick-driven state machine owning all animation state
//! - [`render`] - Drawing surfaces the engine renders through
//! - [`capture`] - Frame sources feeding the engine
//! - [`session`] - Offline driver writing frames to disk
//! - [`config`] - Configuration management
//!
//! ## Driving the Engine Yourself
//!
//! The engine is decoupled from any camera or window library. Feed it
//! events and tick it once per display frame:
//!
//! ```rust
//! use dotmorph::{
//!     config::Config,
//!     engine::{EngineEvent, TransitionEngine},
//!     render::RecordingSurface,
//! };
//!
//! let mut config = Config::default();
//! config.grid.width = 4;
//! config.grid.height = 3;
//!
//! let mut engine = TransitionEngine::with_seed(config, 400, 7);
//! let mut surface = RecordingSurface::new(400, 300);
//!
//! engine.push_event(EngineEvent::frame(vec![128; 4 * 3 * 4]));
//! engine.tick(0.0, &mut surface);
//! let report = engine.tick(250.0, &mut surface);
//! assert!(report.transition_started);
//! ```

pub mod capture;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod transition;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    engine::{EngineEvent, TransitionEngine},
    error::{MorphError, Result},
    snapshot::{GridSize, Snapshot},
};
