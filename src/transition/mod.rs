//! # Transitions
//!
//! Turns a pair of snapshots into a swarm of per-dot animation records and
//! evaluates them against elapsed time.
//!
//! ## Pipeline
//!
//! 1. [`CorrespondenceMatcher`] picks a source cell for every target cell
//! 2. [`TransitionScheduler`] gives each pair a jittered start delay and duration
//! 3. [`evaluate`] eases each record towards its target every frame
//!
//! ```rust
//! use dotmorph::snapshot::{GridSize, Snapshot};
//! use dotmorph::transition::{evaluate, CorrespondenceMatcher, TransitionScheduler};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let size = GridSize::new(4, 3);
//! let prev = Snapshot::filled(size, [10, 10, 10]);
//! let next = Snapshot::filled(size, [200, 40, 40]);
//! let mut rng = SmallRng::seed_from_u64(7);
//!
//! let (pairs, _stats) = CorrespondenceMatcher::new(30.0).correspond(&prev, &next, &mut rng);
//! let set = TransitionScheduler::default().schedule(size, pairs, &mut rng);
//! let sample = evaluate(&set.pixels()[0], 8000.0);
//! assert_eq!(sample.color(), [200.0, 40.0, 40.0]);
//! ```

pub mod interpolate;
pub mod matcher;
pub mod scheduler;
pub mod types;

pub use interpolate::{ease_in_out_cubic, evaluate, lerp, PixelSample};
pub use matcher::{CorrespondenceMatcher, MatchStats};
pub use scheduler::TransitionScheduler;
pub use types::{PixelCorrespondence, TransitionPixel, TransitionSet};
