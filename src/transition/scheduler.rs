use rand::Rng;
use tracing::debug;

use crate::config::TimingConfig;
use crate::snapshot::GridSize;
use crate::transition::types::{PixelCorrespondence, TransitionPixel, TransitionSet};

/// Gives each matched dot its own start delay and travel time
///
/// Every dot starts somewhere in `[0, duration_jitter)` and, under normal
/// construction, lands strictly before `total_duration - safe_end_margin`.
#[derive(Debug, Clone)]
pub struct TransitionScheduler {
    total_duration: f64,
    duration_jitter: f64,
    min_pixel_duration: f64,
    safe_end_margin: f64,
    fallback_window: f64,
}

impl Default for TransitionScheduler {
    fn default() -> Self {
        Self::from_timing(&TimingConfig::default())
    }
}

impl TransitionScheduler {
    pub fn from_timing(timing: &TimingConfig) -> Self {
        Self {
            total_duration: timing.total_duration(),
            duration_jitter: timing.duration_jitter,
            min_pixel_duration: timing.min_pixel_duration,
            safe_end_margin: timing.safe_end_margin,
            fallback_window: timing.fallback_window,
        }
    }

    /// Latest moment any dot should still be moving
    pub fn max_end_time(&self) -> f64 {
        self.total_duration - self.safe_end_margin
    }

    /// Schedule one correspondence
    pub fn schedule_pixel<R: Rng + ?Sized>(
        &self,
        correspondence: PixelCorrespondence,
        rng: &mut R,
    ) -> TransitionPixel {
        let start_delay = rng.gen::<f64>() * self.duration_jitter;
        let min_end_time = start_delay + self.min_pixel_duration;

        let mut usable_range = self.max_end_time() - min_end_time;
        if usable_range <= 0.0 {
            usable_range = self.fallback_window;
        }

        let end_time = min_end_time + rng.gen::<f64>() * usable_range;

        TransitionPixel {
            correspondence,
            start_delay,
            pixel_duration: end_time - start_delay,
        }
    }

    /// Schedule every correspondence of a grid into a complete set.
    ///
    /// `correspondences` must hold one entry per cell of `size`; anything
    /// else yields an empty set for that grid.
    pub fn schedule<R: Rng + ?Sized>(
        &self,
        size: GridSize,
        correspondences: Vec<PixelCorrespondence>,
        rng: &mut R,
    ) -> TransitionSet {
        let pixels: Vec<TransitionPixel> = correspondences
            .into_iter()
            .map(|c| self.schedule_pixel(c, rng))
            .collect();

        let count = pixels.len();
        match TransitionSet::new(size, pixels) {
            Some(set) => {
                debug!(
                    "Scheduled {} dots, last arrival at {:.0}ms",
                    set.len(),
                    set.finish_time()
                );
                set
            }
            None => {
                debug!(
                    "Dropping schedule of {} dots for a {}x{} grid",
                    count, size.width, size.height
                );
                TransitionSet::empty()
            }
        }
    }
}
