use crate::transition::types::TransitionPixel;

/// Standard cubic ease-in-out: `4t³` below one half, `1 - (2 - 2t)³ / 2` above
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Linear blend; exact at `t == 0` and `t == 1`
pub fn lerp(start: f64, target: f64, t: f64) -> f64 {
    start + (target - start) * t
}

/// One dot's state at an instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSample {
    /// Grid-space position
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Linear progress in `[0, 1]` before easing
    pub progress: f64,
}

impl PixelSample {
    pub fn is_done(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn color(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

/// Where a dot is and what color it has `elapsed` ms into its transition
pub fn evaluate(pixel: &TransitionPixel, elapsed: f64) -> PixelSample {
    let pixel_elapsed = elapsed - pixel.start_delay;
    let progress = if pixel.pixel_duration > 0.0 {
        (pixel_elapsed / pixel.pixel_duration).clamp(0.0, 1.0)
    } else if pixel_elapsed >= 0.0 {
        1.0
    } else {
        0.0
    };
    let eased = ease_in_out_cubic(progress);

    let c = &pixel.correspondence;
    let channel = |i: usize| lerp(c.source_color[i] as f64, c.target_color[i] as f64, eased);

    PixelSample {
        x: lerp(c.source.0 as f64, c.target.0 as f64, eased),
        y: lerp(c.source.1 as f64, c.target.1 as f64, eased),
        r: channel(0),
        g: channel(1),
        b: channel(2),
        progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::types::PixelCorrespondence;

    #[test]
    fn test_ease_fixed_points() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn test_ease_monotonic() {
        let mut last = ease_in_out_cubic(0.0);
        for i in 1..=1000 {
            let value = ease_in_out_cubic(i as f64 / 1000.0);
            assert!(value >= last, "ease decreased at step {}", i);
            last = value;
        }
    }

    #[test]
    fn test_ease_continuous_at_half() {
        let below = ease_in_out_cubic(0.5 - 1e-9);
        assert!((below - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_single_cell_identity_endpoints() {
        let pixel = TransitionPixel {
            correspondence: PixelCorrespondence::identity(0, 0, [10, 20, 30], [12, 22, 28]),
            start_delay: 0.0,
            pixel_duration: 7200.0,
        };

        let start = evaluate(&pixel, 0.0);
        assert_eq!(start.color(), [10.0, 20.0, 30.0]);
        assert_eq!((start.x, start.y), (0.0, 0.0));
        assert!(!start.is_done());

        let end = evaluate(&pixel, 7200.0);
        assert_eq!(end.color(), [12.0, 22.0, 28.0]);
        assert!(end.is_done());
    }

    #[test]
    fn test_single_cell_matched_and_scheduled() {
        use crate::config::TimingConfig;
        use crate::snapshot::{GridSize, Snapshot};
        use crate::transition::{CorrespondenceMatcher, TransitionScheduler};
        use rand::{rngs::SmallRng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(21);
        let size = GridSize::new(1, 1);
        let snapshot = Snapshot::filled(size, [40, 80, 120]);
        let (pairs, _) = CorrespondenceMatcher::new(30.0).correspond(&snapshot, &snapshot, &mut rng);
        let timing = TimingConfig {
            duration_jitter: 0.0,
            ..TimingConfig::default()
        };
        let set = TransitionScheduler::from_timing(&timing).schedule(size, pairs, &mut rng);

        let pixel = set.pixels()[0];
        assert!(pixel.correspondence.is_identity());
        assert_eq!(evaluate(&pixel, 0.0).color(), [40.0, 80.0, 120.0]);

        let end = evaluate(&pixel, pixel.pixel_duration);
        assert_eq!(end.color(), [40.0, 80.0, 120.0]);
        assert!(end.is_done());
    }

    #[test]
    fn test_delay_holds_dot_at_source() {
        let pixel = TransitionPixel {
            correspondence: PixelCorrespondence {
                source: (4, 0),
                target: (0, 2),
                source_color: [0, 0, 0],
                target_color: [200, 100, 50],
            },
            start_delay: 300.0,
            pixel_duration: 1000.0,
        };

        let waiting = evaluate(&pixel, 250.0);
        assert_eq!((waiting.x, waiting.y), (4.0, 0.0));
        assert_eq!(waiting.progress, 0.0);

        let halfway = evaluate(&pixel, 800.0);
        assert_eq!(halfway.progress, 0.5);
        assert_eq!((halfway.x, halfway.y), (2.0, 1.0));
        assert_eq!(halfway.color(), [100.0, 50.0, 25.0]);

        let past = evaluate(&pixel, 5000.0);
        assert_eq!((past.x, past.y), (0.0, 2.0));
        assert!(past.is_done());
    }

    #[test]
    fn test_zero_duration_snaps_once_started() {
        let pixel = TransitionPixel {
            correspondence: PixelCorrespondence::identity(1, 1, [0, 0, 0], [90, 90, 90]),
            start_delay: 10.0,
            pixel_duration: 0.0,
        };
        assert_eq!(evaluate(&pixel, 5.0).progress, 0.0);
        assert_eq!(evaluate(&pixel, 10.0).color(), [90.0, 90.0, 90.0]);
    }
}
