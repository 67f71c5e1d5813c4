use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::debug;

use crate::capture::CaptureDevice;
use crate::snapshot::{color::hsv_to_rgb, GridSize, Rgb};

/// A colored disc drifting across the synthetic scene, in unit coordinates
#[derive(Debug, Clone)]
struct Disc {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    radius: f64,
    color: Rgb,
}

impl Disc {
    /// Position at `t` seconds, wrapping around the unit square
    fn position(&self, t: f64) -> (f64, f64) {
        ((self.x + self.vx * t).rem_euclid(1.0), (self.y + self.vy * t).rem_euclid(1.0))
    }
}

/// Procedural stand-in for a webcam
///
/// Renders a slowly rotating hue gradient with a few discs drifting over it.
/// Frames are a pure function of the seed, the grid size and the time, so a
/// session driven by it is fully reproducible.
pub struct SyntheticCamera {
    seed: u64,
    grid: GridSize,
    discs: Vec<Disc>,
}

impl SyntheticCamera {
    pub fn new(grid: GridSize, seed: u64) -> Self {
        let mut camera = Self {
            seed,
            grid,
            discs: Vec::new(),
        };
        camera.spawn_discs();
        camera
    }

    fn spawn_discs(&mut self) {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let count = rng.gen_range(3..=6);
        self.discs = (0..count)
            .map(|_| Disc {
                x: rng.gen(),
                y: rng.gen(),
                vx: rng.gen_range(-0.05..0.05),
                vy: rng.gen_range(-0.05..0.05),
                radius: rng.gen_range(0.08..0.2),
                color: hsv_to_rgb(rng.gen_range(0.0..360.0), 0.8, 0.95),
            })
            .collect();
    }

    /// Render the scene at `now_ms` as RGBA
    pub fn render(&self, now_ms: f64) -> Vec<u8> {
        let t = now_ms / 1000.0;
        let GridSize { width, height } = self.grid;
        let mut data = Vec::with_capacity(self.grid.rgba_len());
        let positions: Vec<(f64, f64)> = self.discs.iter().map(|d| d.position(t)).collect();

        for y in 0..height {
            for x in 0..width {
                let u = (x as f64 + 0.5) / width as f64;
                let v = (y as f64 + 0.5) / height as f64;

                let hue = (t * 6.0 + u * 90.0 + v * 45.0) as f32;
                let mut color = hsv_to_rgb(hue, 0.35, 0.35);

                for (disc, &(dx, dy)) in self.discs.iter().zip(&positions) {
                    let du = u - dx;
                    let dv = v - dy;
                    if du * du + dv * dv <= disc.radius * disc.radius {
                        color = disc.color;
                    }
                }

                data.extend_from_slice(&[color[0], color[1], color[2], 255]);
            }
        }

        data
    }
}

impl CaptureDevice for SyntheticCamera {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn configure(&mut self, grid: GridSize) {
        debug!("Synthetic camera reconfigured to {}x{}", grid.width, grid.height);
        self.grid = grid;
    }

    fn grid(&self) -> GridSize {
        self.grid
    }

    fn poll_frame(&mut self, now_ms: f64) -> Option<Vec<u8>> {
        if self.grid.is_empty() {
            return None;
        }
        Some(self.render(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_length_matches_grid() {
        let mut camera = SyntheticCamera::new(GridSize::new(12, 9), 1);
        let frame = camera.poll_frame(0.0).unwrap();
        assert_eq!(frame.len(), 12 * 9 * 4);
        assert!(frame.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_same_seed_same_frames() {
        let mut a = SyntheticCamera::new(GridSize::new(8, 6), 42);
        let mut b = SyntheticCamera::new(GridSize::new(8, 6), 42);
        assert_eq!(a.poll_frame(1234.0), b.poll_frame(1234.0));
    }

    #[test]
    fn test_scene_changes_over_time() {
        let mut camera = SyntheticCamera::new(GridSize::new(16, 12), 3);
        let early = camera.poll_frame(0.0);
        let late = camera.poll_frame(20_000.0);
        assert_ne!(early, late);
    }

    #[test]
    fn test_configure_changes_frame_size() {
        let mut camera = SyntheticCamera::new(GridSize::new(12, 9), 1);
        camera.configure(GridSize::new(24, 18));
        assert_eq!(camera.grid(), GridSize::new(24, 18));
        assert_eq!(camera.poll_frame(0.0).unwrap().len(), 24 * 18 * 4);
    }

    #[test]
    fn test_empty_grid_yields_nothing() {
        let mut camera = SyntheticCamera::new(GridSize::new(0, 0), 1);
        assert!(camera.poll_frame(0.0).is_none());
    }
}
