use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info};

use crate::{
    capture::CaptureDevice,
    config::Config,
    engine::{EngineEvent, TickReport, TransitionEngine},
    error::{ConfigError, MorphError, RenderError, Result},
    render::CanvasSurface,
    session::clock::FrameClock,
};

/// A resolution change injected at a fixed time, written `at_ms:fidelity`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledChange {
    pub at_ms: f64,
    pub fidelity: u32,
}

impl FromStr for ScheduledChange {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ConfigError::InvalidValue {
            key: "change".to_string(),
            value: s.to_string(),
        };

        let (at, fidelity) = s.split_once(':').ok_or_else(invalid)?;
        let at_ms: f64 = at.trim().parse().map_err(|_| invalid())?;
        let fidelity: u32 = fidelity.trim().parse().map_err(|_| invalid())?;
        if at_ms < 0.0 {
            return Err(invalid().into());
        }

        Ok(Self { at_ms, fidelity })
    }
}

/// Totals for a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: u64,
    pub transitions_started: u64,
    pub transitions_completed: u64,
    pub resets: u64,
    pub frames_rejected: u64,
}

/// Wires a capture device, the engine and a software canvas together
pub struct RenderSession {
    engine: TransitionEngine,
    device: Box<dyn CaptureDevice>,
    surface: CanvasSurface,
    clock: FrameClock,
    changes: Vec<ScheduledChange>,
}

impl RenderSession {
    /// Validate `config` and prepare a session; `seed` makes it reproducible
    pub fn new(
        config: Config,
        mut device: Box<dyn CaptureDevice>,
        canvas_width: u32,
        fps: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        config.validate()?;
        if fps <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "fps".to_string(),
                value: fps.to_string(),
            }.into());
        }

        let grid = config.grid.size();
        if device.grid() != grid {
            device.configure(grid);
        }

        let engine = match seed {
            Some(seed) => TransitionEngine::with_seed(config, canvas_width, seed),
            None => TransitionEngine::new(config, canvas_width),
        };
        let (width, height) = engine.canvas_size();
        if height == 0 {
            return Err(RenderError::InvalidCanvas { width, height }.into());
        }

        info!(
            "Session ready: {} device, {}x{} grid, {}x{} canvas at {} fps",
            device.name(),
            grid.width,
            grid.height,
            width,
            height,
            fps
        );

        Ok(Self {
            engine,
            device,
            surface: CanvasSurface::new(width, height),
            clock: FrameClock::new(fps),
            changes: Vec::new(),
        })
    }

    /// Inject resolution changes at fixed times
    pub fn with_changes(mut self, mut changes: Vec<ScheduledChange>) -> Self {
        changes.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        self.changes = changes;
        self
    }

    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    /// Render one frame and advance the clock
    pub fn step(&mut self) -> TickReport {
        let now = self.clock.now_ms();

        if let Some(data) = self.device.poll_frame(now) {
            self.engine.push_event(EngineEvent::frame(data));
        }

        while let Some(change) = self.changes.first().copied() {
            if change.at_ms > now {
                break;
            }
            self.changes.remove(0);
            debug!("Applying scheduled fidelity {} at {:.0}ms", change.fidelity, now);
            self.engine.push_event(EngineEvent::ResolutionChange { fidelity: change.fidelity });
        }

        let report = self.engine.tick(now, &mut self.surface);

        if let Some(grid) = self.engine.take_reconfigure() {
            self.device.configure(grid);
        }

        self.clock.advance();
        report
    }

    /// Run for `duration_ms`, saving each frame as a PNG in `output_dir` when given
    pub fn run(&mut self, duration_ms: f64, output_dir: Option<&Path>) -> Result<SessionSummary> {
        if let Some(dir) = output_dir {
            std::fs::create_dir_all(dir)?;
        }

        let mut frames = 0u64;
        while self.clock.now_ms() < duration_ms {
            let index = self.clock.frame();
            let report = self.step();
            frames += 1;

            if report.transition_started {
                debug!("Frame {}: transition started ({:?})", index, report.phase);
            }

            if let Some(dir) = output_dir {
                self.surface.save_png(dir.join(format!("frame_{:05}.png", index)))?;
            }
        }

        let stats = self.engine.stats();
        let summary = SessionSummary {
            frames,
            transitions_started: stats.transitions_started,
            transitions_completed: stats.transitions_completed,
            resets: stats.resets,
            frames_rejected: stats.frames_rejected,
        };

        info!(
            "Rendered {} frames: {} transitions started, {} completed, {} resets",
            summary.frames, summary.transitions_started, summary.transitions_completed, summary.resets
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::SyntheticCamera;
    use crate::engine::Phase;
    use crate::snapshot::GridSize;
    use tempfile::tempdir;

    fn fast_config() -> Config {
        let mut config = Config::default();
        config.grid.width = 8;
        config.grid.height = 6;
        config.timing.capture_interval = 1000.0;
        config.timing.min_pixel_duration = 600.0;
        config.timing.duration_jitter = 100.0;
        config.timing.safe_end_margin = 100.0;
        config.timing.initial_delay = 50.0;
        config
    }

    fn session(config: Config) -> RenderSession {
        let camera = SyntheticCamera::new(config.grid.size(), 5);
        RenderSession::new(config, Box::new(camera), 160, 20.0, Some(9)).unwrap()
    }

    #[test]
    fn test_parse_scheduled_change() {
        let change: ScheduledChange = "2500:3".parse().unwrap();
        assert_eq!(change, ScheduledChange { at_ms: 2500.0, fidelity: 3 });
        assert!("2500".parse::<ScheduledChange>().is_err());
        assert!("abc:1".parse::<ScheduledChange>().is_err());
        assert!("-5:1".parse::<ScheduledChange>().is_err());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = fast_config();
        config.grid.width = 0;
        let camera = SyntheticCamera::new(GridSize::new(8, 6), 1);
        assert!(RenderSession::new(config, Box::new(camera), 160, 20.0, None).is_err());
    }

    #[test]
    fn test_back_to_back_transitions() {
        let mut session = session(fast_config());
        let summary = session.run(3500.0, None).unwrap();

        assert_eq!(summary.frames, 70);
        assert!(summary.transitions_completed >= 2);
        assert!(summary.transitions_started > summary.transitions_completed);
        assert_eq!(session.engine().phase(), Phase::Transitioning);
    }

    #[test]
    fn test_scheduled_change_reconfigures_device() {
        let mut session = session(fast_config())
            .with_changes(vec![ScheduledChange { at_ms: 500.0, fidelity: 1 }]);
        let summary = session.run(1500.0, None).unwrap();

        assert_eq!(summary.resets, 1);
        assert_eq!(summary.frames_rejected, 0);
        assert_eq!(session.engine().grid(), GridSize::new(12, 9));
        assert!(session.engine().transition().map_or(false, |t| t.len() == 108));
    }

    #[test]
    fn test_writes_png_frames() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("frames");
        let mut session = session(fast_config());
        let summary = session.run(200.0, Some(&out)).unwrap();

        assert_eq!(summary.frames, 4);
        assert!(out.join("frame_00000.png").exists());
        assert!(out.join("frame_00003.png").exists());
        assert_eq!(session.surface().width(), 160);
    }
}
