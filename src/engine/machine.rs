use std::collections::VecDeque;

use rand::{rngs::SmallRng, SeedableRng};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    engine::events::EngineEvent,
    render::{geometry::fit_height, CellGeometry, RenderSurface},
    snapshot::{GridSize, Snapshot},
    transition::{evaluate, CorrespondenceMatcher, TransitionScheduler, TransitionSet},
};

/// Externally visible engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing captured yet
    Idle,
    /// First snapshot held, waiting out the initial delay
    AwaitingSecondFrame,
    /// Dots are moving
    Transitioning,
    /// Between transitions, waiting for the next capture
    Settled,
}

enum State {
    Idle,
    AwaitingSecondFrame { first_capture_at: f64 },
    Transitioning { set: TransitionSet, started_at: f64 },
    Settled,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Phase after the tick
    pub phase: Phase,
    /// Transition dots drawn this tick
    pub dots_drawn: usize,
    /// A new transition was built this tick
    pub transition_started: bool,
    /// The active transition finished this tick
    pub transition_completed: bool,
}

/// Running totals, mostly for logs and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub transitions_started: u64,
    pub transitions_completed: u64,
    pub resets: u64,
    pub frames_rejected: u64,
}

/// Drives dot-swarm transitions between successive captures
///
/// Bootstrap: the first frame becomes the previous snapshot, a second frame
/// is taken `initial_delay` later and the first transition starts. After
/// that, each finished transition rotates the new snapshot into the previous
/// slot and immediately starts the next one from a fresh capture.
pub struct TransitionEngine {
    config: Config,
    grid: GridSize,
    canvas: (u32, u32),
    matcher: CorrespondenceMatcher,
    scheduler: TransitionScheduler,
    rng: SmallRng,

    state: State,
    prev: Option<Snapshot>,
    next: Option<Snapshot>,
    latest_frame: Option<Snapshot>,
    pending: VecDeque<EngineEvent>,

    bootstrapped: bool,
    last_capture_at: f64,
    redraw_previous: bool,
    reconfigure: Option<GridSize>,
    stats: EngineStats,
}

impl TransitionEngine {
    /// Create an engine drawing onto a canvas `canvas_width` pixels wide,
    /// seeded from system entropy
    pub fn new(config: Config, canvas_width: u32) -> Self {
        Self::with_rng(config, canvas_width, SmallRng::from_entropy())
    }

    /// Create an engine whose randomness is fully reproducible
    pub fn with_seed(config: Config, canvas_width: u32, seed: u64) -> Self {
        Self::with_rng(config, canvas_width, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, canvas_width: u32, rng: SmallRng) -> Self {
        let grid = config.grid.size();
        let matcher = CorrespondenceMatcher::new(config.matching.tolerance);
        let scheduler = TransitionScheduler::from_timing(&config.timing);

        Self {
            canvas: (canvas_width, fit_height(canvas_width, grid)),
            grid,
            matcher,
            scheduler,
            rng,
            state: State::Idle,
            prev: None,
            next: None,
            latest_frame: None,
            pending: VecDeque::new(),
            bootstrapped: false,
            last_capture_at: 0.0,
            redraw_previous: false,
            reconfigure: None,
            stats: EngineStats::default(),
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::AwaitingSecondFrame { .. } => Phase::AwaitingSecondFrame,
            State::Transitioning { .. } => Phase::Transitioning,
            State::Settled => Phase::Settled,
        }
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Whether the first transition after a (re)start has completed
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// The active transition, if any
    pub fn transition(&self) -> Option<&TransitionSet> {
        match &self.state {
            State::Transitioning { set, .. } => Some(set),
            _ => None,
        }
    }

    pub fn previous_snapshot(&self) -> Option<&Snapshot> {
        self.prev.as_ref()
    }

    pub fn next_snapshot(&self) -> Option<&Snapshot> {
        self.next.as_ref()
    }

    pub fn geometry(&self) -> CellGeometry {
        CellGeometry::new(
            self.canvas.0,
            self.canvas.1,
            self.grid,
            self.config.render.diameter_adj,
            self.config.render.mirror,
        )
    }

    /// Queue an event for the next tick
    pub fn push_event(&mut self, event: EngineEvent) {
        self.pending.push_back(event);
    }

    /// Grid size the capture device should switch to, if a resolution
    /// change happened since the last call
    pub fn take_reconfigure(&mut self) -> Option<GridSize> {
        self.reconfigure.take()
    }

    /// Advance to `now` (ms) and draw the frame
    pub fn tick(&mut self, now: f64, surface: &mut dyn RenderSurface) -> TickReport {
        self.apply_pending(now);

        if surface.dimensions() != self.canvas {
            surface.resize(self.canvas.0, self.canvas.1);
        }

        let render = &self.config.render;
        surface.background(render.background, render.background_fader);

        if self.redraw_previous {
            self.redraw_previous = false;
            if let Some(prev) = &self.prev {
                draw_snapshot(prev, &self.geometry(), surface);
            }
        }

        let mut report = TickReport {
            phase: self.phase(),
            dots_drawn: 0,
            transition_started: false,
            transition_completed: false,
        };

        match self.state {
            State::Idle => {
                if let Some(frame) = self.capture() {
                    debug!("Captured first frame at {:.0}ms", now);
                    self.prev = Some(frame);
                    self.last_capture_at = now;
                    self.state = State::AwaitingSecondFrame { first_capture_at: now };
                }
            }
            State::AwaitingSecondFrame { first_capture_at } => {
                if now - first_capture_at > self.config.timing.initial_delay {
                    report.transition_started = self.begin_transition(now);
                }
            }
            State::Settled => {
                if self.bootstrapped && now - self.last_capture_at > self.config.timing.capture_interval {
                    report.transition_started = self.begin_transition(now);
                }
            }
            State::Transitioning { .. } => {}
        }

        if let State::Transitioning { set, started_at } = &self.state {
            let (drawn, all_done) = self.draw_transition(set, now - started_at, surface);
            report.dots_drawn = drawn;

            if all_done {
                report.transition_completed = true;
                if self.complete_transition(now) {
                    report.transition_started = true;
                }
            }
        }

        report.phase = self.phase();
        report
    }

    fn apply_pending(&mut self, now: f64) {
        while let Some(event) = self.pending.pop_front() {
            match event {
                EngineEvent::FrameReady { data } => match Snapshot::from_rgba(self.grid, &data) {
                    Ok(frame) => self.latest_frame = Some(frame),
                    Err(e) => {
                        self.stats.frames_rejected += 1;
                        warn!("Dropping captured frame: {}", e);
                    }
                },
                EngineEvent::Resize { width, height } => {
                    debug!("Canvas resized to {}x{}", width, height);
                    self.canvas = (width, height);
                    if self.transition().is_none() && self.prev.is_some() {
                        self.redraw_previous = true;
                    }
                }
                EngineEvent::ResolutionChange { fidelity } => {
                    match GridSize::from_fidelity(self.config.grid.min_dots, fidelity) {
                        Some(grid) => self.reset(now, grid),
                        None => warn!("Ignoring resolution change to fidelity {}", fidelity),
                    }
                }
            }
        }
    }

    /// Discard all in-flight state and restart the bootstrap at `grid`
    fn reset(&mut self, now: f64, grid: GridSize) {
        info!(
            "Resolution change: {}x{} -> {}x{}, discarding {} active dots",
            self.grid.width,
            self.grid.height,
            grid.width,
            grid.height,
            self.transition().map_or(0, TransitionSet::len)
        );

        self.grid = grid;
        self.canvas.1 = fit_height(self.canvas.0, grid);
        self.state = State::Idle;
        self.prev = None;
        self.next = None;
        self.latest_frame = None;
        self.bootstrapped = false;
        self.last_capture_at = now;
        self.redraw_previous = false;
        self.reconfigure = Some(grid);
        self.stats.resets += 1;
    }

    fn capture(&self) -> Option<Snapshot> {
        self.latest_frame.clone()
    }

    /// Capture a new `next` snapshot and build a transition towards it.
    /// Leaves the state untouched when either snapshot is missing.
    fn begin_transition(&mut self, now: f64) -> bool {
        let Some(frame) = self.capture() else {
            return false;
        };
        self.next = Some(frame);
        self.last_capture_at = now;

        let (Some(prev), Some(next)) = (&self.prev, &self.next) else {
            return false;
        };

        let (pairs, match_stats) = self.matcher.correspond(prev, next, &mut self.rng);
        let set = self.scheduler.schedule(next.size(), pairs, &mut self.rng);

        debug!(
            "Matched {} dots: {} kept, {} searched, {} random, {} stationary",
            match_stats.total(),
            match_stats.identity,
            match_stats.searched,
            match_stats.random_fallback,
            match_stats.stationary
        );

        self.stats.transitions_started += 1;
        info!(
            "Transition {} started at {:.0}ms with {} dots",
            self.stats.transitions_started,
            now,
            set.len()
        );

        self.state = State::Transitioning { set, started_at: now };
        true
    }

    /// Rotate `next` into `prev` and start the following transition
    fn complete_transition(&mut self, now: f64) -> bool {
        self.stats.transitions_completed += 1;
        debug!("Transition {} completed at {:.0}ms", self.stats.transitions_completed, now);

        self.state = State::Settled;
        if let Some(next) = self.next.take() {
            self.prev = Some(next);
        }

        if !self.bootstrapped {
            self.bootstrapped = true;
            self.last_capture_at = now - self.config.timing.initial_delay;
        }

        self.begin_transition(now)
    }

    fn draw_transition(
        &self,
        set: &TransitionSet,
        elapsed: f64,
        surface: &mut dyn RenderSurface,
    ) -> (usize, bool) {
        let geometry = self.geometry();

        if self.config.render.underlay_previous {
            if let Some(prev) = &self.prev {
                draw_snapshot(prev, &geometry, surface);
            }
        }

        let mut all_done = true;
        for pixel in set.iter() {
            let sample = evaluate(pixel, elapsed);
            if !sample.is_done() {
                all_done = false;
            }

            let (cx, cy) = geometry.center(sample.x, sample.y);
            surface.fill_color(sample.r, sample.g, sample.b);
            surface.draw_circle(cx, cy, geometry.diameter);
        }

        (set.len(), all_done)
    }
}

fn draw_snapshot(snapshot: &Snapshot, geometry: &CellGeometry, surface: &mut dyn RenderSurface) {
    for (x, y, [r, g, b]) in snapshot.cells() {
        let (cx, cy) = geometry.center(x as f64, y as f64);
        surface.fill_color(r as f64, g as f64, b as f64);
        surface.draw_circle(cx, cy, geometry.diameter);
    }
}
