/// Monotonic clock advancing one display frame at a time
#[derive(Debug, Clone)]
pub struct FrameClock {
    fps: f64,
    frame: u64,
}

impl FrameClock {
    pub fn new(fps: f64) -> Self {
        Self { fps, frame: 0 }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Index of the current frame
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Milliseconds elapsed at the current frame
    pub fn now_ms(&self) -> f64 {
        self.frame as f64 * 1000.0 / self.fps
    }

    /// Move to the next frame and return its time
    pub fn advance(&mut self) -> f64 {
        self.frame += 1;
        self.now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advances_by_frame_period() {
        let mut clock = FrameClock::new(25.0);
        assert_eq!(clock.now_ms(), 0.0);
        assert_eq!(clock.advance(), 40.0);
        assert_eq!(clock.advance(), 80.0);
        assert_eq!(clock.frame(), 2);
    }
}
