/// Discrete inputs consumed by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A capture completed; flat row-major RGBA at the current grid size
    FrameReady { data: Vec<u8> },

    /// The canvas changed size; only draw geometry is affected
    Resize { width: u32, height: u32 },

    /// A fidelity input selecting a new grid resolution; discards everything
    /// in flight and restarts the capture bootstrap
    ResolutionChange { fidelity: u32 },
}

impl EngineEvent {
    pub fn frame(data: Vec<u8>) -> Self {
        Self::FrameReady { data }
    }
}
