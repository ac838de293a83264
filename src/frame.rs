/// Why a frame attempt did not reach the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The engine has not been created yet, or it has already been released
    NotInitialized,
    /// Another frame is still in progress on this surface
    Reentrant,
    /// The engine asked to stop running (shutting down)
    EngineStopped,
}

// Result of a single render attempt. None of these are errors: skipped frames are expected during
// startup, shutdown and nested event delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Scene and GUI were drawn and presented
    Drawn,
    /// Surface is not active; the engine was given idle time instead of drawing
    Idle,
    /// Nothing happened
    Skipped(SkipReason),
}

impl FrameOutcome {
    pub fn drew(&self) -> bool {
        matches!(self, FrameOutcome::Drawn)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, FrameOutcome::Skipped(_))
    }
}
