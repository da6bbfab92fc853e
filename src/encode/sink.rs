use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::CountdownResult;
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame size in pixels.
    pub canvas: Canvas,
    /// Number of frames that will be pushed.
    pub frame_count: u32,
    /// Display time of each frame in milliseconds.
    pub frame_delay_ms: u32,
    /// Whether the animation repeats forever.
    pub looping: bool,
}

/// Per-frame display delay: one simulated second.
pub const FRAME_DELAY_MS: u32 = 1_000;

/// Sink contract for consuming frames in emission order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order, after
/// `begin` and before `end`. Nothing may be pushed after `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> CountdownResult<()>;
    /// Push one frame. The sink must not keep the frame after returning.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CountdownResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> CountdownResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> CountdownResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CountdownResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> CountdownResult<()> {
        self.ended = true;
        Ok(())
    }
}
