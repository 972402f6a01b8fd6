use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::render::raster::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Display time of each frame.
    pub frame_delay_ms: u32,
    /// Number of frames that will be pushed.
    pub frame_count: u32,
}

/// Sink contract for consuming captured frames in time order.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> AdcraftResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> AdcraftResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> AdcraftResult<()>;
}

/// Shared argument checks for sinks.
pub(crate) fn check_frame(
    cfg: &SinkConfig,
    last_idx: Option<u32>,
    idx: u32,
    frame: &FrameRGBA,
) -> AdcraftResult<()> {
    if let Some(last) = last_idx
        && idx <= last
    {
        return Err(AdcraftError::render(format!(
            "frame {idx} pushed after frame {last}; frames must be strictly increasing"
        )));
    }
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(AdcraftError::render(format!(
            "frame {idx} is {}x{}, sink expects {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    let expected = (cfg.width as usize)
        .saturating_mul(cfg.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(AdcraftError::render(format!(
            "frame {idx} buffer size mismatch"
        )));
    }
    Ok(())
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames in push order.
    pub(crate) frames: Vec<(u32, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(u32, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> AdcraftResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> AdcraftResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| AdcraftError::render("in-memory sink not started"))?;
        check_frame(cfg, self.frames.last().map(|(i, _)| *i), idx, frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> AdcraftResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
