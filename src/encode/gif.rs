use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::encode::sink::{FrameSink, SinkConfig, check_frame};
use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::render::raster::FrameRGBA;

/// Options for [`GifSink`] output.
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF path.
    pub out_path: PathBuf,
    /// NeuQuant speed, 1 (best) to 30 (fastest).
    pub quantizer_speed: i32,
}

impl GifSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>, quantizer_speed: i32) -> Self {
        Self {
            out_path: out_path.into(),
            quantizer_speed: quantizer_speed.clamp(1, 30),
        }
    }
}

/// Sink that appends frames to an infinitely looping GIF as they arrive.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    cfg: Option<SinkConfig>,
    last_idx: Option<u32>,
    written: u32,
}

impl GifSink {
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            last_idx: None,
            written: 0,
        }
    }

    /// Frames appended so far.
    pub fn frames_written(&self) -> u32 {
        self.written
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> AdcraftResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(AdcraftError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(AdcraftError::validation(
                "gif sink width/height exceed the format limit",
            ));
        }
        if let Some(parent) = self.opts.out_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.opts.out_path)?;
        let mut encoder =
            GifEncoder::new_with_speed(BufWriter::new(file), self.opts.quantizer_speed);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| AdcraftError::render(format!("gif header write failed: {e}")))?;

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> AdcraftResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| AdcraftError::render("gif sink not started"))?;
        check_frame(cfg, self.last_idx, idx, frame)?;
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| AdcraftError::render("gif sink already finished"))?;

        let buf = RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
            .ok_or_else(|| AdcraftError::render("frame buffer does not match its size"))?;
        let delay = Delay::from_numer_denom_ms(cfg.frame_delay_ms, 1);
        encoder
            .encode_frame(Frame::from_parts(buf, 0, 0, delay))
            .map_err(|e| AdcraftError::render(format!("gif frame {idx} encode failed: {e}")))?;

        self.last_idx = Some(idx);
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> AdcraftResult<()> {
        // Dropping the encoder writes the trailer and flushes the file.
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| AdcraftError::render("gif sink not started"))?;
        drop(encoder);
        if self.written == 0 {
            return Err(AdcraftError::render("gif sink finished without frames"));
        }
        let len = std::fs::metadata(&self.opts.out_path)?.len();
        if len == 0 {
            return Err(AdcraftError::render(format!(
                "gif output '{}' is empty",
                self.opts.out_path.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
