use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::compose::staging::{FrameStaging, StagingArea};
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::png::{decode_png, encode_png};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::Dimensions;
use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::layout::fingerprint::PoseFingerprint;
use crate::render::raster::FrameRGBA;
use crate::render::renderer::RenderedFrame;
use crate::store::artifact::{Artifact, ArtifactFormat, ArtifactKind};

/// Capture and encoding parameters for one animation size class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationProfile {
    pub name: &'static str,
    pub frame_count: u32,
    /// Display time of each GIF frame.
    pub frame_delay_ms: u32,
    /// Device pixels per CSS pixel.
    pub device_scale: u32,
    /// Span of animation time sampled across all frames.
    pub duration_ms: u32,
    /// GIF quantizer speed, 1 (best) to 30 (fastest).
    pub quantizer_speed: i32,
}

impl AnimationProfile {
    pub const LARGE: Self = Self {
        name: "large",
        frame_count: 60,
        frame_delay_ms: 33,
        device_scale: 1,
        duration_ms: 2000,
        quantizer_speed: 10,
    };

    pub const SMALL: Self = Self {
        name: "small",
        frame_count: 45,
        frame_delay_ms: 40,
        device_scale: 2,
        duration_ms: 2500,
        quantizer_speed: 1,
    };

    /// Profile used for a creative size.
    pub fn for_dimensions(dims: Dimensions) -> Self {
        if dims.width <= 300 && dims.height <= 250 {
            Self::SMALL
        } else {
            Self::LARGE
        }
    }

    /// Animation time of frame `i`: `i * (duration / frame_count)`.
    pub fn frame_offsets_ms(&self) -> Vec<f64> {
        if self.frame_count == 0 {
            return Vec::new();
        }
        let step = f64::from(self.duration_ms) / f64::from(self.frame_count);
        (0..self.frame_count).map(|i| f64::from(i) * step).collect()
    }
}

/// Scrubs a stable page through time and encodes the frames into a looping GIF.
#[derive(Clone, Debug)]
pub struct AnimationCompositor {
    frame_timeout: Duration,
}

impl AnimationCompositor {
    pub fn new(frame_timeout: Duration) -> Self {
        Self { frame_timeout }
    }

    /// Capture every profile frame in time order and stage the GIF.
    ///
    /// Any frame failure aborts with [`AdcraftError::FrameCapture`]; no partial GIF is kept and
    /// the frame directory is removed on every path.
    #[tracing::instrument(skip_all, fields(profile = profile.name))]
    pub async fn capture_animation(
        &self,
        frame: &mut RenderedFrame,
        profile: &AnimationProfile,
        staging: &StagingArea,
    ) -> AdcraftResult<Artifact> {
        let speed = profile.quantizer_speed;
        self.capture_animation_with(frame, profile, staging, |out: &Path| -> Box<dyn FrameSink> {
            Box::new(GifSink::new(GifSinkOpts::new(out, speed)))
        })
        .await
    }

    /// Same as [`Self::capture_animation`], encoding into the sink built by `make_sink` for the
    /// staged output path.
    pub(crate) async fn capture_animation_with(
        &self,
        frame: &mut RenderedFrame,
        profile: &AnimationProfile,
        staging: &StagingArea,
        make_sink: impl FnOnce(&Path) -> Box<dyn FrameSink>,
    ) -> AdcraftResult<Artifact> {
        let dims = frame.viewport();
        let frames = staging.frame_staging(dims).await?;
        let output = staging.animation_output(dims).await?;

        let sink = make_sink(output.path());
        let result = self.encode_frames(frame, profile, &frames, sink).await;
        let cleanup = frames.cleanup().await;

        match (result, cleanup) {
            (Ok(()), Ok(())) => {}
            (Ok(()), Err(e)) => return Err(e),
            (Err(e), cleanup) => {
                if let Err(c) = cleanup {
                    warn!(error = %c, "frame staging cleanup failed after capture error");
                }
                return Err(e);
            }
        }

        let local_path = output.keep();
        info!(
            path = %local_path.display(),
            frames = profile.frame_count,
            size = %dims,
            "animation staged"
        );
        Ok(Artifact {
            kind: ArtifactKind::Animated,
            format: ArtifactFormat::Gif,
            local_path,
            remote_url: None,
            size_key: dims.key(),
            frame_count: Some(profile.frame_count),
        })
    }

    async fn encode_frames(
        &self,
        frame: &mut RenderedFrame,
        profile: &AnimationProfile,
        frames: &FrameStaging,
        mut sink: Box<dyn FrameSink>,
    ) -> AdcraftResult<()> {
        if profile.frame_count == 0 {
            return Err(AdcraftError::validation("animation profile has no frames"));
        }
        let (width, height) = frame.page().pixel_size();
        sink.begin(SinkConfig {
            width,
            height,
            frame_delay_ms: profile.frame_delay_ms,
            frame_count: profile.frame_count,
        })?;

        let mut previous: Option<FrameCapture> = None;
        let mut reused = 0u32;
        for (index, t_ms) in (0u32..).zip(profile.frame_offsets_ms()) {
            let fingerprint = frame.pose_fingerprint(t_ms);
            let repeat = match (&previous, fingerprint) {
                (Some(prev), Some(fp)) if prev.fingerprint == fp => Some(prev.rgba.clone()),
                _ => None,
            };
            if repeat.is_some() {
                reused += 1;
            }
            let step = capture_one(frame, frames, sink, index, t_ms, repeat);
            sink = match tokio::time::timeout(self.frame_timeout, step).await {
                Ok(Ok((sink, rgba))) => {
                    previous = fingerprint.map(|fingerprint| FrameCapture { fingerprint, rgba });
                    sink
                }
                Ok(Err(e)) => return Err(AdcraftError::frame_capture(index, e.to_string())),
                Err(_) => {
                    return Err(AdcraftError::frame_capture(
                        index,
                        format!("timed out after {} ms", self.frame_timeout.as_millis()),
                    ));
                }
            };
            debug!(frame = index, t_ms, "frame appended");
        }

        if reused > 0 {
            debug!(reused, "unchanged frames reused");
        }
        tokio::task::spawn_blocking(move || sink.end())
            .await
            .map_err(|e| AdcraftError::render(format!("sink finalize task failed: {e}")))?
    }
}

/// Last painted frame and the poses it was painted from.
struct FrameCapture {
    fingerprint: PoseFingerprint,
    rgba: FrameRGBA,
}

/// Rasterize (or reuse `repeat`), stage as PNG, read back and append one frame.
async fn capture_one(
    frame: &mut RenderedFrame,
    frames: &FrameStaging,
    mut sink: Box<dyn FrameSink>,
    index: u32,
    t_ms: f64,
    repeat: Option<FrameRGBA>,
) -> AdcraftResult<(Box<dyn FrameSink>, FrameRGBA)> {
    let rgba = match repeat {
        Some(rgba) => rgba,
        None => frame.capture_at(t_ms).await?,
    };
    let painted = rgba.clone();
    let png = tokio::task::spawn_blocking(move || encode_png(&rgba))
        .await
        .map_err(|e| AdcraftError::render(format!("png encode task failed: {e}")))??;

    let path = frames.frame_path(index);
    tokio::fs::write(&path, &png).await?;
    let staged = tokio::fs::read(&path).await?;

    tokio::task::spawn_blocking(move || {
        let decoded = decode_png(&staged)?;
        sink.push_frame(index, &decoded)?;
        Ok((sink, painted))
    })
    .await
    .map_err(|e| AdcraftError::render(format!("frame append task failed: {e}")))?
}

#[cfg(test)]
#[path = "../../tests/unit/compose/animation.rs"]
mod tests;
