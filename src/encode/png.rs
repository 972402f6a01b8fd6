use image::ImageEncoder as _;

use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::render::raster::FrameRGBA;

/// Encode a frame as an RGBA8 PNG (straight alpha).
pub(crate) fn encode_png(frame: &FrameRGBA) -> AdcraftResult<Vec<u8>> {
    let rgba = frame.to_straight_rgba8();
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            &rgba,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| AdcraftError::render(format!("png encode failed: {e}")))?;
    Ok(out)
}

/// Decode PNG bytes into a straight-alpha frame.
pub(crate) fn decode_png(bytes: &[u8]) -> AdcraftResult<FrameRGBA> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| AdcraftError::render(format!("png decode failed: {e}")))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(FrameRGBA {
        width,
        height,
        data: img.into_raw(),
        premultiplied: false,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
