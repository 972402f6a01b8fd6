use tracing::info;

use crate::compose::staging::StagingArea;
use crate::encode::png::encode_png;
use crate::foundation::error::{AdcraftError, AdcraftResult};
use crate::render::renderer::RenderedFrame;
use crate::store::artifact::{Artifact, ArtifactFormat, ArtifactKind};

/// Capture the stable page once at `t = 0` and stage it as a PNG.
pub async fn capture_static(
    frame: &mut RenderedFrame,
    staging: &StagingArea,
) -> AdcraftResult<Artifact> {
    let dims = frame.viewport();
    let output = staging.still_output(dims).await?;

    let rgba = frame.capture_at(0.0).await?;
    let png = tokio::task::spawn_blocking(move || encode_png(&rgba))
        .await
        .map_err(|e| AdcraftError::render(format!("png encode task failed: {e}")))??;
    tokio::fs::write(output.path(), &png).await?;

    let local_path = output.keep();
    info!(path = %local_path.display(), bytes = png.len(), size = %dims, "still staged");
    Ok(Artifact {
        kind: ArtifactKind::Static,
        format: ArtifactFormat::Png,
        local_path,
        remote_url: None,
        size_key: dims.key(),
        frame_count: None,
    })
}
