//! adcraft renders templated ad creatives.
//!
//! A [`CreativeRequest`] names a size, images, colors and an approved phrase. The pipeline:
//!
//! - normalizes the phrase into a two-part caption
//! - resolves the layout template registered for the exact size and variant
//! - loads the layout into a render page, settles assets and shrinks text to fit
//! - captures a PNG still or a time-scrubbed looping GIF into local staging
//! - uploads the artifact and returns its public URL
//!
//! [`CreativePipeline`] is the entry point; the lower layers are exported for callers that want
//! to render without uploading.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod assets;
pub(crate) mod compose;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod store;
pub(crate) mod text;

pub(crate) mod catalog;
pub(crate) mod pipeline;
pub(crate) mod request;

pub use crate::foundation::core::{Dimensions, Point, Rect, Rgba8Premul, Size, Variant, Vec2};
pub use crate::foundation::error::{AdcraftError, AdcraftResult};

pub use crate::assets::color::{CssColor, Palette, SIMILARITY_THRESHOLD};
pub use crate::assets::{AssetLoadWarning, AssetRole};
pub use crate::catalog::{AdCatalog, AdSize};
pub use crate::compose::animation::{AnimationCompositor, AnimationProfile};
pub use crate::compose::staging::StagingArea;
pub use crate::compose::still::capture_static;
pub use crate::config::{ObjectStoreConfig, PipelineConfig};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::layout::anim::{AnimationTrack, Ease, ElementPose, FillMode, Keyframe};
pub use crate::layout::document::{Element, ElementKind, FontDecl, LayoutDocument, Slot};
pub use crate::layout::fingerprint::PoseFingerprint;
pub use crate::layout::registry::TemplateRegistry;
pub use crate::layout::templates::{TemplateFn, TemplateInput};
pub use crate::pipeline::{
    BatchImage, BatchItem, BatchRequest, CreativeOutput, CreativePipeline, MAX_BATCH_IMAGES,
    request_id,
};
pub use crate::render::page::{PageState, RenderPage};
pub use crate::render::pool::WorkerPool;
pub use crate::render::raster::FrameRGBA;
pub use crate::render::renderer::{FitRenderer, RenderedFrame};
pub use crate::request::CreativeRequest;
pub use crate::store::artifact::{Artifact, ArtifactFormat, ArtifactKind};
pub use crate::store::object::{AnyObjectStore, HttpObjectStore, LocalObjectStore, ObjectStore};
pub use crate::store::persist::{ArtifactOwner, ArtifactStore, artifact_key};
pub use crate::text::caption::{ProcessedCaption, process as process_phrase};
pub use crate::text::fit::{FitSpec, TextRole};
