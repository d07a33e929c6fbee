//! Depth effect pipeline module
//!
//! Turns a source image and an estimated depth map into a chromostereopsis
//! composite (near objects red, far objects blue) plus depth renderings for
//! inspection. Each processing stage lives in its own module; `conversions`
//! wires them together with TIFF input and export.

pub mod common;
pub mod resample;
pub mod normalize;
pub mod smoothing;
pub mod tone;
pub mod effect;
pub mod visualize;
pub mod model_space;
pub mod stats;
pub mod tiff;
pub mod conversions;

pub use common::{
    DepthGrid,
    LuminanceBuffer,
    PipelineError,
    RasterImage,
    Result,
};

pub use resample::{resample, resize, Interpolation};
pub use normalize::{normalize_min_max, normalize_slice, NormalizeOutcome};
pub use smoothing::{gaussian_blur, smooth};
pub use tone::adjust_tone;

pub use effect::{
    apply_effect,
    EffectParams,
    EffectParamsBuilder,
};

pub use visualize::{
    ColorMapKind,
    DepthVisualizer,
};

pub use model_space::{DepthEstimate, PreprocessInfo};
pub use stats::GridStats;

pub use tiff::{
    TiffCompression,
    ExportConfig,
    ExportConfigBuilder,
    RasterReader,
    RasterWriter,
    StandardTiffReader,
    StandardTiffWriter,
};

pub use conversions::{
    DepthEffectPipeline,
    EffectOutputs,
    PipelineConfig,
    PipelineConfigBuilder,
    PipelineTimings,
};
