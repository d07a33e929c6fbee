//! Pipeline conversions module
//!
//! Orchestrates decoding, depth preparation, the effect and the renderings,
//! and writes the results as TIFF files.

mod config;
mod depth_effect;
mod timing;

#[cfg(test)]
mod tests;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use depth_effect::{
    DepthEffectPipeline, EffectOutputs, DEPTH_MAP_FILE, DEPTH_VALUES_FILE, EFFECT_FILE,
    VISUALIZATION_FILE,
};
pub use timing::{PipelineTimings, StepTiming, Timer};
