//! Pipeline configuration

use crate::depth_pipeline::tiff::ExportConfig;
use crate::depth_pipeline::visualize::ColorMapKind;

/// Configuration for [`DepthEffectPipeline`](super::DepthEffectPipeline)
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Whether to validate source dimensions before processing
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<usize>,
    /// Colormap for the depth visualisation output
    pub colormap: ColorMapKind,
    pub export: ExportConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            validate_dimensions: true,
            max_dimension: Some(50000),
            colormap: ColorMapKind::Viridis,
            export: ExportConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    colormap: Option<ColorMapKind>,
    export: Option<ExportConfig>,
}

impl PipelineConfigBuilder {
    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn colormap(mut self, colormap: ColorMapKind) -> Self {
        self.colormap = Some(colormap);
        self
    }

    pub fn export(mut self, export: ExportConfig) -> Self {
        self.export = Some(export);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            colormap: self.colormap.unwrap_or(default.colormap),
            export: self.export.unwrap_or(default.export),
        }
    }
}
