use std::fs::File;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::depth_pipeline::{
    common::{DepthGrid, PipelineError, RasterImage, Result},
    conversions::{PipelineConfig, PipelineTimings},
    effect::{apply_effect, EffectParams},
    model_space::{prepare_depth, DepthEstimate},
    stats::log_stats,
    tiff::{RasterReader, RasterWriter, StandardTiffReader, StandardTiffWriter},
    visualize::{render_depth, ColorMapKind, DepthVisualizer},
};

pub const DEPTH_MAP_FILE: &str = "depth.tiff";
pub const EFFECT_FILE: &str = "effect.tiff";
pub const VISUALIZATION_FILE: &str = "depth_visualization.tiff";
pub const DEPTH_VALUES_FILE: &str = "depth_values.tiff";

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct EffectOutputs {
    /// Normalised depth at the source dimensions
    pub depth: DepthGrid,
    /// Grayscale rendering of `depth`
    pub depth_map: RasterImage,
    pub effect: RasterImage,
    /// `depth` rendered through the configured colormap
    pub visualization: RasterImage,
    pub timings: PipelineTimings,
}

/// Source image + depth estimate → chromostereopsis effect and depth renderings
pub struct DepthEffectPipeline<R: RasterReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: PipelineConfig,
    visualizer: DepthVisualizer,
}

impl DepthEffectPipeline<StandardTiffReader, StandardTiffWriter> {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_custom(StandardTiffReader, StandardTiffWriter, config)
    }
}

impl<R: RasterReader, W: RasterWriter> DepthEffectPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: PipelineConfig) -> Self {
        let visualizer = DepthVisualizer::new(config.colormap);
        Self {
            reader,
            writer,
            config,
            visualizer,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Runs the effect on already-decoded inputs.
    ///
    /// A missing source image or depth estimate is reported as
    /// [`PipelineError::UpstreamUnavailable`].
    pub fn process(
        &self,
        source: Option<&RasterImage>,
        estimate: Option<DepthEstimate>,
        params: &EffectParams,
    ) -> Result<EffectOutputs> {
        self.run(source, estimate, params, PipelineTimings::new())
    }

    #[instrument(skip_all)]
    fn run(
        &self,
        source: Option<&RasterImage>,
        estimate: Option<DepthEstimate>,
        params: &EffectParams,
        mut timings: PipelineTimings,
    ) -> Result<EffectOutputs> {
        let source = source.ok_or_else(|| PipelineError::UpstreamUnavailable("source image".into()))?;
        let estimate = estimate.ok_or_else(|| PipelineError::UpstreamUnavailable("depth estimate".into()))?;
        let (width, height) = (source.width(), source.height());

        {
            let _span = tracing::info_span!("validate_dimensions", width, height).entered();
            timings.time("validate_dimensions", || self.validate_dimensions(width, height))?;
        }

        let depth = {
            let _span = tracing::info_span!("prepare_depth").entered();
            log_stats("raw depth", &estimate.raw);
            timings.time("prepare_depth", || {
                prepare_depth(estimate.raw, estimate.preprocess.as_ref(), width, height)
            })?
        };
        log_stats("normalized depth", &depth);

        let effect = {
            let _span = tracing::info_span!("apply_effect").entered();
            timings.time("apply_effect", || apply_effect(source, depth.clone(), params))?
        };

        let depth_map = {
            let _span = tracing::info_span!("render_depth_map").entered();
            timings.time("render_depth_map", || {
                render_depth(&depth, width, height, ColorMapKind::Grayscale)
            })?
        };

        let visualization = {
            let _span = tracing::info_span!("render_visualization", colormap = %self.visualizer.colormap()).entered();
            timings.time("render_visualization", || self.visualizer.render(&depth, width, height))?
        };

        info!(
            width,
            height,
            total_ms = timings.total_duration().as_secs_f64() * 1000.0,
            "Depth effect complete"
        );

        Ok(EffectOutputs {
            depth,
            depth_map,
            effect,
            visualization,
            timings,
        })
    }

    /// Decodes a source image and a depth map, then runs [`process`](Self::process).
    ///
    /// The depth map is taken to be in source image space already.
    #[instrument(skip_all, fields(source_size = source_data.len(), depth_size = depth_data.len()))]
    pub fn convert(
        &self,
        source_data: &[u8],
        depth_data: &[u8],
        params: &EffectParams,
    ) -> Result<EffectOutputs> {
        if source_data.is_empty() {
            return Err(PipelineError::UpstreamUnavailable("source image is empty".into()));
        }
        if depth_data.is_empty() {
            return Err(PipelineError::UpstreamUnavailable("depth map is empty".into()));
        }

        info!("Starting depth effect conversion");
        let mut timings = PipelineTimings::new();

        let source = {
            let _span = tracing::info_span!("decode_source").entered();
            timings.time("decode_source", || self.reader.read_raster(source_data))?
        };

        let raw_depth = {
            let _span = tracing::info_span!("decode_depth").entered();
            timings.time("decode_depth", || self.reader.read_depth(depth_data))?
        };

        self.run(Some(&source), Some(DepthEstimate::new(raw_depth)), params, timings)
    }

    /// Writes the four outputs of a run into `output_dir`.
    pub fn write_outputs<P: AsRef<Path>>(&self, outputs: &mut EffectOutputs, output_dir: P) -> Result<()> {
        let output_dir = output_dir.as_ref();
        let export = &self.config.export;
        let EffectOutputs {
            depth,
            depth_map,
            effect,
            visualization,
            timings,
        } = outputs;

        let _span = tracing::info_span!("write_outputs", dir = %output_dir.display()).entered();
        timings.time("write_outputs", || -> Result<()> {
            let mut file = create_output(output_dir, DEPTH_MAP_FILE)?;
            self.writer.write_raster(depth_map, &mut file, export)?;

            let mut file = create_output(output_dir, EFFECT_FILE)?;
            self.writer.write_raster(effect, &mut file, export)?;

            let mut file = create_output(output_dir, VISUALIZATION_FILE)?;
            self.writer.write_raster(visualization, &mut file, export)?;

            let mut file = create_output(output_dir, DEPTH_VALUES_FILE)?;
            self.writer.write_depth(depth, &mut file, export)
        })
    }

    /// Reads a source image and depth map from disk and writes all outputs to
    /// `output_dir`, creating it if needed.
    #[instrument(skip_all)]
    pub fn convert_files<P: AsRef<Path>, Q: AsRef<Path>, O: AsRef<Path>>(
        &self,
        source_path: P,
        depth_path: Q,
        output_dir: O,
        params: &EffectParams,
    ) -> Result<EffectOutputs> {
        let source_path = source_path.as_ref();
        let depth_path = depth_path.as_ref();
        let output_dir = output_dir.as_ref();

        info!(
            source = %source_path.display(),
            depth = %depth_path.display(),
            output = %output_dir.display(),
            "Converting files"
        );

        let source_data = read_input(source_path)?;
        let depth_data = read_input(depth_path)?;

        std::fs::create_dir_all(output_dir).map_err(|e| {
            PipelineError::OutputWriteError(format!("{}: {}", output_dir.display(), e))
        })?;

        let mut outputs = self.convert(&source_data, &depth_data, params)?;
        self.write_outputs(&mut outputs, output_dir)?;

        Ok(outputs)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.visualizer.set_colormap(config.colormap);
        self.config = config;
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let _span = tracing::info_span!("read_input_file", path = %path.display()).entered();
    std::fs::read(path).map_err(|e| PipelineError::InputReadError(format!("{}: {}", path.display(), e)))
}

fn create_output(dir: &Path, name: &str) -> Result<File> {
    let path = dir.join(name);
    File::create(&path).map_err(|e| PipelineError::OutputWriteError(format!("{}: {}", path.display(), e)))
}
