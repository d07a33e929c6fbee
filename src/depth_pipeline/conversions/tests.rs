use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::depth_pipeline::common::error::{PipelineError, Result};
use crate::depth_pipeline::common::types::{DepthGrid, RasterImage};
use crate::depth_pipeline::conversions::{
    DepthEffectPipeline, PipelineConfig, DEPTH_MAP_FILE, DEPTH_VALUES_FILE, EFFECT_FILE,
    VISUALIZATION_FILE,
};
use crate::depth_pipeline::effect::EffectParams;
use crate::depth_pipeline::model_space::{DepthEstimate, PreprocessInfo};
use crate::depth_pipeline::tiff::{ExportConfig, RasterReader, RasterWriter, TiffCompression};
use crate::depth_pipeline::visualize::ColorMapKind;

struct MockReader {
    should_fail: bool,
    source: Option<RasterImage>,
    depth: Option<DepthGrid>,
}

impl MockReader {
    fn ok() -> Self {
        Self {
            should_fail: false,
            source: None,
            depth: None,
        }
    }
}

impl RasterReader for MockReader {
    fn read_raster(&self, _data: &[u8]) -> Result<RasterImage> {
        if self.should_fail {
            return Err(PipelineError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self
            .source
            .clone()
            .unwrap_or(RasterImage::solid(4, 4, [255, 255, 255])?))
    }

    fn read_depth(&self, _data: &[u8]) -> Result<DepthGrid> {
        if self.should_fail {
            return Err(PipelineError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self
            .depth
            .clone()
            .unwrap_or(DepthGrid::new(2, 2, vec![0.0, 0.0, 0.0, 1.0])?))
    }
}

#[derive(Default)]
struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<&'static str>>>,
}

impl RasterWriter for MockWriter {
    fn write_raster(&self, _image: &RasterImage, _output: &mut dyn Write, _config: &ExportConfig) -> Result<()> {
        if self.should_fail {
            return Err(PipelineError::EncodeError("Mock encode error".to_string()));
        }
        self.written.lock().unwrap().push("raster");
        Ok(())
    }

    fn write_depth(&self, _depth: &DepthGrid, _output: &mut dyn Write, _config: &ExportConfig) -> Result<()> {
        if self.should_fail {
            return Err(PipelineError::EncodeError("Mock encode error".to_string()));
        }
        self.written.lock().unwrap().push("depth");
        Ok(())
    }
}

fn mock_pipeline(config: PipelineConfig) -> DepthEffectPipeline<MockReader, MockWriter> {
    DepthEffectPipeline::with_custom(MockReader::ok(), MockWriter::default(), config)
}

#[test]
fn test_config_builder() {
    let config = PipelineConfig::builder()
        .validate_dimensions(false)
        .max_dimension(Some(10000))
        .colormap(ColorMapKind::Inferno)
        .export(ExportConfig::builder().compression(TiffCompression::None).build())
        .build();

    assert!(!config.validate_dimensions);
    assert_eq!(config.max_dimension, Some(10000));
    assert_eq!(config.colormap, ColorMapKind::Inferno);
    assert_eq!(config.export.compression, TiffCompression::None);
}

#[test]
fn test_successful_conversion() {
    let pipeline = mock_pipeline(PipelineConfig::default());

    let outputs = pipeline
        .convert(b"fake source", b"fake depth", &EffectParams::default())
        .unwrap();

    assert_eq!(outputs.depth.width(), 4);
    assert_eq!(outputs.depth.height(), 4);
    assert_eq!(outputs.effect.width(), 4);
    assert_eq!(outputs.depth_map.height(), 4);
    assert_eq!(outputs.visualization.width(), 4);

    let far = outputs.effect.pixel(0, 0);
    let near = outputs.effect.pixel(3, 3);
    assert!(far[2] > far[0]);
    assert!(near[0] > near[2]);

    for step in [
        "decode_source",
        "decode_depth",
        "validate_dimensions",
        "prepare_depth",
        "apply_effect",
        "render_depth_map",
        "render_visualization",
    ] {
        assert!(outputs.timings.get_step(step).is_some(), "missing {}", step);
    }
}

#[test]
fn test_reader_failure() {
    let reader = MockReader {
        should_fail: true,
        source: None,
        depth: None,
    };
    let pipeline = DepthEffectPipeline::with_custom(reader, MockWriter::default(), PipelineConfig::default());

    let result = pipeline.convert(b"fake source", b"fake depth", &EffectParams::default());

    assert!(matches!(result.unwrap_err(), PipelineError::DecodeError(_)));
}

#[test]
fn test_empty_input_is_upstream_unavailable() {
    let pipeline = mock_pipeline(PipelineConfig::default());
    let params = EffectParams::default();

    assert!(matches!(
        pipeline.convert(b"", b"fake depth", &params),
        Err(PipelineError::UpstreamUnavailable(_))
    ));
    assert!(matches!(
        pipeline.convert(b"fake source", b"", &params),
        Err(PipelineError::UpstreamUnavailable(_))
    ));
}

#[test]
fn test_missing_upstream_values() {
    let pipeline = mock_pipeline(PipelineConfig::default());
    let params = EffectParams::default();
    let source = RasterImage::solid(2, 2, [10, 10, 10]).unwrap();
    let estimate = DepthEstimate::new(DepthGrid::filled(2, 2, 0.5).unwrap());

    assert!(matches!(
        pipeline.process(None, Some(estimate), &params),
        Err(PipelineError::UpstreamUnavailable(_))
    ));
    assert!(matches!(
        pipeline.process(Some(&source), None, &params),
        Err(PipelineError::UpstreamUnavailable(_))
    ));
}

#[test]
fn test_dimension_validation_failure() {
    let config = PipelineConfig::builder()
        .validate_dimensions(true)
        .max_dimension(Some(2))
        .build();
    let pipeline = mock_pipeline(config);

    let result = pipeline.convert(b"fake source", b"fake depth", &EffectParams::default());

    assert!(matches!(result.unwrap_err(), PipelineError::InvalidDimensions(4, 4)));
}

#[test]
fn test_dimension_validation_disabled() {
    let config = PipelineConfig::builder()
        .validate_dimensions(false)
        .max_dimension(Some(2))
        .build();
    let pipeline = mock_pipeline(config);

    let result = pipeline.convert(b"fake source", b"fake depth", &EffectParams::default());

    assert!(result.is_ok());
}

#[test]
fn test_process_maps_cropped_depth_to_source() {
    let pipeline = mock_pipeline(PipelineConfig::default());
    let source = RasterImage::solid(8, 4, [200, 200, 200]).unwrap();
    let info = PreprocessInfo::for_square_input(8, 4, 2).unwrap();
    let raw = DepthGrid::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();

    let outputs = pipeline
        .process(
            Some(&source),
            Some(DepthEstimate::with_preprocess(raw, info)),
            &EffectParams::default(),
        )
        .unwrap();

    assert!(outputs.depth.has_dimensions(8, 4));
    assert!(outputs.depth.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_visualization_follows_config_colormap() {
    let mut pipeline = mock_pipeline(PipelineConfig::builder().colormap(ColorMapKind::Jet).build());
    let params = EffectParams::default();

    let outputs = pipeline.convert(b"fake source", b"fake depth", &params).unwrap();
    let [r, g, b] = ColorMapKind::Jet.map(0.0);
    assert_eq!(outputs.visualization.pixel(0, 0), [r, g, b, 255]);
    assert_eq!(outputs.depth_map.pixel(0, 0), [0, 0, 0, 255]);

    pipeline.set_config(PipelineConfig::builder().colormap(ColorMapKind::Inferno).build());
    let outputs = pipeline.convert(b"fake source", b"fake depth", &params).unwrap();
    let [r, g, b] = ColorMapKind::Inferno.map(0.0);
    assert_eq!(outputs.visualization.pixel(0, 0), [r, g, b, 255]);
}

#[test]
fn test_write_outputs_writes_every_file() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter {
        should_fail: false,
        written: written.clone(),
    };
    let pipeline = DepthEffectPipeline::with_custom(MockReader::ok(), writer, PipelineConfig::default());
    let dir = tempfile::tempdir().unwrap();

    let mut outputs = pipeline
        .convert(b"fake source", b"fake depth", &EffectParams::default())
        .unwrap();
    pipeline.write_outputs(&mut outputs, dir.path()).unwrap();

    assert_eq!(*written.lock().unwrap(), vec!["raster", "raster", "raster", "depth"]);
    for name in [DEPTH_MAP_FILE, EFFECT_FILE, VISUALIZATION_FILE, DEPTH_VALUES_FILE] {
        assert!(dir.path().join(name).exists(), "missing {}", name);
    }
    assert!(outputs.timings.get_step("write_outputs").is_some());
}

#[test]
fn test_writer_failure() {
    let writer = MockWriter {
        should_fail: true,
        written: Arc::default(),
    };
    let pipeline = DepthEffectPipeline::with_custom(MockReader::ok(), writer, PipelineConfig::default());
    let dir = tempfile::tempdir().unwrap();

    let mut outputs = pipeline
        .convert(b"fake source", b"fake depth", &EffectParams::default())
        .unwrap();
    let result = pipeline.write_outputs(&mut outputs, dir.path());

    assert!(matches!(result.unwrap_err(), PipelineError::EncodeError(_)));
}

#[test]
fn test_missing_input_file() {
    let pipeline = mock_pipeline(PipelineConfig::default());
    let dir = tempfile::tempdir().unwrap();

    let result = pipeline.convert_files(
        dir.path().join("missing.tiff"),
        dir.path().join("missing_depth.tiff"),
        dir.path(),
        &EffectParams::default(),
    );

    assert!(matches!(result.unwrap_err(), PipelineError::InputReadError(_)));
}
