use chromostereo_rs::depth_pipeline::{
    DepthEffectPipeline, DepthGrid, EffectParams, ExportConfig, PipelineConfig, PipelineError,
    RasterImage, RasterReader, RasterWriter, StandardTiffReader, StandardTiffWriter,
    TiffCompression,
};
use chromostereo_rs::depth_pipeline::conversions::{
    DEPTH_MAP_FILE, DEPTH_VALUES_FILE, EFFECT_FILE, VISUALIZATION_FILE,
};
use chromostereo_rs::depth_pipeline::visualize::ColorMapKind;

fn write_inputs(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let config = ExportConfig::builder().compression(TiffCompression::None).build();

    let source = RasterImage::solid(6, 4, [255, 255, 255]).unwrap();
    let source_path = dir.join("source.tiff");
    let mut file = std::fs::File::create(&source_path).unwrap();
    StandardTiffWriter.write_raster(&source, &mut file, &config).unwrap();

    // Left half far, right half near
    let depth = DepthGrid::from_rows(&[vec![0.0, 0.0, 1.0], vec![0.0, 0.0, 1.0]]).unwrap();
    let depth_path = dir.join("depth_in.tiff");
    let mut file = std::fs::File::create(&depth_path).unwrap();
    StandardTiffWriter.write_depth(&depth, &mut file, &config).unwrap();

    (source_path, depth_path)
}

#[test]
fn test_convert_files_writes_readable_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let (source_path, depth_path) = write_inputs(dir.path());
    let out_dir = dir.path().join("out");

    let config = PipelineConfig::builder().colormap(ColorMapKind::Plasma).build();
    let pipeline = DepthEffectPipeline::new(config);
    let outputs = pipeline
        .convert_files(&source_path, &depth_path, &out_dir, &EffectParams::default())
        .unwrap();

    let reader = StandardTiffReader;
    for name in [DEPTH_MAP_FILE, EFFECT_FILE, VISUALIZATION_FILE] {
        let bytes = std::fs::read(out_dir.join(name)).unwrap();
        let raster = reader.read_raster(&bytes).unwrap();
        assert_eq!((raster.width(), raster.height()), (6, 4), "{}", name);
    }

    let effect = reader
        .read_raster(&std::fs::read(out_dir.join(EFFECT_FILE)).unwrap())
        .unwrap();
    assert_eq!(effect, outputs.effect);
    let far = effect.pixel(0, 0);
    let near = effect.pixel(5, 3);
    assert!(far[2] > far[0]);
    assert!(near[0] > near[2]);

    let depth_values = reader
        .read_depth(&std::fs::read(out_dir.join(DEPTH_VALUES_FILE)).unwrap())
        .unwrap();
    assert!(depth_values.has_dimensions(6, 4));
    assert_eq!(depth_values.get(0, 0), 0.0);
    assert_eq!(depth_values.get(5, 0), 1.0);
    let values = depth_values.into_vec();
    assert_eq!(values.len(), 24);
    assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_empty_source_file_is_upstream_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let (_, depth_path) = write_inputs(dir.path());
    let empty = dir.path().join("empty.tiff");
    std::fs::write(&empty, b"").unwrap();

    let pipeline = DepthEffectPipeline::new(PipelineConfig::default());
    let result = pipeline.convert_files(&empty, &depth_path, dir.path(), &EffectParams::default());

    assert!(matches!(result, Err(PipelineError::UpstreamUnavailable(_))));
}

#[test]
fn test_eight_bit_depth_is_scaled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray.tiff");

    {
        let mut file = std::fs::File::create(&path).unwrap();
        let mut encoder = tiff::encoder::TiffEncoder::new(&mut file).unwrap();
        encoder
            .write_image::<tiff::encoder::colortype::Gray8>(2, 1, &[0, 255])
            .unwrap();
    }

    let depth = StandardTiffReader
        .read_depth(&std::fs::read(&path).unwrap())
        .unwrap();
    assert_eq!(depth.as_slice(), &[0.0, 1.0]);

    let raster = StandardTiffReader
        .read_raster(&std::fs::read(&path).unwrap())
        .unwrap();
    assert_eq!(raster.pixel(1, 0), [255, 255, 255, 255]);
}
