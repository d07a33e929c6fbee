use anyhow::Context;
use chromostereo_rs::depth_pipeline::{DepthEffectPipeline, EffectParams, PipelineConfig};
use chromostereo_rs::logger;

use tracing::info;

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting chromostereo...");

    let mut args = std::env::args().skip(1);
    let source = args.next().unwrap_or_else(|| "input.tiff".to_string());
    let depth = args.next().unwrap_or_else(|| "depth.tiff".to_string());
    let output_dir = args.next().unwrap_or_else(|| ".".to_string());

    let config = PipelineConfig::default();
    let pipeline = DepthEffectPipeline::new(config);

    info!("Depth effect pipeline initialized");
    info!("Compression: {:?}", pipeline.config().export.compression);
    info!("Visualization colormap: {}", pipeline.config().colormap);

    let params = EffectParams::default();
    let outputs = pipeline
        .convert_files(&source, &depth, &output_dir, &params)
        .with_context(|| format!("processing {} with depth {}", source, depth))?;

    outputs.timings.log_summary();
    info!("Outputs written to {}", output_dir);

    Ok(())
}
