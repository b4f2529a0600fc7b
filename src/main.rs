use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use fbsnap::capture_pipeline::{
    CaptureConfig, CapturePipeline, FbDevice, FrameSource, PngCompression, ViewOptions,
};
use fbsnap::logger;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompressionArg {
    Fast,
    Default,
    Best,
}

impl From<CompressionArg> for PngCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Fast => PngCompression::Fast,
            CompressionArg::Default => PngCompression::Default,
            CompressionArg::Best => PngCompression::Best,
        }
    }
}

/// Capture a framebuffer snapshot as a PNG image
#[derive(Parser, Debug)]
#[command(name = "fbsnap", version, about)]
struct Args {
    /// Framebuffer device to capture
    #[arg(short, long, default_value = "/dev/fb0")]
    device: PathBuf,

    /// Output PNG path
    #[arg(short = 'p', long, default_value = "fb.png")]
    output: PathBuf,

    /// Left edge of the capture region, in source pixels
    #[arg(short = 'x', long, default_value_t = 0)]
    offset_x: u32,

    /// Top edge of the capture region, in source pixels
    #[arg(short = 'y', long, default_value_t = 0)]
    offset_y: u32,

    /// Region width in source pixels (defaults to the screen width)
    #[arg(short = 'w', long)]
    width: Option<u32>,

    /// Region height in source pixels (defaults to the screen height)
    #[arg(long)]
    height: Option<u32>,

    /// Columns to skip between samples (0 captures every pixel)
    #[arg(short = 't', long, default_value_t = 0)]
    x_skip: u32,

    /// Rows to skip between samples (0 captures every row)
    #[arg(short = 's', long, default_value_t = 0)]
    y_skip: u32,

    /// PNG compression preset
    #[arg(short = 'z', long, value_enum, default_value = "default")]
    compression: CompressionArg,
}

fn main() -> Result<()> {
    logger::init();
    let args = Args::parse();

    info!("Starting fbsnap...");

    let device = match FbDevice::open(&args.device) {
        Ok(device) => device,
        Err(e) => {
            error!("Cannot open framebuffer: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Framebuffer: {}x{} @ {} bpp",
        device.native_width(),
        device.native_height(),
        device.layout().depth().bits()
    );

    let config = CaptureConfig::builder()
        .compression(args.compression.into())
        .build();
    let pipeline = CapturePipeline::new(config);

    let options = ViewOptions {
        offset_x: args.offset_x,
        offset_y: args.offset_y,
        width: args.width,
        height: args.height,
        x_skip: args.x_skip,
        y_skip: args.y_skip,
    };

    match pipeline.capture_to_file(&device, &options, &args.output) {
        Ok(_) => info!("Snapshot written to {}", args.output.display()),
        Err(e) => {
            error!("Capture failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
