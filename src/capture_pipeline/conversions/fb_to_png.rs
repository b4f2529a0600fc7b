use tracing::{info, instrument};
use std::io::BufWriter;
use std::path::Path;

use crate::capture_pipeline::{
    common::error::{CaptureError, Result},
    conversions::geometry::{ViewGeometry, ViewOptions},
    png::{CaptureConfig, ImageSink, PngSink},
    source::{ChannelField, FrameSource},
};

/// Precomputed shift and mask for one channel, fixed before the pixel loop.
#[derive(Debug, Clone, Copy)]
struct ChannelMask {
    shift: u32,
    mask: u32,
}

impl ChannelMask {
    fn new(field: ChannelField) -> Self {
        Self {
            shift: field.offset,
            mask: field.mask(),
        }
    }

    /// Extracts the channel from a pixel word and rescales its native bit
    /// range to 0-255 (truncating integer arithmetic): a 5-bit channel's
    /// maximum of 31 maps to 255, not to a left-shifted 248.
    fn normalize(self, word: u32) -> u8 {
        let raw = (word >> self.shift) & self.mask;
        ((raw as u64 * 0xFF) / self.mask as u64) as u8
    }
}

/// Scanline converter: walks the selected region of a `FrameSource` and
/// streams normalized 8-bit RGB rows into an `ImageSink`.
pub struct CapturePipeline {
    config: CaptureConfig,
}

impl CapturePipeline {
    pub fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    /// Runs one capture: derive the geometry, announce the output size to
    /// the sink, then emit one row per iteration, reusing a single row
    /// buffer. Any sink failure aborts the remaining rows immediately.
    #[instrument(skip(self, source, options, sink))]
    pub fn capture<S: FrameSource, K: ImageSink>(
        &self,
        source: &S,
        options: &ViewOptions,
        sink: &mut K,
    ) -> Result<()> {
        info!("Starting framebuffer capture");

        let geometry = {
            let _span = tracing::info_span!("derive_geometry").entered();
            ViewGeometry::derive(options, source.native_width(), source.native_height())?
        };

        let output_width = geometry.output_width();
        let output_height = geometry.output_height();

        let layout = source.layout();
        let red = ChannelMask::new(layout.red());
        let green = ChannelMask::new(layout.green());
        let blue = ChannelMask::new(layout.blue());

        {
            let _span = tracing::info_span!(
                "begin_image",
                width = output_width,
                height = output_height
            )
            .entered();
            sink.begin_image(output_width, output_height)?;
        }

        let mut row_buffer = vec![0u8; output_width as usize * 3];

        {
            let _span = tracing::info_span!("convert_rows", rows = output_height).entered();
            for oy in 0..output_height {
                let source_row = geometry.origin_y() + oy * geometry.y_advance();
                let mut slot = 0;
                for ox in 0..output_width {
                    let source_column = geometry.origin_x() + ox * geometry.x_advance();
                    let word = source.read_pixel_word(source_column, source_row);
                    row_buffer[slot] = red.normalize(word);
                    row_buffer[slot + 1] = green.normalize(word);
                    row_buffer[slot + 2] = blue.normalize(word);
                    slot += 3;
                }
                sink.write_row(&row_buffer)
                    .map_err(|e| CaptureError::RowWriteError {
                        row: oy,
                        reason: e.to_string(),
                    })?;
            }
        }

        sink.finish()?;

        info!(
            width = output_width,
            height = output_height,
            "Capture complete"
        );
        Ok(())
    }

    /// Captures straight into a PNG file at `output_path`.
    #[instrument(skip(self, source, options, output_path))]
    pub fn capture_to_file<S: FrameSource, P: AsRef<Path>>(
        &self,
        source: &S,
        options: &ViewOptions,
        output_path: P,
    ) -> Result<()> {
        let output_path = output_path.as_ref();

        info!(output = %output_path.display(), "Capturing to file");

        let file = std::fs::File::create(output_path).map_err(|e| {
            CaptureError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;
        let mut sink = PngSink::new(BufWriter::new(file), self.config.compression);

        self.capture(source, options, &mut sink)
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CaptureConfig) {
        self.config = config;
    }
}
