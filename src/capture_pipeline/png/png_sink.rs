use std::io::Write;

use tracing::debug;

use crate::capture_pipeline::common::error::{CaptureError, Result};
use crate::capture_pipeline::png::sink::ImageSink;
use crate::capture_pipeline::png::types::PngCompression;

/// Streaming PNG encoder sink.
///
/// Produces an 8-bit RGB, non-interlaced PNG, one scanline per `write_row`
/// call. The underlying encoder rejects zero-sized images, so a degenerate
/// capture geometry surfaces here as an `EncodeError` from `begin_image`.
pub struct PngSink<W: Write + 'static> {
    output: Option<W>,
    writer: Option<png::StreamWriter<'static, W>>,
    compression: PngCompression,
}

impl<W: Write + 'static> PngSink<W> {
    pub fn new(output: W, compression: PngCompression) -> Self {
        Self {
            output: Some(output),
            writer: None,
            compression,
        }
    }
}

impl<W: Write + 'static> ImageSink for PngSink<W> {
    fn begin_image(&mut self, width: u32, height: u32) -> Result<()> {
        let output = self
            .output
            .take()
            .ok_or_else(|| CaptureError::EncodeError("image already started".to_string()))?;

        debug!("Encoding PNG image: {}x{}", width, height);

        let mut encoder = png::Encoder::new(output, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(match self.compression {
            PngCompression::Default => png::Compression::Default,
            PngCompression::Fast => png::Compression::Fast,
            PngCompression::Best => png::Compression::Best,
        });

        let writer = encoder
            .write_header()
            .map_err(|e| CaptureError::EncodeError(e.to_string()))?;
        let stream = writer
            .into_stream_writer_with_size(width as usize * 3)
            .map_err(|e| CaptureError::EncodeError(e.to_string()))?;

        self.writer = Some(stream);
        Ok(())
    }

    fn write_row(&mut self, row: &[u8]) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| CaptureError::EncodeError("no image started".to_string()))?;
        writer
            .write_all(row)
            .map_err(|e| CaptureError::EncodeError(e.to_string()))
    }

    fn finish(&mut self) -> Result<()> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| CaptureError::EncodeError("no image started".to_string()))?;
        writer
            .finish()
            .map_err(|e| CaptureError::EncodeError(e.to_string()))?;
        debug!("PNG encoding complete");
        Ok(())
    }
}
