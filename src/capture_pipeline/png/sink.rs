use crate::capture_pipeline::common::error::Result;

/// Receives a converted image as a header followed by rows.
///
/// The converter calls `begin_image` exactly once, then `write_row` once per
/// output row in top-to-bottom order (each row `width * 3` bytes of
/// interleaved 8-bit R,G,B), then `finish` once. The row slice is only valid
/// for the duration of the call; implementations must not hold on to it.
pub trait ImageSink {
    fn begin_image(&mut self, width: u32, height: u32) -> Result<()>;
    fn write_row(&mut self, row: &[u8]) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}
