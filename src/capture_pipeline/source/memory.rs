use crate::capture_pipeline::source::layout::PixelLayout;
use crate::capture_pipeline::source::provider::FrameSource;

/// A `FrameSource` over a byte buffer already in memory.
///
/// Useful for capturing from raw dumps and as the test double for the
/// pipeline; it behaves exactly like a device source with a stable region.
#[derive(Debug, Clone)]
pub struct MemorySource {
    region: Vec<u8>,
    layout: PixelLayout,
    width: u32,
    height: u32,
    pan_x: u32,
    pan_y: u32,
}

impl MemorySource {
    pub fn new(region: Vec<u8>, layout: PixelLayout, width: u32, height: u32) -> Self {
        Self {
            region,
            layout,
            width,
            height,
            pan_x: 0,
            pan_y: 0,
        }
    }

    /// Sets a fixed pan offset, mirroring fbdev's virtual-scroll position.
    /// The offset is added to every coordinate the converter asks for.
    pub fn with_pan(mut self, pan_x: u32, pan_y: u32) -> Self {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
        self
    }
}

impl FrameSource for MemorySource {
    fn native_width(&self) -> u32 {
        self.width
    }

    fn native_height(&self) -> u32 {
        self.height
    }

    fn layout(&self) -> &PixelLayout {
        &self.layout
    }

    fn read_pixel_word(&self, column: u32, row: u32) -> u32 {
        self.layout
            .read_word(&self.region, self.pan_x + column, self.pan_y + row)
    }
}
