use crate::capture_pipeline::source::layout::PixelLayout;

/// A readable region of raw pixels plus the descriptor for decoding them.
///
/// `read_pixel_word` is the single point where byte-offset arithmetic into
/// the underlying region happens. Sources with a fixed pan offset (fbdev's
/// xoffset/yoffset) fold it into the address here; the converter's own view
/// origin composes additively on top.
pub trait FrameSource {
    fn native_width(&self) -> u32;
    fn native_height(&self) -> u32;
    fn layout(&self) -> &PixelLayout;

    /// Raw little-endian pixel word at (column, row).
    ///
    /// Coordinates are not bounds-checked here; the checked `ViewGeometry`
    /// constructor keeps the conversion loop inside the native extent.
    fn read_pixel_word(&self, column: u32, row: u32) -> u32;
}
