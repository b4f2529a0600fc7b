use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("unsupported bit depth: {0} (only 16, 24 and 32 bits per pixel are supported)")]
    UnsupportedBitDepth(u32),

    #[error("{channel} channel has zero bit width")]
    ZeroWidthChannel { channel: &'static str },

    #[error("{channel} channel bitfield (width {width}, offset {offset}) does not fit in a {bits_per_pixel}-bit pixel")]
    ChannelOutOfRange {
        channel: &'static str,
        width: u32,
        offset: u32,
        bits_per_pixel: u32,
    },

    #[error("invalid capture geometry: {0}")]
    InvalidGeometry(String),

    #[error("capture region {width}x{height} at ({origin_x},{origin_y}) exceeds the {native_width}x{native_height} frame")]
    RegionOutOfBounds {
        origin_x: u32,
        origin_y: u32,
        width: u32,
        height: u32,
        native_width: u32,
        native_height: u32,
    },

    #[error("framebuffer device error: {0}")]
    DeviceError(String),

    #[error("failed to create output file: {0}")]
    OutputWriteError(String),

    #[error("failed to encode PNG image: {0}")]
    EncodeError(String),

    #[error("failed to write output row {row}: {reason}")]
    RowWriteError { row: u32, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CaptureError>;
