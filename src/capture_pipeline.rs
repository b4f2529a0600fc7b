//! Framebuffer capture pipeline module
//!
//! This module provides a structured approach to framebuffer snapshots,
//! with separate modules for pixel sources, PNG writing, and the scanline
//! conversion that connects them.

pub mod source;
pub mod png;
pub mod conversions;
pub mod common;

pub use common::{
    CaptureError,
    Result,
};

pub use source::{
    ChannelField,
    PixelDepth,
    PixelLayout,
    FrameSource,
    MemorySource,
};

#[cfg(target_os = "linux")]
pub use source::FbDevice;

pub use png::{
    PngCompression,
    CaptureConfig,
    CaptureConfigBuilder,
    ImageSink,
    PngSink,
};

pub use conversions::{
    ViewOptions,
    ViewGeometry,
    CapturePipeline,
};
