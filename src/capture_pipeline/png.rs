//! PNG writing module
//!
//! This module provides the encoding-sink seam of the pipeline and its PNG
//! implementation with selectable compression.

mod sink;
mod png_sink;
pub mod types;

pub use sink::ImageSink;
pub use png_sink::PngSink;
pub use types::{PngCompression, CaptureConfig, CaptureConfigBuilder};
