//! Pixel source module
//!
//! This module describes where raw pixels come from: the runtime pixel
//! layout reported by the device, the `FrameSource` trait the converter
//! reads through, and the concrete memory-backed and fbdev-backed sources.

mod provider;
mod memory;
#[cfg(target_os = "linux")]
mod fbdev;
pub mod layout;

pub use provider::FrameSource;
pub use memory::MemorySource;
#[cfg(target_os = "linux")]
pub use fbdev::FbDevice;
pub use layout::{ChannelField, PixelDepth, PixelLayout};
