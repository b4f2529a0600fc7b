//! Capture configuration types

/// PNG compression presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngCompression {
    /// Encoder default (good speed/size balance)
    Default,
    /// Fastest encoding, larger file
    Fast,
    /// Best compression, slower
    Best,
}

impl Default for PngCompression {
    fn default() -> Self {
        Self::Default
    }
}

/// Configuration for a framebuffer capture
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Compression preset for the PNG encoder
    pub compression: PngCompression,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            compression: PngCompression::Default,
        }
    }
}

impl CaptureConfig {
    pub fn builder() -> CaptureConfigBuilder {
        CaptureConfigBuilder::default()
    }
}

/// Builder for CaptureConfig
#[derive(Default)]
pub struct CaptureConfigBuilder {
    compression: Option<PngCompression>,
}

impl CaptureConfigBuilder {
    pub fn compression(mut self, compression: PngCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn build(self) -> CaptureConfig {
        let default = CaptureConfig::default();
        CaptureConfig {
            compression: self.compression.unwrap_or(default.compression),
        }
    }
}
