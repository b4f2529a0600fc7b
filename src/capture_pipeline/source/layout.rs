//! Runtime pixel layout types

use crate::capture_pipeline::common::error::{CaptureError, Result};

/// A contiguous channel bitfield inside a raw pixel word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelField {
    /// Number of bits occupied by the channel.
    pub width: u32,
    /// Bit offset of the channel within the pixel word.
    pub offset: u32,
}

impl ChannelField {
    pub fn new(width: u32, offset: u32) -> Self {
        Self { width, offset }
    }

    /// Bitmask covering the channel's value range, right-aligned.
    ///
    /// Doubles as the normalization denominator: the channel's maximum raw
    /// value maps to 255.
    pub fn mask(&self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    /// Extracts the raw channel value from a pixel word.
    pub fn extract(&self, word: u32) -> u32 {
        (word >> self.offset) & self.mask()
    }

    fn validate(&self, channel: &'static str, bits_per_pixel: u32) -> Result<()> {
        if self.width == 0 {
            return Err(CaptureError::ZeroWidthChannel { channel });
        }
        if self.offset + self.width > bits_per_pixel {
            return Err(CaptureError::ChannelOutOfRange {
                channel,
                width: self.width,
                offset: self.offset,
                bits_per_pixel,
            });
        }
        Ok(())
    }
}

/// Supported pixel word sizes.
///
/// Constructed fallibly from the bit count the device reports, so the word
/// read in the conversion loop is an exhaustive match with no runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelDepth {
    Bits16,
    Bits24,
    Bits32,
}

impl PixelDepth {
    pub fn from_bits(bits_per_pixel: u32) -> Result<Self> {
        match bits_per_pixel {
            16 => Ok(Self::Bits16),
            24 => Ok(Self::Bits24),
            32 => Ok(Self::Bits32),
            other => Err(CaptureError::UnsupportedBitDepth(other)),
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            Self::Bits16 => 16,
            Self::Bits24 => 24,
            Self::Bits32 => 32,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Bits16 => 2,
            Self::Bits24 => 3,
            Self::Bits32 => 4,
        }
    }
}

/// How raw pixel words are packed in the source region.
///
/// Validated once at construction; a layout that exists is safe to feed to
/// the conversion loop (no zero-width masks, no out-of-word bitfields).
#[derive(Debug, Clone, Copy)]
pub struct PixelLayout {
    depth: PixelDepth,
    row_stride_bytes: usize,
    red: ChannelField,
    green: ChannelField,
    blue: ChannelField,
}

impl PixelLayout {
    /// Builds a validated layout from device-reported values.
    ///
    /// `row_stride_bytes` is the byte distance between row starts and may
    /// exceed `width * bytes_per_pixel` when rows carry padding. Channel
    /// bitfields may overlap; the descriptor is trusted to describe the
    /// hardware.
    pub fn new(
        bits_per_pixel: u32,
        row_stride_bytes: usize,
        red: ChannelField,
        green: ChannelField,
        blue: ChannelField,
    ) -> Result<Self> {
        let depth = PixelDepth::from_bits(bits_per_pixel)?;
        red.validate("red", depth.bits())?;
        green.validate("green", depth.bits())?;
        blue.validate("blue", depth.bits())?;
        Ok(Self {
            depth,
            row_stride_bytes,
            red,
            green,
            blue,
        })
    }

    pub fn depth(&self) -> PixelDepth {
        self.depth
    }

    pub fn row_stride_bytes(&self) -> usize {
        self.row_stride_bytes
    }

    pub fn red(&self) -> ChannelField {
        self.red
    }

    pub fn green(&self) -> ChannelField {
        self.green
    }

    pub fn blue(&self) -> ChannelField {
        self.blue
    }

    /// Reads the little-endian pixel word at (column, row) from a raw byte
    /// region laid out per this descriptor.
    ///
    /// 24-bit pixels read exactly three bytes; the following byte is never
    /// touched. Callers are responsible for the coordinates being inside
    /// the region.
    pub fn read_word(&self, region: &[u8], column: u32, row: u32) -> u32 {
        let offset = column as usize * self.depth.bytes_per_pixel()
            + row as usize * self.row_stride_bytes;
        match self.depth {
            PixelDepth::Bits16 => {
                u16::from_le_bytes([region[offset], region[offset + 1]]) as u32
            }
            PixelDepth::Bits24 => {
                region[offset] as u32
                    | (region[offset + 1] as u32) << 8
                    | (region[offset + 2] as u32) << 16
            }
            PixelDepth::Bits32 => u32::from_le_bytes([
                region[offset],
                region[offset + 1],
                region[offset + 2],
                region[offset + 3],
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb565() -> PixelLayout {
        PixelLayout::new(
            16,
            4,
            ChannelField::new(5, 11),
            ChannelField::new(6, 5),
            ChannelField::new(5, 0),
        )
        .unwrap()
    }

    #[test]
    fn rejects_unsupported_bit_depth() {
        let c = ChannelField::new(8, 0);
        let result = PixelLayout::new(15, 0, c, c, c);
        assert!(matches!(
            result.unwrap_err(),
            CaptureError::UnsupportedBitDepth(15)
        ));
    }

    #[test]
    fn rejects_zero_width_channel() {
        let result = PixelLayout::new(
            32,
            0,
            ChannelField::new(8, 16),
            ChannelField::new(0, 8),
            ChannelField::new(8, 0),
        );
        assert!(matches!(
            result.unwrap_err(),
            CaptureError::ZeroWidthChannel { channel: "green" }
        ));
    }

    #[test]
    fn rejects_channel_past_word_end() {
        let result = PixelLayout::new(
            16,
            0,
            ChannelField::new(5, 12),
            ChannelField::new(6, 5),
            ChannelField::new(5, 0),
        );
        assert!(matches!(
            result.unwrap_err(),
            CaptureError::ChannelOutOfRange { channel: "red", .. }
        ));
    }

    #[test]
    fn mask_covers_channel_range() {
        assert_eq!(ChannelField::new(5, 11).mask(), 0x1F);
        assert_eq!(ChannelField::new(8, 16).mask(), 0xFF);
        assert_eq!(ChannelField::new(32, 0).mask(), u32::MAX);
    }

    #[test]
    fn extract_pulls_field_from_word() {
        let layout = rgb565();
        // R=31, G=0, B=0 -> 0xF800
        assert_eq!(layout.red().extract(0xF800), 31);
        assert_eq!(layout.green().extract(0xF800), 0);
        assert_eq!(layout.blue().extract(0xF800), 0);
        // G=63 -> 0x07E0
        assert_eq!(layout.green().extract(0x07E0), 63);
    }

    #[test]
    fn reads_16_bit_words_little_endian() {
        let layout = rgb565();
        let region = [0x34, 0x12, 0x78, 0x56, 0xCD, 0xAB, 0x01, 0xEF];
        assert_eq!(layout.read_word(&region, 0, 0), 0x1234);
        assert_eq!(layout.read_word(&region, 1, 0), 0x5678);
        assert_eq!(layout.read_word(&region, 0, 1), 0xABCD);
    }

    #[test]
    fn reads_24_bit_words_without_touching_fourth_byte() {
        let layout = PixelLayout::new(
            24,
            6,
            ChannelField::new(8, 16),
            ChannelField::new(8, 8),
            ChannelField::new(8, 0),
        )
        .unwrap();
        let region = [0x11, 0x22, 0x33, 0xFF, 0xFF, 0xFF];
        assert_eq!(layout.read_word(&region, 0, 0), 0x33_2211);
        assert_eq!(layout.read_word(&region, 1, 0), 0xFFFFFF);
    }

    #[test]
    fn reads_32_bit_words_little_endian() {
        let layout = PixelLayout::new(
            32,
            8,
            ChannelField::new(8, 16),
            ChannelField::new(8, 8),
            ChannelField::new(8, 0),
        )
        .unwrap();
        let region = [0x78, 0x56, 0x34, 0x12, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(layout.read_word(&region, 0, 0), 0x12345678);
    }

    #[test]
    fn row_stride_can_exceed_pixel_width() {
        // 1 pixel per row, 16 bpp, 8-byte stride (padding after each row)
        let layout = PixelLayout::new(
            16,
            8,
            ChannelField::new(5, 11),
            ChannelField::new(6, 5),
            ChannelField::new(5, 0),
        )
        .unwrap();
        let mut region = [0u8; 16];
        region[8] = 0xAD;
        region[9] = 0xDE;
        assert_eq!(layout.read_word(&region, 0, 1), 0xDEAD);
    }
}
