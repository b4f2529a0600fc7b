//! Capture view geometry

use crate::capture_pipeline::common::error::{CaptureError, Result};

/// User-facing capture region options.
///
/// Anything left unset falls back to the source's native value. Skips use
/// "every Nth" semantics: a skip of N samples one pixel and then skips N,
/// so skip 0 reads every pixel.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub offset_x: u32,
    pub offset_y: u32,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub x_skip: u32,
    pub y_skip: u32,
}

/// Validated traversal parameters for one capture.
///
/// Unlike the classic fbgrab-style tools, derivation checks that the origin
/// plus raw extent stays inside the source's native resolution instead of
/// reading whatever bytes happen to follow the region.
#[derive(Debug, Clone, Copy)]
pub struct ViewGeometry {
    origin_x: u32,
    origin_y: u32,
    raw_width: u32,
    raw_height: u32,
    x_advance: u32,
    y_advance: u32,
}

impl ViewGeometry {
    pub fn derive(options: &ViewOptions, native_width: u32, native_height: u32) -> Result<Self> {
        let raw_width = options.width.unwrap_or(native_width);
        let raw_height = options.height.unwrap_or(native_height);

        let x_advance = options
            .x_skip
            .checked_add(1)
            .ok_or_else(|| CaptureError::InvalidGeometry("x skip too large".to_string()))?;
        let y_advance = options
            .y_skip
            .checked_add(1)
            .ok_or_else(|| CaptureError::InvalidGeometry("y skip too large".to_string()))?;

        let x_end = options.offset_x.checked_add(raw_width);
        let y_end = options.offset_y.checked_add(raw_height);
        let in_bounds = matches!((x_end, y_end), (Some(x), Some(y))
            if x <= native_width && y <= native_height);
        if !in_bounds {
            return Err(CaptureError::RegionOutOfBounds {
                origin_x: options.offset_x,
                origin_y: options.offset_y,
                width: raw_width,
                height: raw_height,
                native_width,
                native_height,
            });
        }

        Ok(Self {
            origin_x: options.offset_x,
            origin_y: options.offset_y,
            raw_width,
            raw_height,
            x_advance,
            y_advance,
        })
    }

    pub fn origin_x(&self) -> u32 {
        self.origin_x
    }

    pub fn origin_y(&self) -> u32 {
        self.origin_y
    }

    pub fn x_advance(&self) -> u32 {
        self.x_advance
    }

    pub fn y_advance(&self) -> u32 {
        self.y_advance
    }

    /// Output columns after decimation (truncating). May be zero when the
    /// advance exceeds the raw extent; the sink decides whether an empty
    /// image is acceptable.
    pub fn output_width(&self) -> u32 {
        self.raw_width / self.x_advance
    }

    /// Output rows after decimation (truncating).
    pub fn output_height(&self) -> u32 {
        self.raw_height / self.y_advance
    }
}
