//! Pipeline conversions module
//!
//! This module contains the view-geometry derivation and the scanline
//! conversion that turns a raw pixel source into PNG rows.

mod geometry;
mod fb_to_png;

#[cfg(test)]
mod tests;

pub use geometry::{ViewOptions, ViewGeometry};
pub use fb_to_png::CapturePipeline;
