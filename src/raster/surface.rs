//! Raster surface capability and shared types.
//!
//! [`RasterSurface`] is the seam between the composition/convergence logic
//! and actual pixel work, mirroring an off-screen canvas: it can be resized,
//! given a rotation transform, filled, drawn into with signed extents, and
//! serialized to JPEG at a fractional quality.
//!
//! The production implementation is
//! [`PixmapSurface`](super::pixmap::PixmapSurface); tests use the recording
//! [`MockSurface`](tests::MockSurface).

use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("JPEG encode failed: {0}")]
    Encode(String),
}

/// Floor applied to lossy encode quality so the encoder parameter stays
/// valid no matter how far the convergence loop has stepped down.
pub const QUALITY_FLOOR: f32 = 0.05;

/// Lossy encode quality in (0, 1]. Clamped to [[`QUALITY_FLOOR`], 1] on
/// construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(f32);

impl Quality {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(QUALITY_FLOOR, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// The 1–100 integer scale JPEG encoders take.
    pub fn as_jpeg(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(0.9)
    }
}

/// An off-screen raster surface.
///
/// Draw semantics follow the canvas orientation trick: the caller sets a
/// rotation transform on the surface, then draws with extents whose signs
/// place the rotated image inside the (possibly dimension-swapped) surface
/// bounds. Resizing resets the transform.
pub trait RasterSurface {
    /// Resize the backing buffer. Clears the pixels and resets the rotation
    /// transform, like assigning a canvas width.
    fn set_size(&mut self, width: u32, height: u32);

    /// Add a clockwise rotation to the transform, in degrees (quarter turns).
    fn rotate(&mut self, degrees: u16);

    /// Fill the whole buffer with an opaque color.
    fn fill(&mut self, color: [u8; 3]);

    /// Draw an image with the given signed extents. The magnitudes select
    /// the resample size; the signs come from the orientation transform
    /// table and position the rotated draw inside the surface bounds.
    fn draw(&mut self, image: &DynamicImage, width: i64, height: i64);

    /// Serialize the buffer to JPEG bytes at the given quality.
    fn encode_jpeg(&self, quality: Quality) -> Result<Vec<u8>, SurfaceError>;

    /// Current backing buffer dimensions.
    fn size(&self) -> (u32, u32);
}
