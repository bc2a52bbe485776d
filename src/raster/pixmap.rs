//! Production raster surface backed by the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Resample | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Rotation | `image::imageops::rotate90` / `rotate180` / `rotate270` |
//! | Composite | `image::imageops::overlay` (alpha-aware) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` into a `Vec<u8>` |
//!
//! The backing buffer is RGBA so transparent sources composite correctly
//! over the background fill; the alpha channel is dropped at encode time
//! (JPEG carries none). A freshly sized buffer is opaque black, matching a
//! canvas flattened to JPEG without a fill.

use super::surface::{Quality, RasterSurface, SurfaceError};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage, imageops};

pub struct PixmapSurface {
    canvas: RgbaImage,
    rotation: u16,
}

impl PixmapSurface {
    pub fn new() -> Self {
        Self {
            canvas: RgbaImage::new(0, 0),
            rotation: 0,
        }
    }
}

impl Default for PixmapSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterSurface for PixmapSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
        self.rotation = 0;
    }

    fn rotate(&mut self, degrees: u16) {
        self.rotation = (self.rotation + degrees) % 360;
    }

    fn fill(&mut self, color: [u8; 3]) {
        let [r, g, b] = color;
        for pixel in self.canvas.pixels_mut() {
            *pixel = Rgba([r, g, b, 255]);
        }
    }

    fn draw(&mut self, image: &DynamicImage, width: i64, height: i64) {
        let draw_width = width.unsigned_abs().min(u32::MAX as u64) as u32;
        let draw_height = height.unsigned_abs().min(u32::MAX as u64) as u32;
        if draw_width == 0 || draw_height == 0 {
            return;
        }

        let resized = image
            .resize_exact(draw_width, draw_height, FilterType::Lanczos3)
            .to_rgba8();
        let rotated = match self.rotation {
            90 => imageops::rotate90(&resized),
            180 => imageops::rotate180(&resized),
            270 => imageops::rotate270(&resized),
            _ => resized,
        };
        imageops::overlay(&mut self.canvas, &rotated, 0, 0);
    }

    fn encode_jpeg(&self, quality: Quality) -> Result<Vec<u8>, SurfaceError> {
        let rgb = DynamicImage::ImageRgba8(self.canvas.clone()).to_rgb8();
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, quality.as_jpeg())
            .write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        Ok(buf)
    }

    fn size(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }
}
