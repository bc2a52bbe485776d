//! Size convergence: the bounded re-encode loop.
//!
//! Starting from the capped dimensions at quality 0.90, the engine encodes,
//! checks the payload against the byte budget, and while over budget lowers
//! quality — by a big step when more than 2× over, a small step otherwise —
//! shrinks the raster by the caller's scale rate, and re-encodes. The loop
//! runs at most [`MAX_PASSES`] times and returns the last payload whether or
//! not the budget was met: non-convergence is a soft failure, and callers
//! needing a hard guarantee must check the payload size themselves.
//!
//! Payload size is the data-URL character length — a proxy that overstates
//! the true byte count by the base64 ratio plus the header, kept for
//! compatibility with budgets tuned against it.

use super::compose::{self, MAX_DIMENSION};
use super::surface::{Quality, RasterSurface, SurfaceError};
use crate::orientation::Orientation;
use crate::payload;
use image::DynamicImage;

/// Quality the first encode uses.
const INITIAL_QUALITY: f32 = 0.90;
/// Per-iteration quality decrement while at most 2x over budget.
const QUALITY_STEP: f32 = 0.03;
/// Per-iteration quality decrement while more than 2x over budget.
const QUALITY_STEP_BIG: f32 = 0.06;
/// Hard cap on loop iterations; the first encode is not counted.
const MAX_PASSES: u32 = 10;

/// Settings threaded through one convergence run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergeSettings {
    /// Byte budget the payload should fit. Must be positive.
    pub max_size_bytes: usize,
    /// Raster shrink factor applied each iteration.
    pub scale_rate: f64,
    /// Background painted under the first draw.
    pub fill: [u8; 3],
}

/// Re-encode `image` until the payload fits the budget or the pass cap is
/// hit, returning the last payload produced.
pub fn converge(
    surface: &mut impl RasterSurface,
    image: &DynamicImage,
    orientation: Orientation,
    settings: &ConvergeSettings,
) -> Result<String, SurfaceError> {
    let (mut width, mut height) = fit_dimensions_for(image);
    let mut quality = INITIAL_QUALITY;

    compose::compose(surface, image, width, height, orientation, settings.fill);
    let mut encoded = payload::to_data_url(&surface.encode_jpeg(Quality::new(quality))?);

    let mut passes = 0;
    while encoded.len() > settings.max_size_bytes && passes < MAX_PASSES {
        let over_double = encoded.len() as f64 / settings.max_size_bytes as f64 > 2.0;
        quality -= if over_double {
            QUALITY_STEP_BIG
        } else {
            QUALITY_STEP
        };
        quality = (quality * 100.0).round() / 100.0;

        width *= settings.scale_rate;
        height *= settings.scale_rate;

        compose::recompose(surface, image, width, height, orientation);
        encoded = payload::to_data_url(&surface.encode_jpeg(Quality::new(quality))?);
        passes += 1;

        log::debug!(
            "pass {passes}: {} of {} budget chars at {}x{}, quality {quality:.2}",
            encoded.len(),
            settings.max_size_bytes,
            width as i64,
            height as i64,
        );
    }

    Ok(encoded)
}

fn fit_dimensions_for(image: &DynamicImage) -> (f64, f64) {
    compose::fit_dimensions(
        image.width() as f64,
        image.height() as f64,
        MAX_DIMENSION,
        MAX_DIMENSION,
    )
}
