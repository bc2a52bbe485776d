//! Raster composition: dimension capping and the orientation transform.
//!
//! [`fit_dimensions`] is pure math — the aspect-preserving cap applied
//! before the first encode and re-derived as the convergence loop shrinks
//! the raster. [`prepare`] applies the orientation transform table to a
//! surface and hands back the signed draw extents; [`compose`] and
//! [`recompose`] bundle the prepare/fill/draw sequence the engine runs.
//!
//! ## Orientation transform table
//!
//! | orientation | surface dims | rotation | draw extents |
//! |---|---|---|---|
//! | tag 3 | swapped (h, w) | 270° | (−w, h) |
//! | tag 1 | swapped (h, w) | 90°  | (w, −h) |
//! | tag 8 | unswapped | 180° | (−w, −h) |
//! | other | unswapped | none | (w, h) |
//!
//! The rotation is set on the surface context before painting, and the draw
//! uses sign-flipped extents so the rotated image lands inside the (possibly
//! swapped) surface bounds — the standard trick for orientation-correct
//! rendering without a transform matrix.

use super::surface::RasterSurface;
use crate::orientation::Orientation;
use image::DynamicImage;

/// Bounding box edge the first composition caps to, in pixels.
pub const MAX_DIMENSION: f64 = 1280.0;

/// Cap dimensions to a bounding box, preserving aspect ratio.
///
/// Wider-than-box sources cap by width, taller ones by height. Only ever
/// shrinks; sources already inside the box (and degenerate zero-sized ones)
/// pass through unchanged. Carried as `f64` so repeated fractional scaling
/// by the convergence loop does not accumulate truncation.
pub fn fit_dimensions(width: f64, height: f64, max_width: f64, max_height: f64) -> (f64, f64) {
    let (mut w, mut h) = (width, height);
    if w > 0.0 && h > 0.0 {
        if w / h >= max_width / max_height {
            if w > max_width {
                h = h * max_width / w;
                w = max_width;
            }
        } else if h > max_height {
            w = w * max_height / h;
            h = max_height;
        }
    }
    (w, h)
}

/// Size and rotate a surface for the given orientation, returning the
/// signed draw extents for the subsequent [`RasterSurface::draw`] call.
///
/// Resizing resets any prior transform, so this can be re-run every
/// convergence iteration on the same surface.
pub fn prepare(
    surface: &mut impl RasterSurface,
    width: f64,
    height: f64,
    orientation: Orientation,
) -> (i64, i64) {
    let w = width as i64;
    let h = height as i64;
    match orientation {
        Orientation::ThreeQuarterTurn => {
            surface.set_size(h as u32, w as u32);
            surface.rotate(270);
            (-w, h)
        }
        Orientation::QuarterTurn => {
            surface.set_size(h as u32, w as u32);
            surface.rotate(90);
            (w, -h)
        }
        Orientation::HalfTurn => {
            surface.set_size(w as u32, h as u32);
            surface.rotate(180);
            (-w, -h)
        }
        Orientation::AsIs => {
            surface.set_size(w as u32, h as u32);
            (w, h)
        }
    }
}

/// First-pass composition: prepare, paint the background, draw the image.
pub fn compose(
    surface: &mut impl RasterSurface,
    image: &DynamicImage,
    width: f64,
    height: f64,
    orientation: Orientation,
    fill: [u8; 3],
) {
    let (draw_w, draw_h) = prepare(surface, width, height, orientation);
    surface.fill(fill);
    surface.draw(image, draw_w, draw_h);
}

/// Loop-pass composition: prepare and draw, no background fill.
pub fn recompose(
    surface: &mut impl RasterSurface,
    image: &DynamicImage,
    width: f64,
    height: f64,
    orientation: Orientation,
) {
    let (draw_w, draw_h) = prepare(surface, width, height, orientation);
    surface.draw(image, draw_w, draw_h);
}

/// Parse a CSS-style hex color (`#rgb` or `#rrggbb`).
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let digit = c.to_digit(16)? as u8;
                rgb[i] = digit * 16 + digit;
            }
            Some(rgb)
        }
        6 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(rgb)
        }
        _ => None,
    }
}
