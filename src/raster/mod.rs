//! Raster pipeline: surface capability, composition, and size convergence.
//!
//! The module is split into:
//! - **Surface**: [`RasterSurface`] trait + [`Quality`] — the seam between
//!   logic and pixels, with a recording mock for tests
//! - **Pixmap**: production surface backed by the `image` crate
//! - **Compose**: pure dimension math + the orientation transform table
//! - **Converge**: the bounded quality/scale re-encode loop

pub mod compose;
pub mod converge;
pub mod pixmap;
pub mod surface;

pub use compose::{MAX_DIMENSION, fit_dimensions, parse_hex_color};
pub use converge::{ConvergeSettings, converge};
pub use pixmap::PixmapSurface;
pub use surface::{QUALITY_FLOOR, Quality, RasterSurface, SurfaceError};
