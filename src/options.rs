//! Compression options: documented defaults plus sparse override merging.
//!
//! The configuration surface is programmatic — embedders construct options in
//! code (or deserialize a JSON-shaped [`CompressOverrides`]) rather than via
//! config files. Overrides are sparse: every field is optional, and anything
//! left unset keeps its default.
//!
//! ## Defaults
//!
//! ```text
//! remove_payload_header = false    # keep the data-URL prefix
//! max_size_mb           = 2.0      # byte budget = MB × 1024 × 1024
//! size_scale_rate       = 1.0      # per-iteration raster shrink factor
//! fill_color            = "#ffffff" # background used to flatten transparency
//! ```

use serde::Deserialize;

/// Resolved compression options.
///
/// `size_scale_rate` is a multiplicative factor applied to both raster
/// dimensions on every convergence iteration: values in (0, 1) shrink the
/// raster alongside the quality drop, 1.0 leaves scaling to quality alone.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressOptions {
    /// Strip the `data:image/jpeg;base64,` prefix from produced payloads.
    pub remove_payload_header: bool,
    /// Target payload size in megabytes.
    pub max_size_mb: f64,
    /// Raster shrink factor per convergence iteration, typically (0, 1].
    pub size_scale_rate: f64,
    /// CSS-style hex color (`#rgb` / `#rrggbb`) flattened under transparency.
    pub fill_color: String,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            remove_payload_header: false,
            max_size_mb: 2.0,
            size_scale_rate: 1.0,
            fill_color: "#ffffff".to_string(),
        }
    }
}

impl CompressOptions {
    /// The byte budget the convergence loop aims for.
    ///
    /// Always at least 1, so the loop invariant `max_size_bytes > 0` holds
    /// even for nonsensical megabyte inputs.
    pub fn max_size_bytes(&self) -> usize {
        ((self.max_size_mb * 1024.0 * 1024.0) as usize).max(1)
    }

    /// Merge sparse overrides onto the defaults.
    pub fn with_overrides(overrides: &CompressOverrides) -> Self {
        let base = Self::default();
        Self {
            remove_payload_header: overrides
                .remove_payload_header
                .unwrap_or(base.remove_payload_header),
            max_size_mb: overrides.max_size_mb.unwrap_or(base.max_size_mb),
            size_scale_rate: overrides.size_scale_rate.unwrap_or(base.size_scale_rate),
            fill_color: overrides
                .fill_color
                .clone()
                .unwrap_or(base.fill_color),
        }
    }
}

/// Sparse caller-supplied overrides. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompressOverrides {
    pub remove_payload_header: Option<bool>,
    pub max_size_mb: Option<f64>,
    pub size_scale_rate: Option<f64>,
    pub fill_color: Option<String>,
}
