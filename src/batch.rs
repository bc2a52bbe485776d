//! Batch driver: fan a file collection out across the pipeline.
//!
//! [`process_batch`] resolves orientation once — from the first file's
//! metadata only — then runs every file through decode → compose → converge
//! → format on a rayon worker, invoking the callback as each file finishes.
//! Callback order across files is therefore not guaranteed to match input
//! order; within one file the steps are strictly sequential, and every file
//! gets its own surface.
//!
//! Per-file failures (unreadable bytes, undecodable image, encoder error)
//! arrive on the same callback as `Err(ConvertError)` carrying the file
//! name; they never abort the rest of the batch. An empty batch logs a
//! warning and returns without invoking the callback at all.
//!
//! Output is always JPEG, whatever the source format — transparent sources
//! are flattened onto the configured background color.

use crate::files::FileSource;
use crate::options::CompressOptions;
use crate::orientation::{self, ExifReader, MetadataReader, Orientation};
use crate::payload;
use crate::raster::{ConvergeSettings, PixmapSurface, SurfaceError, converge, parse_hex_color};
use rayon::prelude::*;
use thiserror::Error;

/// The single re-encoding format every payload is forced to.
pub const OUTPUT_FORMAT: &str = "jpeg";

/// One converted file, handed to the callback. The caller owns it.
#[derive(Debug, Clone)]
pub struct Converted {
    /// Source file name (callbacks are unordered, so results self-identify).
    pub name: String,
    /// Data-URL payload, or the bare base64 body when
    /// `remove_payload_header` is set.
    pub payload: String,
    /// Always [`OUTPUT_FORMAT`].
    pub format: &'static str,
    /// EXIF `Make` of the batch's first file, if present.
    pub camera_make: Option<String>,
    /// The orientation correction applied to the whole batch.
    pub orientation: Orientation,
}

/// Per-file conversion failure, reported through the callback.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode {name}: {source}")]
    Encode {
        name: String,
        #[source]
        source: SurfaceError,
    },
}

impl ConvertError {
    /// Name of the file the failure belongs to.
    pub fn file_name(&self) -> &str {
        match self {
            Self::Read { name, .. } | Self::Decode { name, .. } | Self::Encode { name, .. } => name,
        }
    }
}

/// Convert a batch of files, invoking `on_each` once per file.
///
/// Metadata comes from the default EXIF reader; see [`process_batch_with`]
/// for injecting another.
pub fn process_batch<F>(
    files: &[F],
    options: &CompressOptions,
    on_each: impl Fn(Result<Converted, ConvertError>) + Sync,
) where
    F: FileSource,
{
    process_batch_with(&ExifReader, files, options, on_each);
}

/// Convert a batch of files using a specific metadata reader.
pub fn process_batch_with<F>(
    reader: &impl MetadataReader,
    files: &[F],
    options: &CompressOptions,
    on_each: impl Fn(Result<Converted, ConvertError>) + Sync,
) where
    F: FileSource,
{
    if files.is_empty() {
        log::warn!("no files to convert");
        return;
    }

    // Orientation comes from the first file only and applies to the whole
    // batch. Reading it is independent of decoding: a first file that later
    // fails to decode still contributes its metadata, and unreadable
    // metadata silently means "no rotation, unknown make".
    let meta = files[0]
        .read()
        .map(|bytes| reader.read_meta(&bytes))
        .unwrap_or_default();
    let (batch_orientation, camera_make) = orientation::resolve(&meta);

    let settings = ConvergeSettings {
        max_size_bytes: options.max_size_bytes(),
        scale_rate: options.size_scale_rate,
        fill: parse_hex_color(&options.fill_color).unwrap_or([255, 255, 255]),
    };

    files.par_iter().for_each(|file| {
        on_each(convert_one(
            file,
            batch_orientation,
            camera_make.clone(),
            &settings,
            options.remove_payload_header,
        ));
    });
}

fn convert_one(
    file: &impl FileSource,
    orientation: Orientation,
    camera_make: Option<String>,
    settings: &ConvergeSettings,
    remove_payload_header: bool,
) -> Result<Converted, ConvertError> {
    let name = file.name().to_string();

    let bytes = file.read().map_err(|source| ConvertError::Read {
        name: name.clone(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| ConvertError::Decode {
        name: name.clone(),
        source,
    })?;

    let mut surface = PixmapSurface::new();
    let mut encoded = converge(&mut surface, &image, orientation, settings).map_err(|source| {
        ConvertError::Encode {
            name: name.clone(),
            source,
        }
    })?;
    if remove_payload_header {
        encoded = payload::strip_header(&encoded).to_string();
    }

    Ok(Converted {
        name,
        payload: encoded,
        format: OUTPUT_FORMAT,
        camera_make,
        orientation,
    })
}
