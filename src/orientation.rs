//! EXIF orientation resolution.
//!
//! Orientation is read once per batch, from the first file only, and the
//! resolved value applies to every file in that batch. Two sources feed the
//! decision:
//!
//! - the EXIF `Orientation` tag (1–8), of which this pipeline corrects the
//!   subset {1, 3, 8} — anything else is drawn as-is;
//! - the EXIF `Make` tag: only Apple devices are assumed to report
//!   orientation tags that need client-side correction, so any other make is
//!   normalized to tag 1.
//!
//! Missing or unreadable metadata is never an error: the file is treated as
//! "no rotation, unknown make".
//!
//! Metadata extraction is an injected capability ([`MetadataReader`]) so the
//! driver can be tested — and embedded — without real EXIF segments;
//! [`ExifReader`] is the production implementation.

use std::io::Cursor;

/// The orientation correction applied while composing the raster.
///
/// Variants are named for the surface transform they select (see the
/// composer's transform table), and remember the EXIF tag value they came
/// from for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// No usable tag, or a tag outside the corrected set. Drawn untouched.
    #[default]
    AsIs,
    /// Tag 1: swapped surface, 90° rotation.
    QuarterTurn,
    /// Tag 8: 180° rotation, dimensions unchanged.
    HalfTurn,
    /// Tag 3: swapped surface, 270° rotation.
    ThreeQuarterTurn,
}

impl Orientation {
    /// Map a raw EXIF tag value to the correction it selects.
    pub fn from_tag(tag: Option<u32>) -> Self {
        match tag {
            Some(1) => Self::QuarterTurn,
            Some(3) => Self::ThreeQuarterTurn,
            Some(8) => Self::HalfTurn,
            _ => Self::AsIs,
        }
    }

    /// The EXIF tag value this correction was resolved from, if any.
    pub fn tag(self) -> Option<u32> {
        match self {
            Self::AsIs => None,
            Self::QuarterTurn => Some(1),
            Self::ThreeQuarterTurn => Some(3),
            Self::HalfTurn => Some(8),
        }
    }
}

/// Raw camera metadata pulled from a file's EXIF segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraMeta {
    /// EXIF `Orientation` tag value (1–8), if present.
    pub orientation_tag: Option<u32>,
    /// EXIF `Make` tag value, if present and non-empty.
    pub make: Option<String>,
}

/// Metadata extraction capability.
pub trait MetadataReader {
    /// Extract camera metadata from a file's raw bytes. Never fails: any
    /// parse problem yields an empty [`CameraMeta`].
    fn read_meta(&self, bytes: &[u8]) -> CameraMeta;
}

/// Production metadata reader backed by `kamadak-exif`.
///
/// Understands EXIF in JPEG, TIFF, PNG, WebP, and HEIF containers.
pub struct ExifReader;

impl MetadataReader for ExifReader {
    fn read_meta(&self, bytes: &[u8]) -> CameraMeta {
        let mut cursor = Cursor::new(bytes);
        let Ok(exif) = exif::Reader::new().read_from_container(&mut cursor) else {
            return CameraMeta::default();
        };

        let orientation_tag = exif
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0));

        let make = exif
            .get_field(exif::Tag::Make, exif::In::PRIMARY)
            .and_then(|field| match &field.value {
                exif::Value::Ascii(values) => values
                    .first()
                    .map(|raw| String::from_utf8_lossy(raw).trim_matches('\0').trim().to_string()),
                _ => None,
            })
            .filter(|make| !make.is_empty());

        CameraMeta {
            orientation_tag,
            make,
        }
    }
}

/// Apply the make policy: Apple (or unknown) keeps the raw tag, every other
/// make is normalized to tag 1. Returns the resolved orientation together
/// with the camera make for reporting.
pub fn resolve(meta: &CameraMeta) -> (Orientation, Option<String>) {
    let orientation = match meta.make.as_deref() {
        None | Some("Apple") => Orientation::from_tag(meta.orientation_tag),
        Some(_) => Orientation::from_tag(Some(1)),
    };
    (orientation, meta.make.clone())
}
