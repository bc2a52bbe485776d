//! # picpress
//!
//! Batch image ingestion and re-encoding to byte-budgeted JPEG payloads.
//! Hand it the files a user selected, and for each one it decodes the
//! pixels, corrects EXIF orientation on an off-screen raster, and
//! iteratively re-encodes until the payload fits a byte budget — then
//! invokes your callback with a base64 data URL ready to ship.
//!
//! # Architecture: Per-File Pipeline
//!
//! ```text
//! files ──► batch driver ──► (per file) decode ──► compose ──► converge ──► payload ──► callback
//!                │                                    ▲
//!                └── orientation (first file only) ───┘
//! ```
//!
//! Orientation is resolved once, from the first file's EXIF, and applied to
//! the whole batch. Each file then runs an independent chain on a rayon
//! worker: callbacks fire as files finish, in no particular order.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`batch`] | Batch driver — fan-out, per-file callback, error channel |
//! | [`files`] | `FileSource` trait, disk/memory impls, name and type helpers |
//! | [`options`] | Compression options: defaults + sparse override merging |
//! | [`orientation`] | EXIF orientation tags, make policy, metadata capability |
//! | [`payload`] | Data-URL assembly and header stripping |
//! | [`raster`] | Surface capability, composition math, convergence loop |
//!
//! # Design Decisions
//!
//! ## JPEG-Only Output
//!
//! Every payload is JPEG regardless of the source format — one format keeps
//! the consuming side trivial, and transparency is flattened onto a
//! configurable background color since JPEG carries no alpha.
//!
//! ## Best-Effort Budget
//!
//! The convergence loop lowers quality (adaptively — big steps while far
//! over budget) and shrinks the raster each pass, but gives up after ten
//! passes and returns its best attempt rather than failing. Callers that
//! need a hard guarantee must check the payload size themselves.
//!
//! ## Capabilities Over Globals
//!
//! Metadata extraction ([`orientation::MetadataReader`]) and pixel work
//! ([`raster::RasterSurface`]) are traits injected at the seams, so the
//! pipeline logic is testable without real EXIF segments or encoders, and
//! embedders can swap implementations.
//!
//! # Example
//!
//! ```no_run
//! use picpress::batch::process_batch;
//! use picpress::files::DiskFile;
//! use picpress::options::CompressOptions;
//!
//! let files = vec![DiskFile::new("holiday.jpg"), DiskFile::new("cat.png")];
//! let options = CompressOptions {
//!     max_size_mb: 0.5,
//!     ..Default::default()
//! };
//! process_batch(&files, &options, |result| match result {
//!     Ok(converted) => println!("{}: {} chars", converted.name, converted.payload.len()),
//!     Err(err) => eprintln!("{err}"),
//! });
//! ```

pub mod batch;
pub mod files;
pub mod options;
pub mod orientation;
pub mod payload;
pub mod raster;
