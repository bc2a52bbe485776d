//! End-to-end pipeline tests over the public API: real decode, real
//! surfaces, real JPEG payloads.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageEncoder, RgbImage};
use picpress::batch::{ConvertError, Converted, process_batch, process_batch_with};
use picpress::files::{DiskFile, MemoryFile};
use picpress::options::{CompressOptions, CompressOverrides};
use picpress::orientation::{CameraMeta, MetadataReader, Orientation};
use picpress::payload::strip_header;
use std::sync::Mutex;

struct StubReader(CameraMeta);

impl MetadataReader for StubReader {
    fn read_meta(&self, _bytes: &[u8]) -> CameraMeta {
        self.0.clone()
    }
}

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut bytes)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}

fn run(
    files: &[MemoryFile],
    options: &CompressOptions,
) -> Vec<Result<Converted, ConvertError>> {
    let results = Mutex::new(Vec::new());
    process_batch(files, options, |result| {
        results.lock().unwrap().push(result);
    });
    results.into_inner().unwrap()
}

#[test]
fn batch_produces_decodable_jpeg_data_urls() {
    let files = vec![
        MemoryFile::new("one.jpg", jpeg_bytes(320, 240)),
        MemoryFile::new("two.jpg", jpeg_bytes(64, 64)),
    ];
    let results = run(&files, &CompressOptions::default());

    assert_eq!(results.len(), 2);
    for result in results {
        let converted = result.unwrap();
        assert_eq!(converted.format, "jpeg");
        assert!(converted.payload.starts_with("data:image/jpeg;base64,"));

        let jpeg = STANDARD.decode(strip_header(&converted.payload)).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert!(decoded.width() > 0 && decoded.height() > 0);
    }
}

#[test]
fn oversized_source_is_capped_to_the_bounding_box() {
    let files = vec![MemoryFile::new("big.jpg", jpeg_bytes(2000, 1000))];
    let results = run(&files, &CompressOptions::default());

    let converted = results.into_iter().next().unwrap().unwrap();
    let jpeg = STANDARD.decode(strip_header(&converted.payload)).unwrap();
    let decoded = image::load_from_memory(&jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1280, 640));
}

#[test]
fn png_input_comes_back_as_jpeg() {
    let img = RgbImage::from_pixel(40, 30, image::Rgb([10, 200, 10]));
    let mut png = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png)
        .write_image(img.as_raw(), 40, 30, image::ExtendedColorType::Rgb8)
        .unwrap();

    let files = vec![MemoryFile::new("pixelart.png", png)];
    let results = run(&files, &CompressOptions::default());

    let converted = results.into_iter().next().unwrap().unwrap();
    assert_eq!(converted.format, "jpeg");
    let jpeg = STANDARD.decode(strip_header(&converted.payload)).unwrap();
    assert_eq!(&jpeg[..2], &[0xff, 0xd8]);
}

#[test]
fn impossible_budget_still_returns_a_payload() {
    // ~1 KB budget cannot hold a 1280-wide textured JPEG even at the
    // loop's lowest quality: the driver returns its best attempt anyway
    let files = vec![MemoryFile::new("big.jpg", jpeg_bytes(1600, 1200))];
    let options = CompressOptions::with_overrides(&CompressOverrides {
        max_size_mb: Some(0.001),
        ..Default::default()
    });
    let results = run(&files, &options);

    let converted = results.into_iter().next().unwrap().unwrap();
    assert!(converted.payload.len() > options.max_size_bytes());
    let jpeg = STANDARD.decode(strip_header(&converted.payload)).unwrap();
    assert!(image::load_from_memory(&jpeg).is_ok());
}

#[test]
fn scale_rate_shrinks_until_the_budget_fits() {
    let files = vec![MemoryFile::new("big.jpg", jpeg_bytes(1600, 1200))];
    let options = CompressOptions {
        max_size_mb: 0.02,
        size_scale_rate: 0.6,
        ..Default::default()
    };
    let results = run(&files, &options);

    let converted = results.into_iter().next().unwrap().unwrap();
    assert!(converted.payload.len() <= options.max_size_bytes());
}

#[test]
fn orientation_resolved_from_first_file_applies_to_the_rest() {
    let reader = StubReader(CameraMeta {
        orientation_tag: Some(3),
        make: Some("Apple".to_string()),
    });
    let files = vec![
        MemoryFile::new("one.jpg", jpeg_bytes(200, 100)),
        MemoryFile::new("two.jpg", jpeg_bytes(80, 50)),
    ];
    let results = Mutex::new(Vec::new());
    process_batch_with(&reader, &files, &CompressOptions::default(), |result| {
        results.lock().unwrap().push(result);
    });

    for result in results.into_inner().unwrap() {
        let converted = result.unwrap();
        assert_eq!(converted.orientation, Orientation::ThreeQuarterTurn);
        assert_eq!(converted.orientation.tag(), Some(3));
        assert_eq!(converted.camera_make.as_deref(), Some("Apple"));

        // tag 3 swaps the surface: landscape sources come back portrait
        let jpeg = STANDARD.decode(strip_header(&converted.payload)).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert!(decoded.height() > decoded.width());
    }
}

#[test]
fn broken_file_reports_on_the_error_channel() {
    let files = vec![
        MemoryFile::new("ok.jpg", jpeg_bytes(32, 32)),
        MemoryFile::new("broken.dat", b"not pixels".to_vec()),
    ];
    let results = run(&files, &CompressOptions::default());

    assert_eq!(results.len(), 2);
    let err = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert_eq!(err.file_name(), "broken.dat");
    assert!(results.iter().any(|r| r.is_ok()));
}

#[test]
fn disk_files_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("photo.jpg");
    std::fs::write(&path, jpeg_bytes(48, 48)).unwrap();

    let files = vec![DiskFile::new(&path)];
    let results = Mutex::new(Vec::new());
    process_batch(&files, &CompressOptions::default(), |result| {
        results.lock().unwrap().push(result);
    });

    let results = results.into_inner().unwrap();
    let converted = results.into_iter().next().unwrap().unwrap();
    assert_eq!(converted.name, "photo.jpg");
    assert!(converted.payload.starts_with("data:image/jpeg;base64,"));
}
