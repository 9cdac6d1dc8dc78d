//! End-to-end pipeline tests: extracted pages plus source bytes in,
//! redacted artifact plus detection summary out.

use anyhow::Result;
use image::{ImageFormat, Rgba, RgbaImage};
use kavach_engine::{Pipeline, PipelineError, PipelineOptions};
use kavach_engine::core::{
    BoundingBox, ConfidenceThresholds, Page, TextToken,
};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::Cursor;

fn token(text: &str, x: f32, y: f32, w: f32, h: f32) -> TextToken {
    TextToken {
        text: text.to_string(),
        confidence: 0.92,
        bbox: BoundingBox::new(x, y, w, h),
    }
}

fn page(number: u32, tokens: Vec<TextToken>) -> Page {
    Page {
        page_number: number,
        width: 600.0,
        height: 800.0,
        tokens,
    }
}

fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 200, 255])
    });
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

fn sample_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content = Content {
        operations: vec![
            Operation::new("re", vec![20.into(), 20.into(), 80.into(), 40.into()]),
            Operation::new("S", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        lopdf::Dictionary::new(),
        content.encode().unwrap(),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 600.into(), 800.into()],
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

#[test]
fn scanned_image_end_to_end() -> Result<()> {
    let pages = vec![page(
        1,
        vec![
            token("Name: Example Person", 20.0, 20.0, 180.0, 16.0),
            token("2345 6789 0123", 20.0, 60.0, 140.0, 16.0),
            token("PAN: ABCDE1234F", 20.0, 100.0, 150.0, 16.0),
            token("Mob: 9876543210", 20.0, 140.0, 150.0, 16.0),
        ],
    )];
    let source = sample_png(400, 300);

    let report = Pipeline::default().run(&pages, &source, "image/png")?;

    let summary = report.detections.summary();
    assert_eq!(summary.aadhaar, 1);
    assert_eq!(summary.pan, 1);
    assert_eq!(summary.phone, 1);
    assert_eq!(summary.address, 0);
    assert_eq!(report.artifact.mime_type, "image/png");

    // Every detection's region is solid fill in the output.
    let redacted = image::load_from_memory_with_format(&report.artifact.bytes, ImageFormat::Png)?
        .to_rgba8();
    assert_eq!(redacted.dimensions(), (400, 300));
    for det in report.detections.iter() {
        let cx = (det.bbox.x + det.bbox.width / 2.0) as u32;
        let cy = (det.bbox.y + det.bbox.height / 2.0) as u32;
        assert_eq!(*redacted.get_pixel(cx, cy), Rgba([0, 0, 0, 255]));
    }
    // A corner far from every detection is untouched.
    assert_eq!(*redacted.get_pixel(399, 299), Rgba([143, 43, 200, 255]));
    Ok(())
}

#[test]
fn pdf_end_to_end() -> Result<()> {
    let pages = vec![page(
        1,
        vec![
            token("Flat 4B Rose Building", 40.0, 120.0, 200.0, 14.0),
            token("MG Road Bengaluru 560001", 40.0, 140.0, 220.0, 14.0),
        ],
    )];
    let source = sample_pdf();

    let report = Pipeline::default().run(&pages, &source, "application/pdf")?;
    assert_eq!(report.detections.summary().address, 1);
    assert_eq!(report.artifact.mime_type, "application/pdf");

    let doc = Document::load_mem(&report.artifact.bytes)?;
    assert_eq!(doc.page_iter().count(), 1);
    Ok(())
}

#[test]
fn clean_document_passes_through() -> Result<()> {
    let pages = vec![page(
        1,
        vec![token("nothing sensitive here", 10.0, 10.0, 200.0, 14.0)],
    )];
    let source = sample_png(64, 64);

    let report = Pipeline::default().run(&pages, &source, "image/png")?;
    assert!(report.detections.is_empty());

    let original = image::load_from_memory_with_format(&source, ImageFormat::Png)?.to_rgba8();
    let redacted = image::load_from_memory_with_format(&report.artifact.bytes, ImageFormat::Png)?
        .to_rgba8();
    assert_eq!(original.as_raw(), redacted.as_raw());
    Ok(())
}

#[test]
fn confidence_floor_excludes_aggressive_tier() -> Result<()> {
    // A fused identifier only the aggressive pass can find.
    let pages = vec![page(
        1,
        vec![token("xxABCDE1234F", 10.0, 10.0, 120.0, 14.0)],
    )];
    let source = sample_png(64, 64);

    let permissive = Pipeline::default().run(&pages, &source, "image/png")?;
    assert_eq!(permissive.detections.summary().pan, 1);

    let strict = Pipeline::new(PipelineOptions {
        thresholds: ConfidenceThresholds {
            pan: Some(0.7),
            ..Default::default()
        },
        ..Default::default()
    });
    let report = strict.run(&pages, &source, "image/png")?;
    assert_eq!(report.detections.summary().pan, 0);
    Ok(())
}

#[test]
fn unsupported_format_is_a_single_categorical_error() {
    let pages = vec![page(1, vec![token("9876543210", 10.0, 10.0, 90.0, 14.0)])];
    let err = Pipeline::default().run(&pages, b"plain text", "text/plain");
    assert!(matches!(err, Err(PipelineError::Redact(_))));
}

#[test]
fn detection_on_missing_pdf_page_is_skipped() -> Result<()> {
    // Extraction claims two pages, the document has one: the stray
    // detection is skipped, the run still succeeds.
    let pages = vec![
        page(1, vec![token("clean first page", 10.0, 10.0, 150.0, 14.0)]),
        page(2, vec![token("9876543210", 10.0, 10.0, 90.0, 14.0)]),
    ];
    let report = Pipeline::default().run(&pages, &sample_pdf(), "application/pdf")?;
    assert_eq!(report.detections.summary().phone, 1);
    assert!(Document::load_mem(&report.artifact.bytes).is_ok());
    Ok(())
}
