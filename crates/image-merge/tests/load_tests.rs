mod common;

use common::{write_pdf, write_png};
use image_merge::constants::DEFAULT_PDF_DPI;
use image_merge::*;
use tempfile::TempDir;

fn labels(report: &LoadReport) -> Vec<&str> {
    report.items.iter().map(|item| item.label.as_str()).collect()
}

#[test]
fn test_load_single_image() {
    let dir = TempDir::new().unwrap();
    let path = write_png(dir.path(), "red square.png", 10, 10, [255, 0, 0, 255]);

    let report = SourceLoader::without_pdf(DEFAULT_PDF_DPI).load(&[path]);

    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].label, "red square");
    assert_eq!(report.items[0].image.dimensions(), (10, 10));
    assert!(report.skipped.is_empty());
}

#[test]
fn test_load_skips_missing() {
    let report = load_images(&["/nonexistent/path.png"], DEFAULT_PDF_DPI);

    assert!(report.items.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert!(matches!(report.skipped[0].error, LoadError::Missing));
}

#[test]
fn test_load_multiple_preserves_order() {
    let dir = TempDir::new().unwrap();
    let b = write_png(dir.path(), "b.png", 20, 20, [0, 255, 0, 255]);
    let a = write_png(dir.path(), "a.png", 10, 10, [255, 0, 0, 255]);

    let report = SourceLoader::without_pdf(DEFAULT_PDF_DPI).load(&[b, a]);

    assert_eq!(labels(&report), vec!["b", "a"]);
    assert_eq!(report.items[0].image.dimensions(), (20, 20));
    assert_eq!(report.items[1].image.dimensions(), (10, 10));
}

#[test]
fn test_load_converts_to_rgba() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rgb.jpg");
    image::RgbImage::from_pixel(8, 4, image::Rgb([200, 100, 50]))
        .save(&path)
        .unwrap();

    let report = SourceLoader::without_pdf(DEFAULT_PDF_DPI).load(&[&path]);

    assert_eq!(report.items.len(), 1);
    let pixel = report.items[0].image.get_pixel(0, 0);
    assert_eq!(pixel[3], 255);
}

#[test]
fn test_load_skips_corrupt_image_and_continues() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("broken.png");
    std::fs::write(&broken, b"definitely not a png").unwrap();
    let good = write_png(dir.path(), "good.png", 5, 5, [0, 0, 0, 255]);

    let report = SourceLoader::without_pdf(DEFAULT_PDF_DPI).load(&[broken, good]);

    assert_eq!(labels(&report), vec!["good"]);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].path.ends_with("broken.png"));
}

#[test]
fn test_load_skips_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, b"hello").unwrap();

    let report = SourceLoader::without_pdf(DEFAULT_PDF_DPI).load(&[notes]);

    assert!(report.items.is_empty());
    assert!(matches!(
        &report.skipped[0].error,
        LoadError::Unsupported(ext) if ext == "txt"
    ));
}

#[test]
fn test_load_uppercase_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_png(dir.path(), "SHOUT.PNG", 3, 3, [0, 0, 0, 255]);

    let report = SourceLoader::without_pdf(DEFAULT_PDF_DPI).load(&[path]);

    assert_eq!(labels(&report), vec!["SHOUT"]);
}

#[test]
fn test_pdf_without_backend_contributes_nothing() {
    let dir = TempDir::new().unwrap();
    let pdf = write_pdf(dir.path(), "doc.pdf", 2);

    let loader = SourceLoader::without_pdf(DEFAULT_PDF_DPI);
    let report = loader.load(&[pdf]);

    assert!(!loader.pdf_available());
    assert!(report.items.is_empty());
    assert!(matches!(
        report.skipped[0].error,
        LoadError::PdfBackendUnavailable
    ));
}

#[test]
fn test_load_pdf_single_page() {
    let dir = TempDir::new().unwrap();
    let pdf = write_pdf(dir.path(), "single.pdf", 1);

    let loader = SourceLoader::new(DEFAULT_PDF_DPI);
    if !loader.pdf_available() {
        eprintln!("pdfium not available, skipping");
        return;
    }
    let report = loader.load(&[pdf]);

    assert_eq!(labels(&report), vec!["single"]);
    let (width, height) = report.items[0].image.dimensions();
    // 100pt at 150 DPI is about 208px
    assert!((207..=209).contains(&width));
    assert!((207..=209).contains(&height));
}

#[test]
fn test_load_pdf_pages_are_numbered() {
    let dir = TempDir::new().unwrap();
    let pdf = write_pdf(dir.path(), "pages.pdf", 2);

    let loader = SourceLoader::new(DEFAULT_PDF_DPI);
    if !loader.pdf_available() {
        eprintln!("pdfium not available, skipping");
        return;
    }
    let report = loader.load(&[pdf]);

    assert_eq!(labels(&report), vec!["pages (1)", "pages (2)"]);
}

#[test]
fn test_pdf_pages_stay_contiguous() {
    let dir = TempDir::new().unwrap();
    let first = write_png(dir.path(), "first.png", 10, 10, [255, 0, 0, 255]);
    let pdf = write_pdf(dir.path(), "middle.pdf", 2);
    let last = write_png(dir.path(), "last.png", 10, 10, [0, 0, 255, 255]);

    let loader = SourceLoader::new(DEFAULT_PDF_DPI);
    if !loader.pdf_available() {
        eprintln!("pdfium not available, skipping");
        return;
    }
    let report = loader.load(&[first, pdf, last]);

    assert_eq!(
        labels(&report),
        vec!["first", "middle (1)", "middle (2)", "last"]
    );
}

#[test]
fn test_corrupt_pdf_contributes_nothing() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("broken.pdf");
    std::fs::write(&broken, b"%PDF-1.4 garbage").unwrap();

    let report = SourceLoader::new(DEFAULT_PDF_DPI).load(&[broken]);

    assert!(report.items.is_empty());
    assert_eq!(report.skipped.len(), 1);
}
