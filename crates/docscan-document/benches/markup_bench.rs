// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the export path in the docscan-document crate:
// building the page markup for a session and rasterizing it on desktop.

use std::io::Cursor;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{ImageFormat, Rgb, RgbImage};

use docscan_core::PaperSize;
use docscan_document::capture::captured_image_from_jpeg;
use docscan_document::{PdfMarkupRenderer, ScanMarkup};

/// A 640x480 JPEG with a simple gradient, roughly the payload of a
/// low-resolution phone capture.
fn sample_jpeg() -> Vec<u8> {
    let img = RgbImage::from_fn(640, 480, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Jpeg)
        .expect("encode sample jpeg");
    out.into_inner()
}

fn bench_markup(c: &mut Criterion) {
    let jpeg = sample_jpeg();
    let images: Vec<_> = (0..10)
        .map(|i| captured_image_from_jpeg(jpeg.clone(), format!("file:///bench/{i}.jpg")))
        .collect();

    c.bench_function("scan_markup_build (10 pages)", |b| {
        b.iter(|| black_box(ScanMarkup::build(black_box(&images))));
    });

    let markup = ScanMarkup::build(&images[..3]);
    let renderer = PdfMarkupRenderer::new(PaperSize::A4, std::env::temp_dir());
    c.bench_function("pdf_markup_render (3 pages)", |b| {
        b.iter(|| black_box(renderer.render(black_box(markup.html())).expect("render")));
    });
}

criterion_group!(benches, bench_markup);
criterion_main!(benches);
