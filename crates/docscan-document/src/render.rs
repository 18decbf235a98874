// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop markup renderer: rasterizes scan markup to PDF with `printpdf` 0.8.
//
// Mobile platforms print the markup through their WebView. Desktop has no
// such service, so this renderer reads each page block back out of the
// markup, decodes its JPEG and places it on its own page.

use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use docscan_bridge::NativeHtmlPrint;
use docscan_core::error::{DocScanError, Result};
use docscan_core::types::PaperSize;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::markup::parse_pages;

/// Nominal resolution used to size images before scaling to the page.
const IMAGE_DPI: f32 = 150.0;

const DOCUMENT_TITLE: &str = "DocScan";

/// Renders [`crate::ScanMarkup`] to PDF files in a temporary directory.
#[derive(Debug, Clone)]
pub struct PdfMarkupRenderer {
    paper_size: PaperSize,
    /// Margin around each image, in millimetres.
    margin_mm: f32,
    temp_dir: PathBuf,
}

/// Where an image lands on its page, in points from the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    x: f32,
    y: f32,
    scale: f32,
}

impl PdfMarkupRenderer {
    /// Renderer writing its output under `temp_dir`.
    pub fn new(paper_size: PaperSize, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            paper_size,
            margin_mm: 0.0,
            temp_dir: temp_dir.into(),
        }
    }

    /// Blank border kept around every image. Capped at a quarter of the
    /// shorter page side so there is always room for the image.
    pub fn with_margin_mm(mut self, margin_mm: f32) -> Self {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        let cap = w_mm.min(h_mm) as f32 / 4.0;
        self.margin_mm = margin_mm.max(0.0).min(cap);
        self
    }

    pub fn margin_mm(&self) -> f32 {
        self.margin_mm
    }

    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    /// Rasterize markup into PDF bytes, one page per embedded image.
    #[instrument(skip_all, fields(html_len = html.len()))]
    pub fn render(&self, html: &str) -> Result<Vec<u8>> {
        let blocks = parse_pages(html);
        if blocks.is_empty() {
            return Err(DocScanError::Rendering("markup contains no images".into()));
        }

        let (page_w, page_h) = self.page_dimensions();
        let mut doc = PdfDocument::new(DOCUMENT_TITLE);
        let mut pages = Vec::with_capacity(blocks.len());

        for (index, block) in blocks.iter().enumerate() {
            let jpeg = STANDARD.decode(block.image).map_err(|e| {
                DocScanError::Rendering(format!("page {}: invalid base64: {e}", index + 1))
            })?;
            let decoded = ::image::load_from_memory(&jpeg).map_err(|e| {
                DocScanError::Rendering(format!("page {}: failed to decode image: {e}", index + 1))
            })?;

            let img_width = decoded.width() as usize;
            let img_height = decoded.height() as usize;
            let raw = RawImage {
                pixels: RawImageData::U8(decoded.to_rgb8().into_raw()),
                width: img_width,
                height: img_height,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let Placement { x, y, scale } = self.place(img_width, img_height);
            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(x)),
                    translate_y: Some(Pt(y)),
                    scale_x: Some(scale),
                    scale_y: Some(scale),
                    dpi: Some(IMAGE_DPI),
                    rotate: None,
                },
            }];
            pages.push(PdfPage::new(page_w, page_h, ops));
            debug!(page = index + 1, img_width, img_height, scale, "page laid out");
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        info!(pages = blocks.len(), bytes = output.len(), "markup rendered");
        Ok(output)
    }

    /// Scale to fill the area inside the margin, preserving aspect ratio.
    /// Images hang from the top of the page, like a full-width `<img>`.
    fn place(&self, img_width: usize, img_height: usize) -> Placement {
        let (page_w, page_h) = self.page_dimensions();
        let usable_w_pt = Mm(page_w.0 - 2.0 * self.margin_mm).into_pt().0;
        let usable_h_pt = Mm(page_h.0 - 2.0 * self.margin_mm).into_pt().0;
        let img_w_pt = img_width as f32 / IMAGE_DPI * 72.0;
        let img_h_pt = img_height as f32 / IMAGE_DPI * 72.0;
        let scale = (usable_w_pt / img_w_pt).min(usable_h_pt / img_h_pt);

        let margin_pt = Mm(self.margin_mm).into_pt().0;
        Placement {
            x: margin_pt + (usable_w_pt - img_w_pt * scale) / 2.0,
            y: margin_pt + usable_h_pt - img_h_pt * scale,
            scale,
        }
    }
}

impl NativeHtmlPrint for PdfMarkupRenderer {
    fn print_to_file(&self, html: &str) -> Result<PathBuf> {
        let bytes = self.render(html)?;
        std::fs::create_dir_all(&self.temp_dir)
            .map_err(|e| DocScanError::fs("create directory", &self.temp_dir, e))?;
        let path = self.temp_dir.join(format!("{}.pdf", Uuid::new_v4()));
        std::fs::write(&path, &bytes).map_err(|e| DocScanError::fs("write", &path, e))?;
        debug!(path = %path.display(), "rendered PDF written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::captured_image_from_jpeg;
    use crate::capture::tests::jpeg;
    use crate::markup::ScanMarkup;
    use crate::pdf::page_count;

    #[test]
    fn renders_one_page_per_image() {
        let images: Vec<_> = (0..3)
            .map(|i| captured_image_from_jpeg(jpeg(16, 24, i * 60), format!("file:///p{i}.jpg")))
            .collect();
        let markup = ScanMarkup::build(&images);

        let tmp = tempfile::tempdir().unwrap();
        let renderer = PdfMarkupRenderer::new(PaperSize::A4, tmp.path());
        let bytes = renderer.render(markup.html()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(page_count(&bytes).unwrap(), 3);
    }

    #[test]
    fn print_to_file_writes_into_temp_dir() {
        let markup = ScanMarkup::build(&[captured_image_from_jpeg(jpeg(8, 8, 0), "file:///a.jpg")]);
        let tmp = tempfile::tempdir().unwrap();
        let renderer = PdfMarkupRenderer::new(PaperSize::Letter, tmp.path().join("render"));

        let path = renderer.print_to_file(markup.html()).unwrap();
        assert!(path.starts_with(tmp.path().join("render")));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
        assert!(path.is_file());
    }

    #[test]
    fn margin_insets_the_image() {
        let tmp = tempfile::tempdir().unwrap();
        let plain = PdfMarkupRenderer::new(PaperSize::A4, tmp.path());
        let framed = PdfMarkupRenderer::new(PaperSize::A4, tmp.path()).with_margin_mm(10.0);

        // Wide image: width is the limiting side, so x equals the margin.
        let edge = plain.place(400, 100);
        let inset = framed.place(400, 100);
        assert!(edge.x.abs() < 0.01);
        assert!((inset.x - Mm(10.0).into_pt().0).abs() < 0.01);
        assert!(inset.scale < edge.scale);

        // Top edge sits one margin below the top of the page.
        let page_h_pt = Mm(297.0).into_pt().0;
        let top = inset.y + 100.0 / IMAGE_DPI * 72.0 * inset.scale;
        assert!((page_h_pt - top - Mm(10.0).into_pt().0).abs() < 0.01);

        let markup = ScanMarkup::build(&[captured_image_from_jpeg(jpeg(40, 10, 0), "file:///w.jpg")]);
        assert_eq!(page_count(&framed.render(markup.html()).unwrap()).unwrap(), 1);
    }

    #[test]
    fn oversized_margin_is_capped() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = PdfMarkupRenderer::new(PaperSize::A4, tmp.path()).with_margin_mm(500.0);
        assert!((renderer.margin_mm - 52.5).abs() < f32::EPSILON);
        assert!(renderer.place(10, 10).scale > 0.0);

        let negative = PdfMarkupRenderer::new(PaperSize::A4, tmp.path()).with_margin_mm(-3.0);
        assert_eq!(negative.margin_mm, 0.0);
    }

    #[test]
    fn markup_without_images_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = PdfMarkupRenderer::new(PaperSize::A4, tmp.path());
        let err = renderer.render("<html><body></body></html>").unwrap_err();
        assert!(matches!(err, DocScanError::Rendering(_)));
    }

    #[test]
    fn corrupt_image_reports_page_number() {
        let html = "<div class=\"last-page\"><img src=\"data:image/jpeg;base64,AAAA\" /></div>";
        let tmp = tempfile::tempdir().unwrap();
        let renderer = PdfMarkupRenderer::new(PaperSize::A4, tmp.path());
        match renderer.render(html) {
            Err(DocScanError::Rendering(msg)) => assert!(msg.starts_with("page 1")),
            other => panic!("expected rendering error, got {other:?}"),
        }
    }
}
