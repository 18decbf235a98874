// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop stand-ins for the native capabilities a phone provides.
//
// The "camera" is a file picker, printing goes through the PDF markup
// renderer, and sharing saves a copy wherever the user chooses.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use docscan_bridge::{
    CaptureOptions, NativeCamera, NativeDocuments, NativeHtmlPrint, NativeShare, PlatformBridge,
    RawCapture, ShareOptions,
};
use docscan_core::error::{DocScanError, Result};
use docscan_core::AppConfig;
use docscan_core::types::CameraPermission;
use docscan_document::PdfMarkupRenderer;
use image::ImageFormat;
use tracing::{debug, info, instrument};

use super::data_dir;

/// Platform bridge used when no phone shell hosts the app.
pub struct DesktopBridge {
    renderer: PdfMarkupRenderer,
}

impl DesktopBridge {
    /// Renderer page size and margin come from `config`.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_cache_dir(config, data_dir::data_subdir("cache"))
    }

    fn with_cache_dir(config: &AppConfig, cache_dir: PathBuf) -> Self {
        Self {
            renderer: PdfMarkupRenderer::new(config.paper_size, cache_dir)
                .with_margin_mm(config.page_margin_mm),
        }
    }
}

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl NativeCamera for DesktopBridge {
    fn camera_permission(&self) -> Result<CameraPermission> {
        Ok(CameraPermission::Granted)
    }

    fn request_camera_permission(&self) -> Result<CameraPermission> {
        Ok(CameraPermission::Granted)
    }

    #[instrument(skip_all)]
    fn capture_photo(&self, options: &CaptureOptions) -> Result<Option<RawCapture>> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Choose a photo of the page")
            .add_filter("Images", &["jpg", "jpeg", "png", "webp"])
            .pick_file()
        else {
            debug!("photo picker cancelled");
            return Ok(None);
        };

        let bytes = std::fs::read(&path).map_err(|e| DocScanError::fs("read", &path, e))?;
        let jpeg = to_jpeg(bytes, options.quality)?;

        let mut exif = BTreeMap::new();
        if options.exif {
            exif.insert("SourceFile".to_owned(), path.display().to_string());
        }
        info!(path = %path.display(), bytes = jpeg.len(), "photo picked");
        Ok(Some(RawCapture {
            jpeg,
            uri: format!("file://{}", path.display()),
            exif,
        }))
    }
}

impl NativeHtmlPrint for DesktopBridge {
    fn print_to_file(&self, html: &str) -> Result<PathBuf> {
        self.renderer.print_to_file(html)
    }
}

impl NativeShare for DesktopBridge {
    #[instrument(skip_all, fields(path = %path.display()))]
    fn share_file(&self, path: &Path, options: &ShareOptions) -> Result<()> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(target) = rfd::FileDialog::new()
            .set_title(&options.dialog_title)
            .set_file_name(&file_name)
            .add_filter("PDF", &["pdf"])
            .save_file()
        else {
            debug!("share dialog dismissed");
            return Ok(());
        };

        std::fs::copy(path, &target).map_err(|e| DocScanError::fs("copy", &target, e))?;
        info!(target = %target.display(), "document shared");
        Ok(())
    }
}

impl NativeDocuments for DesktopBridge {
    fn documents_dir(&self) -> Result<PathBuf> {
        Ok(data_dir::data_subdir("documents"))
    }
}

/// Re-encode a picked image as JPEG unless it already is one.
fn to_jpeg(bytes: Vec<u8>, quality: f32) -> Result<Vec<u8>> {
    if image::guess_format(&bytes).ok() == Some(ImageFormat::Jpeg) {
        return Ok(bytes);
    }
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| DocScanError::CameraCapture(format!("unreadable image: {e}")))?;

    let quality = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
    let mut out = Cursor::new(Vec::new());
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
    decoded
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| DocScanError::CameraCapture(format!("JPEG encoding failed: {e}")))?;
    Ok(out.into_inner())
}
