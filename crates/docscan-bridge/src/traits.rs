// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use docscan_core::error::Result;
use docscan_core::types::{CameraFacing, CameraPermission, PDF_MIME_TYPE, PDF_UTI};

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge: NativeCamera + NativeHtmlPrint + NativeShare + NativeDocuments {
    /// Human-readable platform name (e.g. "iOS 17", "Android 14").
    fn platform_name(&self) -> &str;
}

/// Settings passed to the camera for a single shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    pub facing: CameraFacing,
    /// JPEG quality, 0.0–1.0.
    pub quality: f32,
    /// Ask the camera to return EXIF tags.
    pub exif: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            facing: CameraFacing::Back,
            quality: 1.0,
            exif: true,
        }
    }
}

/// A photo as returned by the platform camera.
#[derive(Debug, Clone, Default)]
pub struct RawCapture {
    /// JPEG bytes.
    pub jpeg: Vec<u8>,
    /// Where the platform stored the capture (file or content URI).
    pub uri: String,
    pub exif: BTreeMap<String, String>,
}

/// Capture images from the device camera.
pub trait NativeCamera {
    /// Current camera permission without prompting.
    fn camera_permission(&self) -> Result<CameraPermission>;

    /// Prompt the user for camera access and return the outcome.
    fn request_camera_permission(&self) -> Result<CameraPermission>;

    /// Take a photo. Returns Ok(None) if the user cancelled.
    fn capture_photo(&self, options: &CaptureOptions) -> Result<Option<RawCapture>>;
}

/// Host HTML rendering service (WebView print on mobile).
///
/// Rendering runs on a blocking worker thread, hence `Send + Sync`.
pub trait NativeHtmlPrint: Send + Sync {
    /// Rasterize `html` to a PDF in a temporary location and return its path.
    /// The caller owns the file and must move or delete it. May block.
    fn print_to_file(&self, html: &str) -> Result<PathBuf>;
}

/// Options for the OS share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOptions {
    pub dialog_title: String,
    pub mime_type: String,
    /// Uniform type identifier (iOS only).
    pub uti: Option<String>,
}

impl ShareOptions {
    /// Share options for an exported PDF.
    pub fn pdf() -> Self {
        Self {
            dialog_title: "Share PDF".into(),
            mime_type: PDF_MIME_TYPE.into(),
            uti: Some(PDF_UTI.into()),
        }
    }
}

/// Share content via the OS share sheet.
pub trait NativeShare {
    /// Share a file with other apps. Returns once the sheet was presented.
    fn share_file(&self, path: &Path, options: &ShareOptions) -> Result<()>;
}

/// Location of the app-private documents directory.
pub trait NativeDocuments {
    /// Root directory the app may freely read and write.
    fn documents_dir(&self) -> Result<PathBuf>;
}
