// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for DocScan.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// MIME type of every exported document.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Apple uniform type identifier for PDF, passed to the share sheet.
pub const PDF_UTI: &str = "com.adobe.pdf";

/// Unique identifier for a captured image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub Uuid);

impl ImageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which camera on the device to capture with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

impl CameraFacing {
    /// The other camera.
    pub fn toggled(self) -> Self {
        match self {
            Self::Back => Self::Front,
            Self::Front => Self::Back,
        }
    }
}

/// Camera access as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPermission {
    /// The user has not been asked yet.
    Undetermined,
    Granted,
    Denied,
}

impl CameraPermission {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Metadata recorded alongside a captured photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureMetadata {
    pub captured_at: DateTime<Utc>,
    /// Pixel dimensions, when the JPEG header could be read.
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// EXIF tags reported by the camera, if requested.
    pub exif: BTreeMap<String, String>,
}

/// A single photo held in memory for the active capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedImage {
    pub id: ImageId,
    /// Base64-encoded JPEG bytes.
    pub encoded: String,
    /// Where the platform stored the original capture.
    pub origin_uri: String,
    pub metadata: CaptureMetadata,
}

impl CapturedImage {
    /// Size of the encoded payload in bytes.
    pub fn encoded_len(&self) -> usize {
        self.encoded.len()
    }
}

/// An exported PDF in managed storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedDocument {
    pub file_name: String,
    pub modified_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// One entry of a directory listing. Recomputed on every listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub display_name: String,
    pub is_directory: bool,
    pub size_bytes: Option<u64>,
    pub modified_at: Option<DateTime<Utc>>,
    pub exists: bool,
}

/// A document loaded for in-app viewing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    pub file_name: String,
    /// Base64-encoded file contents.
    pub base64: String,
}

impl DocumentView {
    /// `data:` URI suitable for an embedded PDF viewer.
    pub fn data_uri(&self) -> String {
        format!("data:{PDF_MIME_TYPE};base64,{}", self.base64)
    }
}

/// Standard paper sizes used when rasterizing scans on desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_toggles_back_and_forth() {
        assert_eq!(CameraFacing::Back.toggled(), CameraFacing::Front);
        assert_eq!(CameraFacing::Back.toggled().toggled(), CameraFacing::Back);
    }

    #[test]
    fn data_uri_has_pdf_prefix() {
        let view = DocumentView {
            file_name: "scan.pdf".into(),
            base64: "JVBERi0=".into(),
        };
        assert_eq!(view.data_uri(), "data:application/pdf;base64,JVBERi0=");
    }
}
