// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::types::{CameraFacing, PaperSize};

/// Folder under the document root that holds exported PDFs.
pub const DEFAULT_MANAGED_FOLDER: &str = "EscaneosDocApp";

/// What the exporter does when `<name>.pdf` already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Replace the existing document.
    #[default]
    Overwrite,
    /// Fail with `AlreadyExists`.
    Reject,
    /// Append `-1`, `-2`, ... until the name is free.
    AutoRename,
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Managed storage folder name inside the document root.
    pub managed_folder: String,
    /// Page size used by the desktop renderer.
    pub paper_size: PaperSize,
    /// Blank border around each page image in the desktop renderer, in mm.
    pub page_margin_mm: f32,
    /// JPEG quality requested from the camera (0.0–1.0).
    pub capture_quality: f32,
    /// Ask the camera for EXIF metadata.
    pub capture_exif: bool,
    /// Camera used when the capture screen opens.
    pub default_facing: CameraFacing,
    /// Behaviour on duplicate export names.
    pub collision_policy: CollisionPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            managed_folder: DEFAULT_MANAGED_FOLDER.into(),
            paper_size: PaperSize::A4,
            page_margin_mm: 0.0,
            capture_quality: 1.0,
            capture_exif: true,
            default_facing: CameraFacing::Back,
            collision_policy: CollisionPolicy::Overwrite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{"collision_policy":"Reject"}"#).unwrap();
        assert_eq!(cfg.collision_policy, CollisionPolicy::Reject);
        assert_eq!(cfg.managed_folder, DEFAULT_MANAGED_FOLDER);
        assert!(cfg.capture_exif);
        assert_eq!(cfg.page_margin_mm, 0.0);
    }

    #[test]
    fn page_margin_is_read_from_json() {
        let cfg: AppConfig = serde_json::from_str(r#"{"page_margin_mm":12.5}"#).unwrap();
        assert_eq!(cfg.page_margin_mm, 12.5);
        assert_eq!(cfg.paper_size, PaperSize::A4);
    }
}
