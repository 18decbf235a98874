// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for builds without a native shell (CI, headless targets).
//
// Every trait method returns `PlatformUnavailable`.

use std::path::{Path, PathBuf};

use docscan_core::error::{DocScanError, Result};
use docscan_core::types::CameraPermission;

use crate::traits::*;

/// No-op bridge returned when no native shell is linked.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Stub"
    }
}

impl NativeCamera for StubBridge {
    fn camera_permission(&self) -> Result<CameraPermission> {
        Err(DocScanError::PlatformUnavailable)
    }

    fn request_camera_permission(&self) -> Result<CameraPermission> {
        tracing::warn!("NativeCamera::request_camera_permission called on stub bridge");
        Err(DocScanError::PlatformUnavailable)
    }

    fn capture_photo(&self, _options: &CaptureOptions) -> Result<Option<RawCapture>> {
        tracing::warn!("NativeCamera::capture_photo called on stub bridge");
        Err(DocScanError::PlatformUnavailable)
    }
}

impl NativeHtmlPrint for StubBridge {
    fn print_to_file(&self, _html: &str) -> Result<PathBuf> {
        tracing::warn!("NativeHtmlPrint::print_to_file called on stub bridge");
        Err(DocScanError::PlatformUnavailable)
    }
}

impl NativeShare for StubBridge {
    fn share_file(&self, _path: &Path, _options: &ShareOptions) -> Result<()> {
        tracing::warn!("NativeShare::share_file called on stub bridge");
        Err(DocScanError::PlatformUnavailable)
    }
}

impl NativeDocuments for StubBridge {
    fn documents_dir(&self) -> Result<PathBuf> {
        Err(DocScanError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_reports_unavailable() {
        let bridge = StubBridge;
        assert!(matches!(
            bridge.capture_photo(&CaptureOptions::default()),
            Err(DocScanError::PlatformUnavailable)
        ));
        assert!(matches!(
            bridge.share_file(Path::new("/tmp/a.pdf"), &ShareOptions::pdf()),
            Err(DocScanError::PlatformUnavailable)
        ));
    }
}
