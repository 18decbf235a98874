// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture session: the photos taken since the capture screen opened.

use std::collections::BTreeMap;
use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use docscan_bridge::{CaptureOptions, NativeCamera, RawCapture};
use docscan_core::AppConfig;
use docscan_core::error::{DocScanError, Result};
use docscan_core::types::{
    CameraFacing, CameraPermission, CaptureMetadata, CapturedImage, ImageId,
};
use tracing::{debug, info, warn};

/// Ordered, in-memory list of photos not yet exported.
///
/// Append-only apart from [`CaptureSession::discard_last`]; cleared after a
/// successful export or when the user cancels.
#[derive(Debug, Clone)]
pub struct CaptureSession {
    images: Vec<CapturedImage>,
    permission: CameraPermission,
    options: CaptureOptions,
}

impl CaptureSession {
    pub fn new(options: CaptureOptions) -> Self {
        Self {
            images: Vec::new(),
            permission: CameraPermission::Undetermined,
            options,
        }
    }

    /// Session using the capture settings from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(CaptureOptions {
            facing: config.default_facing,
            quality: config.capture_quality.clamp(0.0, 1.0),
            exif: config.capture_exif,
        })
    }

    /// Last permission state seen from the platform.
    pub fn permission(&self) -> CameraPermission {
        self.permission
    }

    /// Ask the platform for camera access, prompting the user only if they
    /// have not answered before.
    pub fn ensure_permission<C>(&mut self, camera: &C) -> Result<CameraPermission>
    where
        C: NativeCamera + ?Sized,
    {
        let mut status = camera.camera_permission()?;
        if status == CameraPermission::Undetermined {
            status = camera.request_camera_permission()?;
        }
        if status == CameraPermission::Denied {
            warn!("camera permission denied");
        }
        self.permission = status;
        Ok(status)
    }

    /// Take a photo and append it to the session.
    ///
    /// Without a prior grant the camera is not touched and
    /// `PermissionDenied` is returned.
    pub fn capture<C>(&mut self, camera: &C) -> Result<&CapturedImage>
    where
        C: NativeCamera + ?Sized,
    {
        if !self.permission.is_granted() {
            return Err(DocScanError::PermissionDenied);
        }

        let raw = camera
            .capture_photo(&self.options)
            .map_err(|e| match e {
                DocScanError::PermissionDenied | DocScanError::PlatformUnavailable => e,
                other => DocScanError::CameraCapture(other.to_string()),
            })?
            .ok_or_else(|| DocScanError::CameraCapture("no photo returned".into()))?;

        if raw.jpeg.is_empty() {
            return Err(DocScanError::CameraCapture("camera returned an empty image".into()));
        }

        let image = captured_image(raw);
        info!(
            id = %image.id,
            bytes = image.encoded_len(),
            count = self.images.len() + 1,
            "photo captured"
        );
        self.images.push(image);
        Ok(&self.images[self.images.len() - 1])
    }

    /// Remove the most recent photo (the "retake" action).
    pub fn discard_last(&mut self) -> Option<CapturedImage> {
        let removed = self.images.pop();
        if let Some(ref image) = removed {
            debug!(id = %image.id, remaining = self.images.len(), "photo discarded");
        }
        removed
    }

    pub fn current_count(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[CapturedImage] {
        &self.images
    }

    /// Most recent photo, shown as the preview.
    pub fn last(&self) -> Option<&CapturedImage> {
        self.images.last()
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn facing(&self) -> CameraFacing {
        self.options.facing
    }

    /// Switch between the back and front cameras.
    pub fn toggle_facing(&mut self) -> CameraFacing {
        self.options.facing = self.options.facing.toggled();
        self.options.facing
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new(CaptureOptions::default())
    }
}

fn captured_image(raw: RawCapture) -> CapturedImage {
    let dimensions = jpeg_dimensions(&raw.jpeg);
    CapturedImage {
        id: ImageId::new(),
        encoded: STANDARD.encode(&raw.jpeg),
        origin_uri: raw.uri,
        metadata: CaptureMetadata {
            captured_at: Utc::now(),
            width: dimensions.map(|(w, _)| w),
            height: dimensions.map(|(_, h)| h),
            exif: raw.exif,
        },
    }
}

/// Build a `CapturedImage` from JPEG bytes obtained outside the camera
/// (e.g. an image picked from disk on desktop).
pub fn captured_image_from_jpeg(jpeg: Vec<u8>, origin_uri: impl Into<String>) -> CapturedImage {
    captured_image(RawCapture {
        jpeg,
        uri: origin_uri.into(),
        exif: BTreeMap::new(),
    })
}

fn jpeg_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::{Cell, RefCell};

    use image::{ImageFormat, Rgb, RgbImage};

    use super::*;

    /// Encode a small solid-colour JPEG.
    pub(crate) fn jpeg(width: u32, height: u32, shade: u8) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([shade, shade, 255 - shade]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Jpeg).unwrap();
        out.into_inner()
    }

    pub(crate) struct FakeCamera {
        pub status: Cell<CameraPermission>,
        pub grant_on_request: bool,
        pub shots: RefCell<Vec<Option<RawCapture>>>,
        pub capture_calls: Cell<usize>,
        pub last_facing: Cell<Option<CameraFacing>>,
    }

    impl FakeCamera {
        pub(crate) fn new(status: CameraPermission) -> Self {
            Self {
                status: Cell::new(status),
                grant_on_request: true,
                shots: RefCell::new(Vec::new()),
                capture_calls: Cell::new(0),
                last_facing: Cell::new(None),
            }
        }

        pub(crate) fn with_shot(self, jpeg: Vec<u8>) -> Self {
            self.shots.borrow_mut().push(Some(RawCapture {
                jpeg,
                uri: "file:///cache/Camera/shot.jpg".into(),
                exif: BTreeMap::from([("Orientation".into(), "1".into())]),
            }));
            self
        }
    }

    impl NativeCamera for FakeCamera {
        fn camera_permission(&self) -> Result<CameraPermission> {
            Ok(self.status.get())
        }

        fn request_camera_permission(&self) -> Result<CameraPermission> {
            let granted = if self.grant_on_request {
                CameraPermission::Granted
            } else {
                CameraPermission::Denied
            };
            self.status.set(granted);
            Ok(granted)
        }

        fn capture_photo(&self, options: &CaptureOptions) -> Result<Option<RawCapture>> {
            self.capture_calls.set(self.capture_calls.get() + 1);
            self.last_facing.set(Some(options.facing));
            let mut shots = self.shots.borrow_mut();
            if shots.is_empty() {
                return Err(DocScanError::Bridge("shutter jammed".into()));
            }
            Ok(shots.remove(0))
        }
    }

    #[test]
    fn capture_without_permission_never_touches_camera() {
        let camera = FakeCamera::new(CameraPermission::Granted).with_shot(jpeg(4, 4, 10));
        let mut session = CaptureSession::default();

        let err = session.capture(&camera).unwrap_err();
        assert!(matches!(err, DocScanError::PermissionDenied));
        assert_eq!(camera.capture_calls.get(), 0);
        assert_eq!(session.current_count(), 0);
    }

    #[test]
    fn denied_request_blocks_capture() {
        let mut camera = FakeCamera::new(CameraPermission::Undetermined).with_shot(jpeg(4, 4, 10));
        camera.grant_on_request = false;
        let mut session = CaptureSession::default();

        assert_eq!(session.ensure_permission(&camera).unwrap(), CameraPermission::Denied);
        assert!(matches!(session.capture(&camera), Err(DocScanError::PermissionDenied)));
        assert_eq!(camera.capture_calls.get(), 0);
    }

    #[test]
    fn undetermined_permission_is_requested() {
        let camera = FakeCamera::new(CameraPermission::Undetermined);
        let mut session = CaptureSession::default();
        assert_eq!(session.ensure_permission(&camera).unwrap(), CameraPermission::Granted);
        assert!(session.permission().is_granted());
    }

    #[test]
    fn capture_appends_encoded_image_with_metadata() {
        let camera = FakeCamera::new(CameraPermission::Granted)
            .with_shot(jpeg(8, 6, 10))
            .with_shot(jpeg(8, 6, 200));
        let mut session = CaptureSession::default();
        session.ensure_permission(&camera).unwrap();

        let first = session.capture(&camera).unwrap().clone();
        assert_eq!(first.metadata.width, Some(8));
        assert_eq!(first.metadata.height, Some(6));
        assert_eq!(first.metadata.exif.get("Orientation").map(String::as_str), Some("1"));
        assert_eq!(STANDARD.decode(&first.encoded).unwrap(), jpeg(8, 6, 10));

        session.capture(&camera).unwrap();
        assert_eq!(session.current_count(), 2);
        assert_eq!(session.images()[0].id, first.id);
    }

    #[test]
    fn camera_failure_leaves_session_unchanged() {
        let camera = FakeCamera::new(CameraPermission::Granted);
        let mut session = CaptureSession::default();
        session.ensure_permission(&camera).unwrap();

        let err = session.capture(&camera).unwrap_err();
        assert!(matches!(err, DocScanError::CameraCapture(ref m) if m.contains("shutter jammed")));
        assert!(session.is_empty());
    }

    #[test]
    fn cancelled_capture_is_an_error() {
        let camera = FakeCamera::new(CameraPermission::Granted);
        camera.shots.borrow_mut().push(None);
        let mut session = CaptureSession::default();
        session.ensure_permission(&camera).unwrap();

        assert!(matches!(session.capture(&camera), Err(DocScanError::CameraCapture(_))));
        assert!(session.is_empty());
    }

    #[test]
    fn discard_last_removes_most_recent() {
        let camera = FakeCamera::new(CameraPermission::Granted)
            .with_shot(jpeg(4, 4, 1))
            .with_shot(jpeg(4, 4, 2));
        let mut session = CaptureSession::default();
        session.ensure_permission(&camera).unwrap();
        let first_id = session.capture(&camera).unwrap().id;
        let second_id = session.capture(&camera).unwrap().id;

        assert_eq!(session.discard_last().map(|i| i.id), Some(second_id));
        assert_eq!(session.last().map(|i| i.id), Some(first_id));
        assert_eq!(session.current_count(), 1);

        session.discard_last();
        assert!(session.discard_last().is_none());
    }

    #[test]
    fn toggled_facing_reaches_camera() {
        let camera = FakeCamera::new(CameraPermission::Granted).with_shot(jpeg(4, 4, 1));
        let mut session = CaptureSession::default();
        session.ensure_permission(&camera).unwrap();

        assert_eq!(session.toggle_facing(), CameraFacing::Front);
        session.capture(&camera).unwrap();
        assert_eq!(camera.last_facing.get(), Some(CameraFacing::Front));
    }

    #[test]
    fn from_config_uses_configured_facing() {
        let config = AppConfig {
            default_facing: CameraFacing::Front,
            ..AppConfig::default()
        };
        assert_eq!(CaptureSession::from_config(&config).facing(), CameraFacing::Front);
    }
}
