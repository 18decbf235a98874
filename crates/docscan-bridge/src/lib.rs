// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! DocScan: Native platform bridge abstractions.
//!
//! The camera, the HTML-to-PDF print service and the share sheet belong to
//! the host platform. This crate defines the traits the rest of the workspace
//! talks to, plus a stub for builds without a native shell.

pub mod stub;
pub mod traits;

pub use traits::{
    CaptureOptions, NativeCamera, NativeDocuments, NativeHtmlPrint, NativeShare, PlatformBridge,
    RawCapture, ShareOptions,
};

/// Bridge used when no native shell has supplied one.
///
/// Mobile shells construct their own `PlatformBridge` and hand it to the app
/// service layer. Desktop builds use the app's own stand-ins instead.
pub fn platform_bridge() -> Box<dyn PlatformBridge> {
    Box::new(stub::StubBridge)
}
