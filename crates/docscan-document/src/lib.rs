// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-document: From camera shots to a saved PDF.
//
// Holds the in-memory capture session, builds the page markup that embeds
// each photo, rasterizes it (natively or with the desktop renderer), and
// moves the result into managed storage.

pub mod capture;
pub mod export;
pub mod markup;
pub mod pdf;
pub mod render;
pub mod sanitize;

pub use capture::CaptureSession;
pub use export::DocumentExporter;
pub use markup::ScanMarkup;
pub use render::PdfMarkupRenderer;
pub use sanitize::sanitize_file_name;
