// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages shown as blocking notifications.
//
// Every failure is scoped to the user action that triggered it. The UI shows
// the message in a dialog unless `notify` is false (camera permission denial
// simply prevents the dependent action).

use std::io;

use crate::error::DocScanError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Trying the same action again may work.
    Transient,
    /// User must do something first (grant access, type a name, take a photo).
    ActionRequired,
    /// Will not succeed on this device or with this input.
    Permanent,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Short summary (dialog title).
    pub message: String,
    /// What the user should try (dialog body).
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
    /// Whether to show a blocking notification at all.
    pub notify: bool,
}

impl HumanError {
    fn shown(message: impl Into<String>, suggestion: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            severity,
            notify: true,
        }
    }
}

/// Convert a `DocScanError` into a `HumanError` for the notification dialog.
pub fn humanize_error(err: &DocScanError) -> HumanError {
    match err {
        DocScanError::PermissionDenied => HumanError {
            message: "Camera access is needed to scan.".into(),
            suggestion: "Allow camera access to take photos.".into(),
            severity: Severity::ActionRequired,
            notify: false,
        },

        DocScanError::CameraCapture(_) => HumanError::shown(
            "The photo couldn't be taken.",
            "Please try again.",
            Severity::Transient,
        ),

        DocScanError::EmptyInput => HumanError::shown(
            "There are no photos to put in the PDF.",
            "Take at least one photo first.",
            Severity::ActionRequired,
        ),

        DocScanError::InvalidName(_) => HumanError::shown(
            "The document needs a name.",
            "Type a name for the file, then save again.",
            Severity::ActionRequired,
        ),

        DocScanError::Rendering(detail) => HumanError::shown(
            "The PDF couldn't be created.",
            format!("Error: {detail}"),
            Severity::Transient,
        ),

        DocScanError::AlreadyExists(path) => HumanError::shown(
            "A document with that name already exists.",
            format!(
                "Choose a different name. ({})",
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            ),
            Severity::ActionRequired,
        ),

        DocScanError::PdfError(_) => HumanError::shown(
            "There's a problem with this PDF file.",
            "The file may be damaged. Try exporting the scan again.",
            Severity::Permanent,
        ),

        DocScanError::FileSystem { op, source, .. } => humanize_io(op, source),

        DocScanError::Io(source) => humanize_io("file operation", source),

        DocScanError::NotADirectory(_) => HumanError::shown(
            "That item isn't a folder.",
            "Only folders can be opened in the file browser.",
            Severity::ActionRequired,
        ),

        DocScanError::Serialization(_) => HumanError::shown(
            "The app had an internal data problem.",
            "Try again. Your settings were reset to their defaults.",
            Severity::Transient,
        ),

        DocScanError::Bridge(_) => HumanError::shown(
            "A device feature didn't work.",
            "Try again. Some features may not be available on all devices.",
            Severity::Transient,
        ),

        DocScanError::PlatformUnavailable => HumanError::shown(
            "This feature isn't available on your device.",
            "Camera and sharing need a phone or tablet.",
            Severity::Permanent,
        ),
    }
}

fn humanize_io(op: &str, source: &io::Error) -> HumanError {
    match source.kind() {
        io::ErrorKind::NotFound => HumanError::shown(
            "The file couldn't be found.",
            format!("It may have been moved or deleted already ({op})."),
            Severity::ActionRequired,
        ),
        io::ErrorKind::PermissionDenied => HumanError::shown(
            "The app isn't allowed to change that file.",
            format!("Check storage permissions and try again ({op})."),
            Severity::ActionRequired,
        ),
        _ => HumanError::shown(
            "There was a problem reading or writing a file.",
            format!("Try again. Your device's storage may be full ({op}: {source})."),
            Severity::Transient,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_is_silent() {
        let human = humanize_error(&DocScanError::PermissionDenied);
        assert!(!human.notify);
        assert_eq!(human.severity, Severity::ActionRequired);
    }

    #[test]
    fn rendering_error_carries_detail() {
        let human = humanize_error(&DocScanError::Rendering("webview crashed".into()));
        assert!(human.notify);
        assert!(human.suggestion.contains("webview crashed"));
    }

    #[test]
    fn missing_file_is_action_required() {
        let err = DocScanError::fs(
            "delete",
            "/docs/a.pdf",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("delete"));
    }

    #[test]
    fn empty_input_asks_for_a_photo() {
        let human = humanize_error(&DocScanError::EmptyInput);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.notify);
    }
}
