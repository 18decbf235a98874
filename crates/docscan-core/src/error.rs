// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for DocScan.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all DocScan operations.
#[derive(Debug, Error)]
pub enum DocScanError {
    // -- Capture errors --
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("camera capture failed: {0}")]
    CameraCapture(String),

    // -- Export errors --
    #[error("no images to export")]
    EmptyInput,

    #[error("invalid document name: {0:?}")]
    InvalidName(String),

    #[error("rendering failed: {0}")]
    Rendering(String),

    #[error("document already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage --
    #[error("{op} failed for {}: {source}", path.display())]
    FileSystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("file I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

impl DocScanError {
    /// Wrap an I/O error with the file-system operation and path that caused it.
    pub fn fs(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileSystem {
            op,
            path: path.into(),
            source,
        }
    }

    /// Whether the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::FileSystem { source, .. } | Self::Io(source) => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_error_names_operation_and_path() {
        let err = DocScanError::fs(
            "delete",
            "/docs/scan.pdf",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("delete failed for /docs/scan.pdf"));
        assert!(err.is_not_found());
    }

    #[test]
    fn other_errors_are_not_not_found() {
        assert!(!DocScanError::EmptyInput.is_not_found());
        let denied = DocScanError::fs(
            "move",
            "/docs",
            io::Error::new(io::ErrorKind::PermissionDenied, "ro"),
        );
        assert!(!denied.is_not_found());
    }
}
