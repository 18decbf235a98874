// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Storage gateway: async wrapper over the host file system.

use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use docscan_core::error::{DocScanError, Result};
use docscan_core::types::DirectoryEntry;
use tracing::{debug, info, instrument, warn};

/// File system access rooted at the app document directory.
///
/// Cheap to clone; every screen that needs storage holds its own copy.
#[derive(Debug, Clone)]
pub struct StorageGateway {
    root: PathBuf,
    managed_folder: String,
}

impl StorageGateway {
    /// Create a gateway over `root` with exported PDFs kept in `managed_folder`.
    pub fn new(root: impl Into<PathBuf>, managed_folder: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            managed_folder: managed_folder.into(),
        }
    }

    /// The document root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory that holds exported PDFs.
    pub fn managed_dir(&self) -> PathBuf {
        self.root.join(&self.managed_folder)
    }

    /// Whether anything exists at `path`.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    /// Create `dir` and any missing parents.
    pub async fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if self.exists(dir).await {
            return Ok(());
        }
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| DocScanError::fs("create directory", dir, e))?;
        info!(path = %dir.display(), "created directory");
        Ok(())
    }

    /// Describe a single path. Missing paths yield `exists: false`.
    pub async fn entry(&self, path: &Path) -> DirectoryEntry {
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match tokio::fs::metadata(path).await {
            Ok(meta) => DirectoryEntry {
                path: path.to_path_buf(),
                display_name,
                is_directory: meta.is_dir(),
                size_bytes: meta.is_file().then_some(meta.len()),
                modified_at: meta.modified().ok().map(DateTime::<Utc>::from),
                exists: true,
            },
            Err(_) => DirectoryEntry {
                path: path.to_path_buf(),
                display_name,
                is_directory: false,
                size_bytes: None,
                modified_at: None,
                exists: false,
            },
        }
    }

    /// List the direct children of `dir` that satisfy `keep`, in the order
    /// the file system enumerates them.
    pub async fn list_entries<F>(&self, dir: &Path, keep: F) -> Result<Vec<DirectoryEntry>>
    where
        F: Fn(&DirectoryEntry) -> bool,
    {
        let mut reader = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| DocScanError::fs("read directory", dir, e))?;

        let mut entries = Vec::new();
        while let Some(child) = reader
            .next_entry()
            .await
            .map_err(|e| DocScanError::fs("read directory", dir, e))?
        {
            let entry = self.entry(&child.path()).await;
            if keep(&entry) {
                entries.push(entry);
            }
        }

        debug!(path = %dir.display(), count = entries.len(), "listed directory");
        Ok(entries)
    }

    /// Move a file. An existing destination is replaced only when `overwrite`
    /// is set. Falls back to copy + remove across file systems.
    #[instrument(skip_all, fields(from = %from.display(), to = %to.display()))]
    pub async fn move_file(&self, from: &Path, to: &Path, overwrite: bool) -> Result<()> {
        if !overwrite && self.exists(to).await {
            return Err(DocScanError::AlreadyExists(to.to_path_buf()));
        }

        match tokio::fs::rename(from, to).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                debug!("rename crosses devices, copying instead");
                copy_then_replace(from, to).await?;
                tokio::fs::remove_file(from)
                    .await
                    .map_err(|e| DocScanError::fs("move", from, e))?;
            }
            Err(e) => return Err(DocScanError::fs("move", from, e)),
        }

        info!("moved file");
        Ok(())
    }

    /// Delete a single file. Fails if it does not exist.
    pub async fn delete_file(&self, path: &Path) -> Result<()> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| DocScanError::fs("delete", path, e))?;
        info!(path = %path.display(), "deleted file");
        Ok(())
    }

    /// Delete a directory and everything under it. Succeeds if it is already
    /// gone.
    pub async fn delete_dir_all(&self, path: &Path) -> Result<()> {
        match tokio::fs::remove_dir_all(path).await {
            Ok(()) => {
                info!(path = %path.display(), "deleted directory");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "directory already absent");
                Ok(())
            }
            Err(e) => Err(DocScanError::fs("delete", path, e)),
        }
    }

    /// Read a whole file and return it base64-encoded.
    pub async fn read_base64(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DocScanError::fs("read", path, e))?;
        debug!(path = %path.display(), bytes = bytes.len(), "read file");
        Ok(STANDARD.encode(bytes))
    }
}

/// Copy `from` to a hidden sibling of `to`, then rename it into place.
/// `to` is untouched until the copy is complete.
async fn copy_then_replace(from: &Path, to: &Path) -> Result<()> {
    let name = to.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    let partial = to.with_file_name(format!(".{name}.partial"));

    if let Err(e) = tokio::fs::copy(from, &partial).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(DocScanError::fs("move", from, e));
    }
    if let Err(e) = tokio::fs::rename(&partial, to).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(DocScanError::fs("move", to, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(dir: &tempfile::TempDir) -> StorageGateway {
        StorageGateway::new(dir.path(), "Scans")
    }

    #[tokio::test]
    async fn ensure_dir_creates_nested_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let gw = gateway(&tmp);
        let nested = tmp.path().join("a").join("b");

        gw.ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        // Second call is a no-op.
        gw.ensure_dir(&nested).await.unwrap();
    }

    #[tokio::test]
    async fn list_entries_applies_predicate() {
        let tmp = tempfile::tempdir().unwrap();
        let gw = gateway(&tmp);
        std::fs::write(tmp.path().join("keep.pdf"), b"%PDF").unwrap();
        std::fs::write(tmp.path().join("skip.txt"), b"text").unwrap();
        std::fs::create_dir(tmp.path().join("folder")).unwrap();

        let all = gw.list_entries(tmp.path(), |_| true).await.unwrap();
        assert_eq!(all.len(), 3);

        let pdfs = gw
            .list_entries(tmp.path(), |e| e.display_name.ends_with(".pdf"))
            .await
            .unwrap();
        assert_eq!(pdfs.len(), 1);
        assert_eq!(pdfs[0].display_name, "keep.pdf");
        assert_eq!(pdfs[0].size_bytes, Some(4));
        assert!(pdfs[0].exists);
    }

    #[tokio::test]
    async fn entry_for_missing_path_does_not_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let gw = gateway(&tmp);
        let entry = gw.entry(&tmp.path().join("nope")).await;
        assert!(!entry.exists);
        assert_eq!(entry.display_name, "nope");
    }

    #[tokio::test]
    async fn move_file_respects_overwrite_flag() {
        let tmp = tempfile::tempdir().unwrap();
        let gw = gateway(&tmp);
        let from = tmp.path().join("render.pdf");
        let to = tmp.path().join("final.pdf");
        std::fs::write(&to, b"old").unwrap();

        std::fs::write(&from, b"new").unwrap();
        let err = gw.move_file(&from, &to, false).await.unwrap_err();
        assert!(matches!(err, DocScanError::AlreadyExists(_)));
        assert!(from.exists());

        gw.move_file(&from, &to, true).await.unwrap();
        assert!(!from.exists());
        assert_eq!(std::fs::read(&to).unwrap(), b"new");
    }

    #[tokio::test]
    async fn failed_copy_keeps_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let to = tmp.path().join("final.pdf");
        std::fs::write(&to, b"old").unwrap();

        let err = copy_then_replace(&tmp.path().join("missing.pdf"), &to).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(std::fs::read(&to).unwrap(), b"old");
        assert!(!tmp.path().join(".final.pdf.partial").exists());
    }

    #[tokio::test]
    async fn copy_then_replace_swaps_in_new_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let from = tmp.path().join("render.pdf");
        let to = tmp.path().join("final.pdf");
        std::fs::write(&from, b"new").unwrap();
        std::fs::write(&to, b"old").unwrap();

        copy_then_replace(&from, &to).await.unwrap();
        assert_eq!(std::fs::read(&to).unwrap(), b"new");
        assert!(!tmp.path().join(".final.pdf.partial").exists());
    }

    #[tokio::test]
    async fn delete_file_is_strict_and_dir_delete_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let gw = gateway(&tmp);

        let err = gw.delete_file(&tmp.path().join("ghost.pdf")).await.unwrap_err();
        assert!(err.is_not_found());

        let dir = tmp.path().join("sub");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("inner.txt"), b"x").unwrap();
        gw.delete_dir_all(&dir).await.unwrap();
        assert!(!dir.exists());
        gw.delete_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn read_base64_encodes_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let gw = gateway(&tmp);
        let path = tmp.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();
        assert_eq!(gw.read_base64(&path).await.unwrap(), "JVBERi0xLjc=");
    }

    #[test]
    fn managed_dir_is_under_root() {
        let gw = StorageGateway::new("/data/docs", "EscaneosDocApp");
        assert_eq!(gw.managed_dir(), PathBuf::from("/data/docs/EscaneosDocApp"));
    }
}
