// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Directory browser: navigate and prune the whole document root, not just
// the managed PDF folder.

use std::path::{Component, Path, PathBuf};

use docscan_core::error::{DocScanError, Result};
use docscan_core::types::DirectoryEntry;
use tracing::{debug, info};

use crate::gateway::StorageGateway;

/// Navigation state for the file tree screen.
#[derive(Debug, Clone)]
pub struct DirectoryBrowser {
    gateway: StorageGateway,
    current: PathBuf,
    entries: Vec<DirectoryEntry>,
}

impl DirectoryBrowser {
    /// Start at the document root. Call `refresh` to load the first listing.
    pub fn new(gateway: StorageGateway) -> Self {
        let current = gateway.root().to_path_buf();
        Self {
            gateway,
            current,
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.gateway.root()
    }

    pub fn current_path(&self) -> &Path {
        &self.current
    }

    pub fn is_at_root(&self) -> bool {
        self.current == self.gateway.root()
    }

    /// Entries of the current directory as of the last refresh.
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// List `path` in file-system enumeration order.
    pub async fn list(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        self.gateway.list_entries(path, |_| true).await
    }

    /// Reload the current directory.
    pub async fn refresh(&mut self) -> Result<&[DirectoryEntry]> {
        self.entries = self.list(&self.current).await?;
        Ok(&self.entries)
    }

    /// Descend into a directory entry.
    pub async fn navigate_into(&mut self, entry: &DirectoryEntry) -> Result<&[DirectoryEntry]> {
        if !entry.is_directory {
            return Err(DocScanError::NotADirectory(entry.path.clone()));
        }
        self.check_inside_root(&entry.path)?;

        let entries = self.list(&entry.path).await?;
        self.current = entry.path.clone();
        self.entries = entries;
        debug!(path = %self.current.display(), "navigated into directory");
        Ok(&self.entries)
    }

    /// Go to the parent directory. Does nothing at the root.
    pub async fn navigate_up(&mut self) -> Result<&[DirectoryEntry]> {
        if self.is_at_root() {
            return Ok(&self.entries);
        }
        let parent = match self.current.parent() {
            Some(p) if p.starts_with(self.gateway.root()) => p.to_path_buf(),
            _ => self.gateway.root().to_path_buf(),
        };

        let entries = self.list(&parent).await?;
        self.current = parent;
        self.entries = entries;
        debug!(path = %self.current.display(), "navigated up");
        Ok(&self.entries)
    }

    /// Delete an entry, then reload the current directory.
    ///
    /// Directories are removed recursively and a missing directory is not an
    /// error. Files must exist.
    pub async fn delete(&mut self, entry: &DirectoryEntry) -> Result<&[DirectoryEntry]> {
        self.check_inside_root(&entry.path)?;

        if entry.is_directory {
            self.gateway.delete_dir_all(&entry.path).await?;
        } else {
            self.gateway.delete_file(&entry.path).await?;
        }
        info!(path = %entry.path.display(), "entry deleted");
        self.refresh().await
    }

    /// Below the root, compared component-wise with no `.` or `..` steps.
    fn check_inside_root(&self, path: &Path) -> Result<()> {
        let root = self.gateway.root();
        let relative = path.strip_prefix(root).ok();
        let escapes = relative.is_none_or(|rel| {
            rel.as_os_str().is_empty()
                || rel.components().any(|c| !matches!(c, Component::Normal(_)))
        });
        if escapes {
            return Err(DocScanError::InvalidName(path.display().to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (tempfile::TempDir, DirectoryBrowser) {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("EscaneosDocApp")).unwrap();
        std::fs::write(tmp.path().join("EscaneosDocApp").join("scan.pdf"), b"%PDF").unwrap();
        std::fs::write(tmp.path().join("readme.txt"), b"hi").unwrap();
        let browser = DirectoryBrowser::new(StorageGateway::new(tmp.path(), "EscaneosDocApp"));
        (tmp, browser)
    }

    fn find<'a>(entries: &'a [DirectoryEntry], name: &str) -> &'a DirectoryEntry {
        entries
            .iter()
            .find(|e| e.display_name == name)
            .unwrap_or_else(|| panic!("{name} not listed"))
    }

    #[tokio::test]
    async fn lists_everything_at_root() {
        let (_tmp, mut browser) = setup();
        let entries = browser.refresh().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(find(entries, "EscaneosDocApp").is_directory);
        assert!(!find(entries, "readme.txt").is_directory);
    }

    #[tokio::test]
    async fn navigate_up_at_root_is_noop() {
        let (tmp, mut browser) = setup();
        browser.refresh().await.unwrap();
        browser.navigate_up().await.unwrap();
        assert_eq!(browser.current_path(), tmp.path());
        assert!(browser.is_at_root());
    }

    #[tokio::test]
    async fn navigate_into_and_back_up() {
        let (tmp, mut browser) = setup();
        let folder = find(browser.refresh().await.unwrap(), "EscaneosDocApp").clone();

        let inside = browser.navigate_into(&folder).await.unwrap();
        assert_eq!(inside.len(), 1);
        assert_eq!(inside[0].display_name, "scan.pdf");
        assert_eq!(browser.current_path(), tmp.path().join("EscaneosDocApp"));

        browser.navigate_up().await.unwrap();
        assert_eq!(browser.current_path(), tmp.path());
        assert_eq!(browser.entries().len(), 2);
    }

    #[tokio::test]
    async fn navigate_into_file_is_rejected() {
        let (tmp, mut browser) = setup();
        let file = find(browser.refresh().await.unwrap(), "readme.txt").clone();
        let err = browser.navigate_into(&file).await.unwrap_err();
        assert!(matches!(err, DocScanError::NotADirectory(_)));
        assert_eq!(browser.current_path(), tmp.path());
    }

    #[tokio::test]
    async fn delete_directory_is_idempotent() {
        let (_tmp, mut browser) = setup();
        let folder = find(browser.refresh().await.unwrap(), "EscaneosDocApp").clone();

        let after = browser.delete(&folder).await.unwrap();
        assert_eq!(after.len(), 1);
        browser.delete(&folder).await.unwrap();
    }

    #[tokio::test]
    async fn delete_missing_file_fails() {
        let (_tmp, mut browser) = setup();
        let file = find(browser.refresh().await.unwrap(), "readme.txt").clone();

        browser.delete(&file).await.unwrap();
        let err = browser.delete(&file).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn refuses_paths_outside_root() {
        let (_tmp, mut browser) = setup();
        let outside = DirectoryEntry {
            path: PathBuf::from("/"),
            display_name: "/".into(),
            is_directory: true,
            size_bytes: None,
            modified_at: None,
            exists: true,
        };
        assert!(matches!(
            browser.delete(&outside).await,
            Err(DocScanError::InvalidName(_))
        ));
        assert!(matches!(
            browser.navigate_into(&outside).await,
            Err(DocScanError::InvalidName(_))
        ));
    }

    #[tokio::test]
    async fn refuses_parent_steps_out_of_root() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("docs");
        let sibling = outer.path().join("other");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir_all(&sibling).unwrap();
        std::fs::write(sibling.join("keep.txt"), b"x").unwrap();

        let mut browser = DirectoryBrowser::new(StorageGateway::new(&root, "EscaneosDocApp"));
        let sneaky = DirectoryEntry {
            path: root.join("..").join("other"),
            display_name: "other".into(),
            is_directory: true,
            size_bytes: None,
            modified_at: None,
            exists: true,
        };

        assert!(matches!(
            browser.navigate_into(&sneaky).await,
            Err(DocScanError::InvalidName(_))
        ));
        assert_eq!(browser.current_path(), root.as_path());
        assert!(matches!(
            browser.delete(&sneaky).await,
            Err(DocScanError::InvalidName(_))
        ));
        assert!(sibling.join("keep.txt").exists());
    }
}
