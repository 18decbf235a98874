// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document browser: lists, views, shares and deletes exported PDFs in
// managed storage.

use std::path::{Path, PathBuf};

use chrono::Utc;
use docscan_bridge::{NativeShare, ShareOptions};
use docscan_core::error::{DocScanError, Result};
use docscan_core::types::{DirectoryEntry, DocumentView, ManagedDocument};
use tracing::{info, instrument};

use crate::gateway::StorageGateway;

const PDF_SUFFIX: &str = ".pdf";

/// A delete the user has been asked to confirm.
///
/// Only `DocumentBrowser::confirm_delete` consumes it; dropping it cancels.
#[derive(Debug)]
#[must_use = "a pending deletion does nothing until confirmed"]
pub struct PendingDeletion {
    file_name: String,
    path: PathBuf,
}

impl PendingDeletion {
    /// Name to show in the confirmation prompt.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Browser over the managed PDF folder, holding the last listing it loaded.
#[derive(Debug, Clone)]
pub struct DocumentBrowser {
    gateway: StorageGateway,
    documents: Vec<ManagedDocument>,
}

impl DocumentBrowser {
    pub fn new(gateway: StorageGateway) -> Self {
        Self {
            gateway,
            documents: Vec::new(),
        }
    }

    /// Documents from the most recent successful listing.
    pub fn documents(&self) -> &[ManagedDocument] {
        &self.documents
    }

    /// List managed PDFs, most recently modified first.
    ///
    /// A managed folder that does not exist yet lists as empty.
    pub async fn list(&self) -> Result<Vec<ManagedDocument>> {
        let dir = self.gateway.managed_dir();
        if !self.gateway.exists(&dir).await {
            return Ok(Vec::new());
        }

        let entries = self.gateway.list_entries(&dir, is_managed_pdf).await?;
        let mut documents: Vec<ManagedDocument> = entries
            .into_iter()
            .map(|entry| ManagedDocument {
                file_name: entry.display_name,
                modified_at: entry.modified_at.unwrap_or_else(Utc::now),
                size_bytes: entry.size_bytes.unwrap_or(0),
            })
            .collect();

        // Newest first; equal timestamps fall back to name, also descending.
        documents.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.file_name.cmp(&a.file_name))
        });
        Ok(documents)
    }

    /// Reload the listing and keep it as the current state.
    pub async fn refresh(&mut self) -> Result<&[ManagedDocument]> {
        self.documents = self.list().await?;
        Ok(&self.documents)
    }

    /// Full path of a managed document. `name` must be a bare file name.
    pub fn path_of(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.gateway.managed_dir().join(name))
    }

    /// First half of a delete: resolve the document and hand back a token the
    /// caller must confirm with the user.
    pub async fn request_delete(&self, name: &str) -> Result<PendingDeletion> {
        let path = self.path_of(name)?;
        Ok(PendingDeletion {
            file_name: name.to_owned(),
            path,
        })
    }

    /// Delete a confirmed document and reload the listing.
    ///
    /// On failure the current listing is left as it was.
    #[instrument(skip_all, fields(file = %pending.file_name))]
    pub async fn confirm_delete(&mut self, pending: PendingDeletion) -> Result<&[ManagedDocument]> {
        self.gateway.delete_file(&pending.path).await?;
        info!("document deleted");
        self.refresh().await
    }

    /// Read a document for in-app viewing.
    pub async fn view(&self, name: &str) -> Result<DocumentView> {
        let path = self.path_of(name)?;
        let base64 = self.gateway.read_base64(&path).await?;
        Ok(DocumentView {
            file_name: name.to_owned(),
            base64,
        })
    }

    /// Hand a document to the native share sheet.
    pub async fn share(&self, name: &str, sharer: &dyn NativeShare) -> Result<()> {
        let path = self.path_of(name)?;
        if !self.gateway.exists(&path).await {
            return Err(DocScanError::fs(
                "share",
                path,
                std::io::ErrorKind::NotFound.into(),
            ));
        }
        sharer.share_file(&path, &ShareOptions::pdf())?;
        info!(file = name, "document shared");
        Ok(())
    }
}

fn is_managed_pdf(entry: &DirectoryEntry) -> bool {
    !entry.is_directory && entry.display_name.ends_with(PDF_SUFFIX)
}

fn validate_name(name: &str) -> Result<()> {
    let bare = Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name);
    if name.is_empty() || !bare || name == ".." || name.contains(['/', '\\']) {
        return Err(DocScanError::InvalidName(name.to_owned()));
    }
    Ok(())
}
