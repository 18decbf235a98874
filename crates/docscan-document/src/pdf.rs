// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF inspection for saved documents, using `lopdf`.

use std::path::Path;

use docscan_core::error::{DocScanError, Result};
use lopdf::Document;
use tracing::{debug, instrument};

/// Number of pages in an in-memory PDF.
pub fn page_count(data: &[u8]) -> Result<usize> {
    let document = Document::load_mem(data)
        .map_err(|err| DocScanError::PdfError(format!("failed to load PDF from memory: {err}")))?;
    Ok(document.get_pages().len())
}

/// Number of pages in a PDF on disk.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn page_count_at(path: &Path) -> Result<usize> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| DocScanError::fs("read", path, e))?;
    let pages = page_count(&data)?;
    debug!(pages, "PDF inspected");
    Ok(pages)
}
