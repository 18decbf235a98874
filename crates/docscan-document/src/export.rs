// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document exporter: turns the capture session into `<name>.pdf` in
// managed storage.
//
// Steps: sanitize the name, build the markup, rasterize through the host
// print service, ensure the managed folder exists, move the rendered file in.
// A failure after rendering removes the temporary file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use docscan_bridge::NativeHtmlPrint;
use docscan_core::CollisionPolicy;
use docscan_core::error::{DocScanError, Result};
use docscan_core::types::CapturedImage;
use docscan_storage::StorageGateway;
use tracing::{error, info, instrument, warn};

use crate::markup::ScanMarkup;
use crate::sanitize::pdf_file_name;

/// Exports captured images into managed storage.
#[derive(Clone)]
pub struct DocumentExporter {
    gateway: StorageGateway,
    renderer: Arc<dyn NativeHtmlPrint>,
    policy: CollisionPolicy,
}

impl DocumentExporter {
    pub fn new(gateway: StorageGateway, renderer: Arc<dyn NativeHtmlPrint>) -> Self {
        Self {
            gateway,
            renderer,
            policy: CollisionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Export `images`, in order, as `<sanitized file_base_name>.pdf`.
    ///
    /// Returns the final path. The caller clears the capture session only
    /// after this succeeds.
    #[instrument(skip_all, fields(images = images.len(), name = file_base_name))]
    pub async fn export(&self, images: &[CapturedImage], file_base_name: &str) -> Result<PathBuf> {
        if images.is_empty() {
            return Err(DocScanError::EmptyInput);
        }
        if file_base_name.is_empty() {
            return Err(DocScanError::InvalidName(file_base_name.to_owned()));
        }

        let file_name = pdf_file_name(file_base_name);
        let markup = ScanMarkup::build(images);
        let pages = markup.page_count();

        let rendered = self.render(markup).await?;

        match self.persist(&rendered, &file_name).await {
            Ok(path) => {
                info!(path = %path.display(), pages, "document exported");
                Ok(path)
            }
            Err(e) => {
                error!(error = %e, "export failed after rendering");
                if let Err(cleanup) = tokio::fs::remove_file(&rendered).await {
                    warn!(path = %rendered.display(), error = %cleanup, "could not remove rendered file");
                }
                Err(e)
            }
        }
    }

    /// Rasterize on the blocking pool so other tasks keep running meanwhile.
    async fn render(&self, markup: ScanMarkup) -> Result<PathBuf> {
        let renderer = Arc::clone(&self.renderer);
        let html = markup.into_html();
        tokio::task::spawn_blocking(move || renderer.print_to_file(&html))
            .await
            .map_err(|e| DocScanError::Rendering(format!("render task failed: {e}")))?
            .map_err(|e| match e {
                DocScanError::Rendering(_) | DocScanError::PlatformUnavailable => e,
                other => DocScanError::Rendering(other.to_string()),
            })
    }

    async fn persist(&self, rendered: &Path, file_name: &str) -> Result<PathBuf> {
        let dir = self.gateway.managed_dir();
        self.gateway.ensure_dir(&dir).await?;

        let target = self.resolve_target(&dir, file_name).await;
        let overwrite = self.policy == CollisionPolicy::Overwrite;
        self.gateway.move_file(rendered, &target, overwrite).await?;
        Ok(target)
    }

    async fn resolve_target(&self, dir: &Path, file_name: &str) -> PathBuf {
        let target = dir.join(file_name);
        if self.policy != CollisionPolicy::AutoRename || !self.gateway.exists(&target).await {
            return target;
        }

        let stem = file_name.trim_end_matches(".pdf");
        let mut n: u32 = 1;
        loop {
            let candidate = dir.join(format!("{stem}-{n}.pdf"));
            if !self.gateway.exists(&candidate).await {
                return candidate;
            }
            n += 1;
        }
    }
}
