// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: picks the platform bridge, roots storage in its
// documents directory, and hands the UI ready-made browsers and exporters.
//
// Every field is Arc-wrapped or cheap to clone so the struct can be moved
// into Dioxus closures and `spawn`ed tasks.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use docscan_bridge::{NativeCamera, NativeHtmlPrint, NativeShare, PlatformBridge};
use docscan_core::AppConfig;
use docscan_core::error::Result;
use docscan_document::DocumentExporter;
use docscan_storage::{DirectoryBrowser, DocumentBrowser, StorageGateway};
use tracing::{info, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    bridge: Arc<dyn PlatformBridge>,
    gateway: StorageGateway,
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_default();
        let bridge = select_bridge(&config);
        let root = bridge.documents_dir()?;
        let gateway = StorageGateway::new(root, config.managed_folder.clone());

        info!(
            platform = bridge.platform_name(),
            managed = %gateway.managed_dir().display(),
            "app services initialised"
        );

        Ok(Self {
            bridge,
            gateway,
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
        })
    }

    /// Services rooted in the local data directory, used when the platform
    /// cannot report a documents directory.
    pub fn fallback() -> Self {
        let dir = data_dir::data_dir();
        let config = load_config(&dir).unwrap_or_default();
        let gateway = StorageGateway::new(
            data_dir::data_subdir("documents"),
            config.managed_folder.clone(),
        );
        Self {
            bridge: select_bridge(&config),
            gateway,
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
        }
    }

    pub fn platform_name(&self) -> String {
        self.bridge.platform_name().to_owned()
    }

    // -- Native capabilities -------------------------------------------------

    pub fn camera(&self) -> &dyn NativeCamera {
        self.bridge.as_ref()
    }

    pub fn sharer(&self) -> &dyn NativeShare {
        self.bridge.as_ref()
    }

    // -- Storage -------------------------------------------------------------

    pub fn gateway(&self) -> &StorageGateway {
        &self.gateway
    }

    pub fn document_browser(&self) -> DocumentBrowser {
        DocumentBrowser::new(self.gateway.clone())
    }

    pub fn directory_browser(&self) -> DirectoryBrowser {
        DirectoryBrowser::new(self.gateway.clone())
    }

    /// Exporter honouring the current collision policy.
    pub fn exporter(&self) -> DocumentExporter {
        let renderer: Arc<dyn NativeHtmlPrint> = self.bridge.clone();
        DocumentExporter::new(self.gateway.clone(), renderer)
            .with_policy(self.config().collision_policy)
    }

    // -- Config Persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        match self.config.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Update and persist the config.
    ///
    /// The managed folder name is only read at startup; a change takes
    /// effect on the next launch.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        match self.config.lock() {
            Ok(mut guard) => *guard = config.clone(),
            Err(poisoned) => *poisoned.into_inner() = config.clone(),
        }
        persist_config(&self.data_dir, config)
    }
}

#[cfg(any(target_os = "ios", target_os = "android"))]
fn select_bridge(_config: &AppConfig) -> Arc<dyn PlatformBridge> {
    Arc::from(docscan_bridge::platform_bridge())
}

#[cfg(not(any(target_os = "ios", target_os = "android")))]
fn select_bridge(config: &AppConfig) -> Arc<dyn PlatformBridge> {
    Arc::new(super::desktop::DesktopBridge::new(config))
}

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use docscan_core::CollisionPolicy;

    use super::*;

    #[test]
    fn config_round_trips_through_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            collision_policy: CollisionPolicy::AutoRename,
            ..AppConfig::default()
        };
        persist_config(tmp.path(), &config).unwrap();
        assert_eq!(load_config(tmp.path()), Some(config));
    }

    #[test]
    fn corrupt_config_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "{not json").unwrap();
        assert_eq!(load_config(tmp.path()), None);
    }

    #[test]
    fn missing_config_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(load_config(tmp.path()), None);
    }
}
