// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Where DocScan keeps its config, render cache and desktop document root.
//
// Mobile shells report their own documents directory through the bridge;
// this module only decides the local app folder.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::warn;

const APP_FOLDER: &str = "docscan";

/// The app folder, created on first use.
pub fn data_dir() -> PathBuf {
    let base = base_dir_from(std::env::var_os("XDG_DATA_HOME"), std::env::var_os("HOME"))
        .unwrap_or_else(std::env::temp_dir);
    created(base.join(APP_FOLDER))
}

/// A named folder inside [`data_dir`], such as `cache` or `documents`.
pub fn data_subdir(name: &str) -> PathBuf {
    created(data_dir().join(name))
}

/// Pick the base data directory from `XDG_DATA_HOME` and `HOME`.
///
/// XDG paths must be absolute; a relative or empty value is ignored and
/// the `~/.local/share` default applies.
fn base_dir_from(xdg_data_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let xdg = xdg_data_home.map(PathBuf::from).filter(|p| p.is_absolute());
    xdg.or_else(|| {
        home.filter(|h| !h.is_empty())
            .map(|h| Path::new(&h).join(".local").join("share"))
    })
}

/// Create `dir` if needed. Failure is logged; later file operations report
/// the concrete error with its path.
fn created(dir: PathBuf) -> PathBuf {
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!(path = %dir.display(), error = %e, "could not create data directory");
    }
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_xdg_wins() {
        let base = base_dir_from(Some("/srv/xdg".into()), Some("/home/ana".into()));
        assert_eq!(base, Some(PathBuf::from("/srv/xdg")));
    }

    #[test]
    fn relative_or_empty_xdg_falls_back_to_home() {
        let expected = Some(PathBuf::from("/home/ana/.local/share"));
        assert_eq!(base_dir_from(Some("data".into()), Some("/home/ana".into())), expected);
        assert_eq!(base_dir_from(Some("".into()), Some("/home/ana".into())), expected);
    }

    #[test]
    fn nothing_set_means_no_base() {
        assert_eq!(base_dir_from(None, None), None);
        assert_eq!(base_dir_from(None, Some("".into())), None);
    }

    #[test]
    fn created_makes_nested_folders() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = created(tmp.path().join("a").join("b"));
        assert!(dir.is_dir());
    }
}
