// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Files page: walk the app's documents directory.

use dioxus::prelude::*;

use docscan_core::types::DirectoryEntry;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Files() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut browser = use_signal({
        let svc = svc.clone();
        move || svc.directory_browser()
    });
    let mut confirm = use_signal(|| Option::<DirectoryEntry>::None);

    let _loader = use_resource(move || async move {
        let mut b = browser.peek().clone();
        match b.refresh().await {
            Ok(_) => browser.set(b),
            Err(e) => state.write().report("list directory", &e),
        }
    });

    let current = browser.read().current_path().display().to_string();
    let at_root = browser.read().is_at_root();
    let entries = browser.read().entries().to_vec();

    rsx! {
        div {
            h1 { "Files" }
            div { style: "display: flex; align-items: center; gap: 8px; margin-bottom: 12px;",
                button {
                    style: "padding: 6px 12px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                    disabled: at_root,
                    onclick: move |_| {
                        spawn(async move {
                            let mut b = browser.read().clone();
                            match b.navigate_up().await {
                                Ok(_) => browser.set(b),
                                Err(e) => state.write().report("open folder", &e),
                            }
                        });
                    },
                    "\u{2191} Up"
                }
                span { style: "color: #666; font-size: 12px; overflow-wrap: anywhere;", "{current}" }
            }

            if entries.is_empty() {
                p { style: "text-align: center; color: #aaa; margin: 48px 0;", "This folder is empty." }
            }

            for entry in entries {
                {
                    let icon = if entry.is_directory { "\u{1F4C1}" } else { "\u{1F4C4}" };
                    let detail = match (entry.is_directory, entry.size_bytes) {
                        (false, Some(bytes)) => format!("{} KB", bytes.div_ceil(1024)),
                        _ => String::new(),
                    };
                    let key = entry.path.display().to_string();
                    let open_entry = entry.clone();
                    let delete_entry = entry.clone();
                    rsx! {
                        div { key: "{key}",
                            style: "display: flex; align-items: center; gap: 12px; padding: 10px 0; border-bottom: 1px solid #f0f0f0;",
                            span { style: "font-size: 20px;", "{icon}" }
                            div { style: "flex: 1; cursor: pointer;",
                                onclick: move |_| {
                                    if !open_entry.is_directory {
                                        return;
                                    }
                                    let entry = open_entry.clone();
                                    spawn(async move {
                                        let mut b = browser.read().clone();
                                        match b.navigate_into(&entry).await {
                                            Ok(_) => browser.set(b),
                                            Err(e) => state.write().report("open folder", &e),
                                        }
                                    });
                                },
                                div { "{entry.display_name}" }
                                div { style: "color: #888; font-size: 12px;", "{detail}" }
                            }
                            button {
                                style: "padding: 6px 10px; border-radius: 8px; border: 1px solid #ff3b30; color: #ff3b30; background: white;",
                                onclick: move |_| confirm.set(Some(delete_entry.clone())),
                                "Delete"
                            }
                        }
                    }
                }
            }

            if let Some(ref entry) = *confirm.read() {
                div { style: "position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; z-index: 5;",
                    div { style: "background: white; border-radius: 12px; padding: 20px; max-width: 320px;",
                        h3 { style: "margin: 0 0 8px 0;",
                            if entry.is_directory { "Delete folder?" } else { "Delete file?" }
                        }
                        p { style: "color: #555; font-size: 14px;", {delete_warning(entry)} }
                        div { style: "display: flex; gap: 8px;",
                            button {
                                style: "flex: 1; padding: 10px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                                onclick: move |_| confirm.set(None),
                                "Cancel"
                            }
                            button {
                                style: "flex: 1; padding: 10px; border-radius: 8px; border: none; background: #ff3b30; color: white;",
                                onclick: move |_| {
                                    let Some(entry) = confirm.write().take() else {
                                        return;
                                    };
                                    spawn(async move {
                                        let mut b = browser.read().clone();
                                        match b.delete(&entry).await {
                                            Ok(_) => browser.set(b),
                                            Err(e) => state.write().report("delete entry", &e),
                                        }
                                    });
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Confirmation text: only folders take their contents with them.
fn delete_warning(entry: &DirectoryEntry) -> String {
    if entry.is_directory {
        format!("\"{}\" and everything in it will be removed.", entry.display_name)
    } else {
        format!("\"{}\" will be removed.", entry.display_name)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn entry(name: &str, is_directory: bool) -> DirectoryEntry {
        DirectoryEntry {
            path: PathBuf::from("/docs").join(name),
            display_name: name.into(),
            is_directory,
            size_bytes: None,
            modified_at: None,
            exists: true,
        }
    }

    #[test]
    fn file_warning_does_not_mention_contents() {
        assert_eq!(delete_warning(&entry("notes.txt", false)), "\"notes.txt\" will be removed.");
    }

    #[test]
    fn folder_warning_mentions_contents() {
        assert_eq!(
            delete_warning(&entry("Scans", true)),
            "\"Scans\" and everything in it will be removed."
        );
    }
}
