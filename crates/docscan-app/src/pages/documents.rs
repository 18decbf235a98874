// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Documents page: exported PDFs, newest first, with view/share/delete.

use chrono::{DateTime, Local, Utc};
use dioxus::prelude::*;

use docscan_core::types::DocumentView;
use docscan_document::pdf::page_count_at;
use docscan_storage::PendingDeletion;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Documents() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut browser = use_signal({
        let svc = svc.clone();
        move || svc.document_browser()
    });
    let mut viewing = use_signal(|| Option::<(DocumentView, Option<usize>)>::None);
    let mut pending = use_signal(|| Option::<PendingDeletion>::None);

    // Load the listing whenever the page is shown
    let _loader = use_resource(move || async move {
        let mut b = browser.peek().clone();
        match b.refresh().await {
            Ok(_) => browser.set(b),
            Err(e) => state.write().report("list documents", &e),
        }
    });

    if let Some((view, pages)) = viewing.read().clone() {
        let pages = pages.map(|n| format!("{n} page(s)")).unwrap_or_default();
        return rsx! {
            div { style: "display: flex; flex-direction: column; height: 100%;",
                div { style: "display: flex; justify-content: space-between; align-items: center;",
                    button {
                        style: "padding: 8px 12px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                        onclick: move |_| viewing.set(None),
                        "Back"
                    }
                    span { style: "font-weight: 600;", "{view.file_name}" }
                    span { style: "color: #888; font-size: 12px;", "{pages}" }
                }
                iframe {
                    style: "flex: 1; width: 100%; min-height: 70vh; border: none; margin-top: 12px;",
                    src: view.data_uri(),
                }
            }
        };
    }

    let docs = browser.read().documents().to_vec();

    rsx! {
        div {
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { "My Documents" }
                button {
                    style: "padding: 8px 12px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                    onclick: move |_| {
                        spawn(async move {
                            let mut b = browser.read().clone();
                            match b.refresh().await {
                                Ok(_) => browser.set(b),
                                Err(e) => state.write().report("list documents", &e),
                            }
                        });
                    },
                    "Refresh"
                }
            }

            if docs.is_empty() {
                p { style: "text-align: center; color: #aaa; margin: 48px 0;",
                    "No documents yet. Scan something to get started."
                }
            }

            for doc in docs {
                {
                    let when = format_timestamp(doc.modified_at);
                    let size_kb = doc.size_bytes.div_ceil(1024);
                    let view_name = doc.file_name.clone();
                    let share_name = doc.file_name.clone();
                    let delete_name = doc.file_name.clone();
                    let share_svc = svc.clone();
                    rsx! {
                        div { key: "{doc.file_name}",
                            style: "padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                            div { style: "font-weight: 600;", "{doc.file_name}" }
                            div { style: "color: #888; font-size: 12px;", "{when} \u{00B7} {size_kb} KB" }
                            div { style: "display: flex; gap: 8px; margin-top: 8px;",
                                button {
                                    style: "flex: 1; padding: 8px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white;",
                                    onclick: move |_| {
                                        let name = view_name.clone();
                                        spawn(async move {
                                            let b = browser.read().clone();
                                            match b.view(&name).await {
                                                Ok(view) => {
                                                    let pages = match b.path_of(&name) {
                                                        Ok(path) => page_count_at(&path).await.ok(),
                                                        Err(_) => None,
                                                    };
                                                    viewing.set(Some((view, pages)));
                                                }
                                                Err(e) => state.write().report("view document", &e),
                                            }
                                        });
                                    },
                                    "View"
                                }
                                button {
                                    style: "flex: 1; padding: 8px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                                    onclick: move |_| {
                                        let name = share_name.clone();
                                        let svc = share_svc.clone();
                                        spawn(async move {
                                            let b = browser.read().clone();
                                            if let Err(e) = b.share(&name, svc.sharer()).await {
                                                state.write().report("share document", &e);
                                            }
                                        });
                                    },
                                    "Share"
                                }
                                button {
                                    style: "flex: 1; padding: 8px; border-radius: 8px; border: 1px solid #ff3b30; color: #ff3b30; background: white;",
                                    onclick: move |_| {
                                        let name = delete_name.clone();
                                        spawn(async move {
                                            let b = browser.read().clone();
                                            match b.request_delete(&name).await {
                                                Ok(p) => pending.set(Some(p)),
                                                Err(e) => state.write().report("delete document", &e),
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

            if let Some(ref p) = *pending.read() {
                ConfirmDelete {
                    file_name: p.file_name().to_owned(),
                    on_cancel: move |_| pending.set(None),
                    on_confirm: move |_| {
                        let Some(p) = pending.write().take() else {
                            return;
                        };
                        spawn(async move {
                            let mut b = browser.read().clone();
                            match b.confirm_delete(p).await {
                                Ok(_) => browser.set(b),
                                Err(e) => state.write().report("delete document", &e),
                            }
                        });
                    },
                }
            }
        }
    }
}

#[component]
fn ConfirmDelete(file_name: String, on_cancel: EventHandler<()>, on_confirm: EventHandler<()>) -> Element {
    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; z-index: 5;",
            div { style: "background: white; border-radius: 12px; padding: 20px; max-width: 320px;",
                h3 { style: "margin: 0 0 8px 0;", "Delete document?" }
                p { style: "color: #555; font-size: 14px;", "\"{file_name}\" will be removed permanently." }
                div { style: "display: flex; gap: 8px;",
                    button {
                        style: "flex: 1; padding: 10px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        style: "flex: 1; padding: 10px; border-radius: 8px; border: none; background: #ff3b30; color: white;",
                        onclick: move |_| on_confirm.call(()),
                        "Delete"
                    }
                }
            }
        }
    }
}

/// Local date and time as shown in the listing, e.g. `07/03/2024 14:05`.
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string()
}
