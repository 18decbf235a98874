// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Camera page: capture pages, review the last shot, export as PDF.
//
// The capture session lives in a page-local signal. It is cleared only after
// a successful export or when the user discards everything.

use dioxus::prelude::*;

use docscan_core::types::{CameraFacing, CameraPermission};
use docscan_document::CaptureSession;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Live viewfinder with the shutter button.
    Capture,
    /// Reviewing the photo just taken.
    Review,
    /// Asking for the document name.
    Naming,
}

#[component]
pub fn Camera() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut session = use_signal({
        let config = svc.config();
        move || CaptureSession::from_config(&config)
    });
    let mut stage = use_signal(|| Stage::Capture);
    let mut doc_name = use_signal(String::new);
    let mut exporting = use_signal(|| false);

    // Ask for camera access as soon as the page opens
    let svc_perm = svc.clone();
    use_effect(move || {
        let result = session.write().ensure_permission(svc_perm.camera());
        if let Err(e) = result {
            state.write().report("camera permission", &e);
        }
    });

    let permission = session.read().permission();
    let count = session.read().current_count();
    let current = *stage.read();
    let facing_label = match session.read().facing() {
        CameraFacing::Back => "Back camera",
        CameraFacing::Front => "Front camera",
    };

    if permission != CameraPermission::Granted {
        return rsx! {
            div {
                h1 { "Scan" }
                p { style: "color: #666; margin: 24px 0;",
                    if permission == CameraPermission::Denied {
                        "Camera access was denied. Allow it in the system settings to scan documents."
                    } else {
                        "Waiting for camera permission..."
                    }
                }
                button {
                    style: "width: 100%; padding: 12px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 16px;",
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let result = session.write().ensure_permission(svc.camera());
                            if let Err(e) = result {
                                state.write().report("camera permission", &e);
                            }
                        }
                    },
                    "Ask Again"
                }
            }
        };
    }

    rsx! {
        div {
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { "Scan" }
                span { style: "color: #666; font-size: 14px;", "{count} page(s)" }
            }

            {match current {
                Stage::Capture => rsx! {
                    div { style: "display: flex; flex-direction: column; gap: 12px; margin: 16px 0;",
                        button {
                            style: "width: 100%; padding: 16px; border-radius: 12px; border: 2px dashed #007aff; color: #007aff; background: white; font-size: 16px;",
                            disabled: *exporting.read(),
                            onclick: {
                                let svc = svc.clone();
                                move |_| {
                                    let result = session.write().capture(svc.camera()).map(|img| img.id);
                                    match result {
                                        Ok(id) => {
                                            tracing::info!(image = %id, "page captured");
                                            stage.set(Stage::Review);
                                        }
                                        Err(e) => state.write().report("capture", &e),
                                    }
                                }
                            },
                            "\u{1F4F7} Take Photo"
                        }
                        button {
                            style: "padding: 10px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                            onclick: move |_| {
                                let facing = session.write().toggle_facing();
                                tracing::debug!(?facing, "camera flipped");
                            },
                            "Flip ({facing_label})"
                        }
                        if count > 0 {
                            button {
                                style: "padding: 10px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px;",
                                onclick: move |_| stage.set(Stage::Naming),
                                "Create PDF"
                            }
                        }
                    }
                },
                Stage::Review => rsx! {
                    if let Some(last) = session.read().last() {
                        img {
                            style: "width: 100%; border-radius: 8px; border: 1px solid #e0e0e0;",
                            src: "data:image/jpeg;base64,{last.encoded}",
                        }
                    }
                    div { style: "display: flex; gap: 8px; margin-top: 16px;",
                        button {
                            style: "flex: 1; padding: 12px; border-radius: 8px; border: 1px solid #ff3b30; color: #ff3b30; background: white;",
                            onclick: move |_| {
                                session.write().discard_last();
                                stage.set(Stage::Capture);
                            },
                            "Retake"
                        }
                        button {
                            style: "flex: 1; padding: 12px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                            onclick: move |_| stage.set(Stage::Capture),
                            "Add Another"
                        }
                        button {
                            style: "flex: 1; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white;",
                            onclick: move |_| stage.set(Stage::Naming),
                            "Create PDF"
                        }
                    }
                },
                Stage::Naming => rsx! {
                    div { style: "margin: 16px 0;",
                        label { style: "display: block; margin-bottom: 8px;", "Document name" }
                        input {
                            style: "width: 100%; padding: 10px; border: 1px solid #ccc; border-radius: 8px; font-size: 16px; box-sizing: border-box;",
                            placeholder: "e.g. Invoice March",
                            value: "{doc_name}",
                            oninput: move |evt| doc_name.set(evt.value()),
                        }
                    }
                    div { style: "display: flex; gap: 8px;",
                        button {
                            style: "flex: 1; padding: 12px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                            disabled: *exporting.read(),
                            onclick: move |_| stage.set(Stage::Capture),
                            "Cancel"
                        }
                        button {
                            style: "flex: 1; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white;",
                            disabled: *exporting.read(),
                            onclick: {
                                let svc = svc.clone();
                                move |_| {
                                    let exporter = svc.exporter();
                                    let name = doc_name.read().trim().to_owned();
                                    let images = session.read().images().to_vec();
                                    exporting.set(true);
                                    spawn(async move {
                                        match exporter.export(&images, &name).await {
                                            Ok(path) => {
                                                session.write().clear();
                                                doc_name.set(String::new());
                                                stage.set(Stage::Capture);
                                                let file = path
                                                    .file_name()
                                                    .map(|n| n.to_string_lossy().into_owned())
                                                    .unwrap_or_default();
                                                state.write().success("PDF saved", format!("{file} is in My Documents."));
                                            }
                                            Err(e) => state.write().report("export", &e),
                                        }
                                        exporting.set(false);
                                    });
                                }
                            },
                            if *exporting.read() { "Saving..." } else { "Save PDF" }
                        }
                    }
                },
            }}

            // Pages so far
            if count > 0 {
                div { style: "display: flex; gap: 8px; overflow-x: auto; padding: 16px 0;",
                    for (i, image) in session.read().images().iter().enumerate() {
                        img {
                            key: "{image.id}",
                            style: "height: 96px; border: 1px solid #ccc; border-radius: 4px;",
                            title: "Page {i + 1}",
                            src: "data:image/jpeg;base64,{image.encoded}",
                        }
                    }
                }
                button {
                    style: "width: 100%; padding: 10px; border-radius: 8px; border: none; background: none; color: #ff3b30;",
                    disabled: *exporting.read(),
                    onclick: move |_| {
                        session.write().clear();
                        stage.set(Stage::Capture);
                    },
                    "Discard All Pages"
                }
            }
        }
    }
}
