// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page: entry points to scanning and the two browsers.

use dioxus::prelude::*;

use crate::Route;
use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Home() -> Element {
    let state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let managed = svc.gateway().managed_dir().display().to_string();

    rsx! {
        div {
            h1 { "DocScan" }
            p { style: "color: #666;", "Photograph pages and keep them as PDFs." }

            div { style: "display: grid; grid-template-columns: 1fr; gap: 12px; margin: 24px 0;",
                QuickAction { to: Route::Camera {}, label: "Scan Document", icon: "\u{1F4F7}" }
                QuickAction { to: Route::Documents {}, label: "My Documents", icon: "\u{1F4C4}" }
                QuickAction { to: Route::Files {}, label: "Browse Files", icon: "\u{1F4C1}" }
            }

            p { style: "color: #888; font-size: 12px;",
                "Platform: {state.read().platform}"
                br {}
                "Saving to {managed}"
            }
        }
    }
}

#[component]
fn QuickAction(to: Route, label: &'static str, icon: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "display: flex; align-items: center; gap: 12px; padding: 16px; border-radius: 12px; border: 1px solid #e0e0e0; text-decoration: none; color: #333; background: white;",
            span { style: "font-size: 28px;", "{icon}" }
            span { style: "font-size: 16px;", "{label}" }
        }
    }
}
