// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Modal notification shown over any page until acknowledged.

use dioxus::prelude::*;

use crate::state::{AppState, NoticeKind};

#[component]
pub fn NoticeDialog() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let Some(notice) = state.read().notice.clone() else {
        return rsx! {};
    };

    let accent = match notice.kind {
        NoticeKind::Success => "#34c759",
        NoticeKind::Warning => "#ff9500",
        NoticeKind::Error => "#ff3b30",
    };

    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; z-index: 10;",
            div { style: "background: white; border-radius: 12px; padding: 20px; max-width: 320px; border-top: 4px solid {accent};",
                h3 { style: "margin: 0 0 8px 0;", "{notice.title}" }
                p { style: "color: #555; font-size: 14px;", "{notice.body}" }
                button {
                    style: "width: 100%; padding: 10px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px;",
                    onclick: move |_| state.write().dismiss(),
                    "OK"
                }
            }
        }
    }
}
