// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page: persistent app configuration.

use dioxus::prelude::*;

use docscan_core::CollisionPolicy;
use docscan_core::types::{CameraFacing, PaperSize};

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut save_msg = use_signal(|| Option::<String>::None);
    let quality_pct = (state.read().config.capture_quality * 100.0).round() as u32;
    let margin_mm = state.read().config.page_margin_mm;

    rsx! {
        div {
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Camera" }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Start with" }
                    select {
                        style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: facing_label(state.read().config.default_facing),
                        onchange: move |evt| {
                            state.write().config.default_facing = match evt.value().as_str() {
                                "Front" => CameraFacing::Front,
                                _ => CameraFacing::Back,
                            };
                        },
                        option { value: "Back", "Back camera" }
                        option { value: "Front", "Front camera" }
                    }
                }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Photo quality (%)" }
                    input {
                        r#type: "number",
                        min: "1",
                        max: "100",
                        style: "width: 80px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;",
                        value: "{quality_pct}",
                        onchange: move |evt| {
                            if let Ok(pct) = evt.value().parse::<f32>() {
                                state.write().config.capture_quality = (pct / 100.0).clamp(0.01, 1.0);
                            }
                        },
                    }
                }
                SettingRow {
                    label: "Keep photo metadata (EXIF)",
                    checked: state.read().config.capture_exif,
                    on_toggle: move |v: bool| { state.write().config.capture_exif = v; },
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Saving" }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "If the name is taken" }
                    select {
                        style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: policy_label(state.read().config.collision_policy),
                        onchange: move |evt| {
                            if let Some(policy) = policy_from_label(&evt.value()) {
                                state.write().config.collision_policy = policy;
                            }
                        },
                        option { value: "Overwrite", "Replace it" }
                        option { value: "Reject", "Ask for another name" }
                        option { value: "AutoRename", "Add a number" }
                    }
                }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Paper size (desktop)" }
                    select {
                        style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: paper_size_label(&state.read().config.paper_size),
                        onchange: move |evt| {
                            if let Some(ps) = paper_size_from_label(&evt.value()) {
                                state.write().config.paper_size = ps;
                            }
                        },
                        option { value: "A4", "A4" }
                        option { value: "A5", "A5" }
                        option { value: "Letter", "Letter" }
                        option { value: "Legal", "Legal" }
                    }
                }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Page margin (mm, desktop)" }
                    input {
                        r#type: "number",
                        min: "0",
                        max: "50",
                        style: "width: 80px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;",
                        value: "{margin_mm}",
                        onchange: move |evt| {
                            if let Some(mm) = parse_margin_mm(&evt.value()) {
                                state.write().config.page_margin_mm = mm;
                            }
                        },
                    }
                }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Folder" }
                    span { style: "color: #888;", "{state.read().config.managed_folder}" }
                }
            }

            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 8px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = state.read().config.clone();
                        match svc.save_config(&config) {
                            Ok(()) => {
                                tracing::info!("settings saved");
                                save_msg.set(Some("Settings saved.".into()));
                            }
                            Err(e) => {
                                save_msg.set(None);
                                state.write().report("save settings", &e);
                            }
                        }
                    }
                },
                "Save Settings"
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #34c759; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "About" }
                p { style: "color: #666; font-size: 14px;",
                    "DocScan v0.1.0"
                    br {}
                    "Paper size and margin apply on the next launch."
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}

#[component]
fn SettingRow(label: &'static str, checked: bool, on_toggle: EventHandler<bool>) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            span { "{label}" }
            input {
                r#type: "checkbox",
                checked: checked,
                onchange: move |evt| {
                    on_toggle.call(evt.checked());
                },
            }
        }
    }
}

fn facing_label(facing: CameraFacing) -> &'static str {
    match facing {
        CameraFacing::Back => "Back",
        CameraFacing::Front => "Front",
    }
}

fn policy_label(policy: CollisionPolicy) -> &'static str {
    match policy {
        CollisionPolicy::Overwrite => "Overwrite",
        CollisionPolicy::Reject => "Reject",
        CollisionPolicy::AutoRename => "AutoRename",
    }
}

fn policy_from_label(label: &str) -> Option<CollisionPolicy> {
    match label {
        "Overwrite" => Some(CollisionPolicy::Overwrite),
        "Reject" => Some(CollisionPolicy::Reject),
        "AutoRename" => Some(CollisionPolicy::AutoRename),
        _ => None,
    }
}

fn paper_size_label(ps: &PaperSize) -> &'static str {
    match ps {
        PaperSize::A4 => "A4",
        PaperSize::A5 => "A5",
        PaperSize::Letter => "Letter",
        PaperSize::Legal => "Legal",
        PaperSize::Custom { .. } => "Custom",
    }
}

fn paper_size_from_label(label: &str) -> Option<PaperSize> {
    match label {
        "A4" => Some(PaperSize::A4),
        "A5" => Some(PaperSize::A5),
        "Letter" => Some(PaperSize::Letter),
        "Legal" => Some(PaperSize::Legal),
        _ => None,
    }
}

fn parse_margin_mm(input: &str) -> Option<f32> {
    input
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|mm| mm.is_finite())
        .map(|mm| mm.clamp(0.0, 50.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_labels_round_trip() {
        for policy in [CollisionPolicy::Overwrite, CollisionPolicy::Reject, CollisionPolicy::AutoRename] {
            assert_eq!(policy_from_label(policy_label(policy)), Some(policy));
        }
    }

    #[test]
    fn custom_paper_has_no_selectable_label() {
        let custom = PaperSize::Custom { width_mm: 100, height_mm: 150 };
        assert_eq!(paper_size_from_label(paper_size_label(&custom)), None);
    }

    #[test]
    fn margin_input_is_clamped() {
        assert_eq!(parse_margin_mm(" 12.5 "), Some(12.5));
        assert_eq!(parse_margin_mm("-4"), Some(0.0));
        assert_eq!(parse_margin_mm("900"), Some(50.0));
        assert_eq!(parse_margin_mm("NaN"), None);
        assert_eq!(parse_margin_mm("wide"), None);
    }
}
