// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state: reactive signals for the Dioxus UI.

use docscan_core::error::DocScanError;
use docscan_core::human_errors::{Severity, humanize_error};
use docscan_core::AppConfig;

use crate::services::app_services::AppServices;

/// A blocking notification shown over the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    /// Drives the accent colour of the dialog.
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Application settings.
    pub config: AppConfig,
    /// Name of the platform bridge in use.
    pub platform: String,
    /// Notification awaiting acknowledgement.
    pub notice: Option<Notice>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        Self {
            config: svc.config(),
            platform: svc.platform_name(),
            notice: None,
        }
    }

    /// Log a failed action and, when worth interrupting the user for,
    /// queue a notification describing it.
    pub fn report(&mut self, action: &str, err: &DocScanError) {
        tracing::error!(action, error = %err, "operation failed");
        let human = humanize_error(err);
        if !human.notify {
            return;
        }
        let kind = match human.severity {
            Severity::Transient | Severity::ActionRequired => NoticeKind::Warning,
            Severity::Permanent => NoticeKind::Error,
        };
        self.notice = Some(Notice {
            title: human.message,
            body: human.suggestion,
            kind,
        });
    }

    pub fn success(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.notice = Some(Notice {
            title: title.into(),
            body: body.into(),
            kind: NoticeKind::Success,
        });
    }

    pub fn dismiss(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_is_logged_but_not_shown() {
        let mut state = AppState::default();
        state.report("capture", &DocScanError::PermissionDenied);
        assert!(state.notice.is_none());
    }

    #[test]
    fn empty_export_raises_a_notice() {
        let mut state = AppState::default();
        state.report("export", &DocScanError::EmptyInput);
        let notice = state.notice.clone().unwrap();
        assert_ne!(notice.kind, NoticeKind::Success);
        assert!(!notice.title.is_empty());

        state.dismiss();
        assert!(state.notice.is_none());
    }
}
