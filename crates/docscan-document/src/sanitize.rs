// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File name sanitization for exported documents.

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Final `<sanitized>.pdf` file name for a user-supplied base name.
pub fn pdf_file_name(base_name: &str) -> String {
    format!("{}.pdf", sanitize_file_name(base_name))
}
