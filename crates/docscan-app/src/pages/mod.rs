// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

pub mod camera;
pub mod documents;
pub mod files;
pub mod home;
pub mod notice;
pub mod settings;
