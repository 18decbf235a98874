// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-storage: File system access for DocScan.
//
// A single `StorageGateway` rooted at the app document directory backs both
// the managed PDF browser and the unrestricted directory browser; the two
// differ only in path scope and filter predicate.

pub mod documents;
pub mod gateway;
pub mod tree;

pub use documents::{DocumentBrowser, PendingDeletion};
pub use gateway::StorageGateway;
pub use tree::DirectoryBrowser;
