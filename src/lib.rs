// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Exlibris — a terminal book-cataloging form with ISBN autofill.
//!
//! The layers, bottom up: `model` (ids, choices, drafts), `widget` (headless
//! form state), `services` (catalog, ISBN lookup, similarity search),
//! `reconcile` (autofill and name disambiguation), `ui` (cross-thread lookup
//! state) and `tui` (the ratatui shell).

pub mod model;
pub mod reconcile;
pub mod services;
pub mod tui;
pub mod ui;
pub mod widget;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
