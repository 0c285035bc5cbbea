// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared UI state for cross-thread coordination.
//!
//! The terminal loop runs on a blocking thread while ISBN lookups run on the
//! tokio runtime. Lookup results land here; the loop polls the revision each
//! tick and drains whatever finished.

use crate::reconcile::PendingAutofill;

/// How one ISBN lookup ended, ready for the form thread to pick up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// A record came back, already reconciled against the form's choices.
    Fetched(Box<PendingAutofill>),
    /// The service had no record for the ISBN.
    NoRecord,
    /// Validation or the lookup itself failed; the message to display.
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    rev: u64,
    lookup_in_flight: bool,
    lookup_outcome: Option<LookupOutcome>,
}

impl UiState {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn lookup_in_flight(&self) -> bool {
        self.lookup_in_flight
    }

    /// Marks a lookup as started. Returns `false` while one is already in
    /// flight; only one runs at a time.
    pub fn begin_lookup(&mut self) -> bool {
        if self.lookup_in_flight {
            return false;
        }
        self.lookup_in_flight = true;
        self.lookup_outcome = None;
        self.rev = self.rev.wrapping_add(1);
        true
    }

    pub fn finish_lookup(&mut self, outcome: LookupOutcome) {
        self.lookup_in_flight = false;
        self.lookup_outcome = Some(outcome);
        self.rev = self.rev.wrapping_add(1);
    }

    /// Hands the finished lookup to the caller, leaving the state idle.
    pub fn take_lookup_outcome(&mut self) -> Option<LookupOutcome> {
        let outcome = self.lookup_outcome.take()?;
        self.rev = self.rev.wrapping_add(1);
        Some(outcome)
    }
}
