// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Matching incoming names against known choices.
//!
//! Lookup data arrives as plain names ("J. R. R. Tolkien", "Fantasy"); the
//! reconciler splits them into exact matches, which select silently, and
//! unresolved items, which carry the similarity service's candidates into a
//! [`session::DisambiguationSession`] for the user to settle.

pub mod autofill;
pub mod session;

use crate::model::{Choice, ChoiceList, EntityId, EntityKind, UnresolvedItem};
use crate::services::SimilaritySearch;

pub use autofill::{
    apply_autofill, autofill_from_isbn, lookup_for_autofill, AutofillError, AutofillOutcome,
    AutofillReport, PendingAutofill,
};
pub use session::{ApplyFailure, ApplyReport, CancelToken, DisambiguationSession};

/// The reconciler's view of a multi-valued field.
///
/// Implemented by the widget layer; nothing on this side of the trait knows
/// how rows get drawn or which field it is talking to.
pub trait SelectionSurface {
    fn known_choices(&self) -> &ChoiceList;
    /// Selects a known value. Unknown or already-selected values are a
    /// silent no-op returning `false`.
    fn select(&mut self, value: EntityId) -> bool;
    /// Removes a value from the selection. Values that are not selected
    /// are a silent no-op returning `false`.
    fn deselect(&mut self, value: EntityId) -> bool;
    /// Makes a new choice available. A duplicate value is a silent no-op
    /// returning `false`.
    fn add_choice(&mut self, choice: Choice) -> bool;
    fn current_values(&self) -> &[EntityId];
}

/// One name whose similarity lookup failed. The name still becomes an
/// unresolved item (with no candidates); this records why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileWarning {
    pub source_text: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Names that matched a known choice exactly, in input order.
    pub resolved: Vec<Choice>,
    /// Names needing user disambiguation, in input order.
    pub unresolved: Vec<UnresolvedItem>,
    pub warnings: Vec<ReconcileWarning>,
}

/// Splits `names` into exact matches and unresolved items.
///
/// A lookup failure never aborts the pass: the affected name degrades to an
/// unresolved item without candidates and the remaining names are still
/// processed.
pub async fn reconcile_names(
    kind: EntityKind,
    names: &[String],
    known_choices: &ChoiceList,
    lookup: &dyn SimilaritySearch,
) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();

    for name in names {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(choice) = exact_match(known_choices, trimmed) {
            outcome.resolved.push(choice.clone());
            continue;
        }

        match lookup.similar(kind, trimmed).await {
            Ok(candidates) => {
                outcome
                    .unresolved
                    .push(UnresolvedItem::new(trimmed, candidates));
            }
            Err(err) => {
                outcome.warnings.push(ReconcileWarning {
                    source_text: trimmed.to_owned(),
                    reason: err.to_string(),
                });
                outcome
                    .unresolved
                    .push(UnresolvedItem::without_candidates(trimmed));
            }
        }
    }

    outcome
}

/// First known choice whose label equals the name after case folding.
///
/// Full-string equality only. Near-matches are the similarity service's
/// job, and substring matching belongs to the dropdown filter.
fn exact_match<'a>(choices: &'a ChoiceList, name: &str) -> Option<&'a Choice> {
    let name_lower = name.to_lowercase();
    choices
        .iter()
        .find(|choice| choice.label().to_lowercase() == name_lower)
}
