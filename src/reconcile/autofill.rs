// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! ISBN-driven autofill of the book form.
//!
//! [`autofill_from_isbn`] looks the ISBN up, fills whichever text fields are
//! still empty, selects the author and tag names that match known choices
//! outright, and hands everything else back as a [`DisambiguationSession`]
//! for the user to settle.

use std::fmt;

use crate::model::{BookDraft, ChoiceList, DraftField, EntityKind};
use crate::reconcile::session::DisambiguationSession;
use crate::reconcile::{reconcile_names, ReconcileOutcome, ReconcileWarning, SelectionSurface};
use crate::services::{BookRecord, Isbn, IsbnError, IsbnLookup, ServiceError, SimilaritySearch};

/// What a completed autofill did. `NoMatch` means the lookup had no record
/// for the ISBN and nothing was touched.
#[derive(Debug)]
pub enum AutofillOutcome {
    NoMatch,
    Filled(AutofillReport),
}

/// Everything a lookup changed, plus the leftovers that need the user.
#[derive(Debug, Default)]
pub struct AutofillReport {
    /// Draft fields that were empty and got a value from the record.
    pub fields_filled: Vec<DraftField>,
    /// Names that matched a known choice and were newly selected.
    pub auto_selected: usize,
    /// Present when at least one name could not be matched outright.
    pub session: Option<DisambiguationSession>,
    /// Names whose similarity lookup failed; they still appear in the
    /// session, just without candidates.
    pub warnings: Vec<ReconcileWarning>,
}

#[derive(Debug)]
pub enum AutofillError {
    Isbn(IsbnError),
    Lookup(ServiceError),
}

impl fmt::Display for AutofillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutofillError::Isbn(source) => write!(f, "invalid isbn: {source}"),
            AutofillError::Lookup(source) => write!(f, "isbn lookup failed: {source}"),
        }
    }
}

impl std::error::Error for AutofillError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AutofillError::Isbn(source) => Some(source),
            AutofillError::Lookup(source) => Some(source),
        }
    }
}

/// The async half of an autofill, done: the record plus both reconcile
/// outcomes, ready to be replayed onto the form with [`apply_autofill`].
///
/// Everything in here is owned, so the value can cross from the runtime to
/// the thread that holds the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAutofill {
    record: BookRecord,
    authors: ReconcileOutcome,
    tags: ReconcileOutcome,
}

/// Looks the ISBN up and reconciles the record's names against the given
/// choice lists. `Ok(None)` means the lookup had no record for the ISBN.
pub async fn lookup_for_autofill(
    raw_isbn: &str,
    author_choices: &ChoiceList,
    tag_choices: &ChoiceList,
    lookup: &dyn IsbnLookup,
    similar: &dyn SimilaritySearch,
) -> Result<Option<PendingAutofill>, AutofillError> {
    let isbn = Isbn::parse(raw_isbn).map_err(AutofillError::Isbn)?;
    let record = match lookup.lookup(&isbn).await {
        Ok(record) => record,
        Err(ServiceError::NotFound) => return Ok(None),
        Err(err) => return Err(AutofillError::Lookup(err)),
    };

    let authors =
        reconcile_names(EntityKind::Author, &record.authors, author_choices, similar).await;
    let tags = reconcile_names(EntityKind::Tag, &record.categories, tag_choices, similar).await;
    Ok(Some(PendingAutofill { record, authors, tags }))
}

/// Replays a finished lookup onto the form: fills whichever draft fields are
/// still empty (never the ISBN field, which is the search key), selects the
/// resolved choices, and bundles whatever is left into a session.
pub fn apply_autofill(
    pending: PendingAutofill,
    draft: &mut BookDraft,
    authors: &mut dyn SelectionSurface,
    tags: &mut dyn SelectionSurface,
) -> AutofillReport {
    let PendingAutofill { record, authors: author_outcome, tags: tag_outcome } = pending;

    let mut report = AutofillReport::default();
    for (field, value) in [
        (DraftField::Title, record.title.as_str()),
        (DraftField::Description, record.description.as_str()),
        (DraftField::CoverUrl, record.cover_url.as_str()),
    ] {
        if draft.fill_if_empty(field, value) {
            report.fields_filled.push(field);
        }
    }

    for choice in &author_outcome.resolved {
        if authors.select(choice.value().clone()) {
            report.auto_selected += 1;
        }
    }
    for choice in &tag_outcome.resolved {
        if tags.select(choice.value().clone()) {
            report.auto_selected += 1;
        }
    }
    report.warnings.extend(author_outcome.warnings);
    report.warnings.extend(tag_outcome.warnings);

    if !author_outcome.unresolved.is_empty() || !tag_outcome.unresolved.is_empty() {
        report.session = Some(DisambiguationSession::open(
            author_outcome.unresolved,
            tag_outcome.unresolved,
        ));
    }
    report
}

/// Both halves in one call, for callers that can await with the form in
/// hand.
pub async fn autofill_from_isbn(
    raw_isbn: &str,
    draft: &mut BookDraft,
    authors: &mut dyn SelectionSurface,
    tags: &mut dyn SelectionSurface,
    lookup: &dyn IsbnLookup,
    similar: &dyn SimilaritySearch,
) -> Result<AutofillOutcome, AutofillError> {
    let pending = lookup_for_autofill(
        raw_isbn,
        authors.known_choices(),
        tags.known_choices(),
        lookup,
        similar,
    )
    .await?;
    match pending {
        Some(pending) => Ok(AutofillOutcome::Filled(apply_autofill(
            pending, draft, authors, tags,
        ))),
        None => Ok(AutofillOutcome::NoMatch),
    }
}
