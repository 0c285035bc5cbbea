// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::model::{EntityKind, Resolution, UnresolvedItem};
use crate::services::EntityCreate;

use super::SelectionSurface;

/// Cloneable cancellation handle shared between the apply task and the UI.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// One unresolved creation that the backing service refused or lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyFailure {
    pub kind: EntityKind,
    pub index: usize,
    pub source_text: String,
    pub message: String,
}

/// What an [`DisambiguationSession::apply`] pass did.
///
/// `succeeded` counts items whose resolution was carried out, including
/// ignores and selects that turned out to be no-ops. `skipped` counts items
/// cancellation kept from taking effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub succeeded: usize,
    pub failed: Vec<ApplyFailure>,
    pub skipped: usize,
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SessionItem {
    item: UnresolvedItem,
    resolution: Resolution,
}

/// The pending decisions for one batch of unresolved names.
///
/// A session holds everything between "lookup returned names we do not
/// know" and "the user committed": the items, their candidates, and one
/// resolution per item. Nothing touches a field or a service until
/// [`apply`](Self::apply); dropping the session (or calling
/// [`cancel`](Self::cancel)) leaves every surface exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisambiguationSession {
    authors: Vec<SessionItem>,
    tags: Vec<SessionItem>,
}

impl DisambiguationSession {
    /// Opens a session over the unresolved items of both fields. Every item
    /// starts on its default resolution: the top candidate when the service
    /// proposed any, otherwise creation from the source text.
    pub fn open(
        unresolved_authors: Vec<UnresolvedItem>,
        unresolved_tags: Vec<UnresolvedItem>,
    ) -> Self {
        let wrap = |items: Vec<UnresolvedItem>| {
            items
                .into_iter()
                .map(|item| SessionItem {
                    resolution: item.default_resolution(),
                    item,
                })
                .collect()
        };
        Self {
            authors: wrap(unresolved_authors),
            tags: wrap(unresolved_tags),
        }
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.items(kind).len()
    }

    pub fn total_len(&self) -> usize {
        self.authors.len() + self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty() && self.tags.is_empty()
    }

    pub fn item(&self, kind: EntityKind, index: usize) -> Option<&UnresolvedItem> {
        self.items(kind).get(index).map(|entry| &entry.item)
    }

    pub fn resolution(&self, kind: EntityKind, index: usize) -> Option<&Resolution> {
        self.items(kind).get(index).map(|entry| &entry.resolution)
    }

    /// Items of one kind with their current resolutions, in input order.
    pub fn entries(
        &self,
        kind: EntityKind,
    ) -> impl Iterator<Item = (&UnresolvedItem, &Resolution)> {
        self.items(kind)
            .iter()
            .map(|entry| (&entry.item, &entry.resolution))
    }

    /// Overwrites the resolution of one item. Returns `false` when the index
    /// is out of range.
    pub fn set_resolution(
        &mut self,
        kind: EntityKind,
        index: usize,
        resolution: Resolution,
    ) -> bool {
        match self.items_mut(kind).get_mut(index) {
            Some(entry) => {
                entry.resolution = resolution;
                true
            }
            None => false,
        }
    }

    /// Discards the session. No selection changes, nothing is created.
    pub fn cancel(self) {}

    /// Carries out every resolution, authors first, then tags, each kind in
    /// its original input order, strictly one creation at a time.
    ///
    /// A failed creation is recorded and the pass continues. Once `cancel`
    /// fires, no further creation starts; a creation already in flight
    /// completes on the service side but its result is discarded.
    pub async fn apply(
        self,
        authors_surface: &mut dyn SelectionSurface,
        tags_surface: &mut dyn SelectionSurface,
        creator: &dyn EntityCreate,
        cancel: &CancelToken,
    ) -> ApplyReport {
        let mut report = ApplyReport::default();
        apply_kind(
            EntityKind::Author,
            self.authors,
            authors_surface,
            creator,
            cancel,
            &mut report,
        )
        .await;
        apply_kind(
            EntityKind::Tag,
            self.tags,
            tags_surface,
            creator,
            cancel,
            &mut report,
        )
        .await;
        report.cancelled = cancel.is_cancelled();
        report
    }

    fn items(&self, kind: EntityKind) -> &[SessionItem] {
        match kind {
            EntityKind::Author => &self.authors,
            EntityKind::Tag => &self.tags,
        }
    }

    fn items_mut(&mut self, kind: EntityKind) -> &mut Vec<SessionItem> {
        match kind {
            EntityKind::Author => &mut self.authors,
            EntityKind::Tag => &mut self.tags,
        }
    }
}

async fn apply_kind(
    kind: EntityKind,
    items: Vec<SessionItem>,
    surface: &mut dyn SelectionSurface,
    creator: &dyn EntityCreate,
    cancel: &CancelToken,
    report: &mut ApplyReport,
) {
    for (index, entry) in items.into_iter().enumerate() {
        if cancel.is_cancelled() {
            report.skipped += 1;
            continue;
        }

        match entry.resolution {
            Resolution::Ignore => {
                report.succeeded += 1;
            }
            Resolution::UseExisting(value) => {
                surface.select(value);
                report.succeeded += 1;
            }
            Resolution::CreateNew(label) => match creator.create(kind, &label).await {
                Ok(choice) => {
                    if cancel.is_cancelled() {
                        // The entity now exists on the service side; the
                        // result is dropped here without touching the field.
                        report.skipped += 1;
                        continue;
                    }
                    surface.add_choice(choice.clone());
                    surface.select(choice.value().clone());
                    report.succeeded += 1;
                }
                Err(err) => {
                    report.failed.push(ApplyFailure {
                        kind,
                        index,
                        source_text: entry.item.source_text().to_owned(),
                        message: err.to_string(),
                    });
                }
            },
        }
    }
}
