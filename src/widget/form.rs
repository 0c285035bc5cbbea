// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The whole book form: text draft, two tagged multi-selects and the
//! location picker, with the submission payload derived from all four.

use crate::model::{BookDraft, ChoiceList, LocationNode};
use crate::widget::multi_select::TaggedMultiSelect;
use crate::widget::tree_select::TreePicker;

/// What submitting the form would send: plain field values only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    pub title: String,
    pub isbn: String,
    pub description: String,
    pub cover_url: String,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookForm {
    draft: BookDraft,
    authors: TaggedMultiSelect,
    tags: TaggedMultiSelect,
    location: TreePicker,
}

impl BookForm {
    pub fn new(
        author_choices: ChoiceList,
        tag_choices: ChoiceList,
        locations: Vec<LocationNode>,
    ) -> Self {
        Self {
            draft: BookDraft::default(),
            authors: TaggedMultiSelect::new(author_choices, []),
            tags: TaggedMultiSelect::new(tag_choices, []),
            location: TreePicker::new(locations),
        }
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BookDraft {
        &mut self.draft
    }

    pub fn authors(&self) -> &TaggedMultiSelect {
        &self.authors
    }

    pub fn authors_mut(&mut self) -> &mut TaggedMultiSelect {
        &mut self.authors
    }

    pub fn tags(&self) -> &TaggedMultiSelect {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TaggedMultiSelect {
        &mut self.tags
    }

    pub fn location(&self) -> &TreePicker {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut TreePicker {
        &mut self.location
    }

    /// The draft and both multi-selects split out for simultaneous
    /// mutation, as autofill and session apply need them.
    pub fn reconcile_targets_mut(
        &mut self,
    ) -> (&mut BookDraft, &mut TaggedMultiSelect, &mut TaggedMultiSelect) {
        (&mut self.draft, &mut self.authors, &mut self.tags)
    }

    /// Snapshot of every backing field, in submit shape.
    pub fn submission(&self) -> FormSubmission {
        FormSubmission {
            title: self.draft.title().to_owned(),
            isbn: self.draft.isbn().to_owned(),
            description: self.draft.description().to_owned(),
            cover_url: self.draft.cover_url().to_owned(),
            authors: self.authors.field_values(),
            tags: self.tags.field_values(),
            location: self.location.field_value().map(str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BookForm;
    use crate::model::fixtures::{author_choices, location_tree, tag_choices};
    use crate::model::{DraftField, EntityId, LocationId};

    #[test]
    fn submission_collects_every_backing_field() {
        let mut form = BookForm::new(author_choices(), tag_choices(), location_tree());
        form.draft_mut().set_field(DraftField::Title, "The Dispossessed");
        form.draft_mut().set_field(DraftField::Isbn, "978-0-06-051275-2");
        form.authors_mut()
            .select(EntityId::new("a:2").expect("entity id"));
        form.tags_mut()
            .select(EntityId::new("t:2").expect("entity id"));
        form.tags_mut()
            .select(EntityId::new("t:3").expect("entity id"));
        form.location_mut()
            .select(&LocationId::new("l:office-a").expect("location id"));

        let submission = form.submission();
        assert_eq!(submission.title, "The Dispossessed");
        assert_eq!(submission.isbn, "978-0-06-051275-2");
        assert_eq!(submission.authors, ["a:2"]);
        assert_eq!(submission.tags, ["t:2", "t:3"]);
        assert_eq!(submission.location.as_deref(), Some("l:office-a"));
    }

    #[test]
    fn an_untouched_form_submits_empty_fields() {
        let form = BookForm::new(author_choices(), tag_choices(), location_tree());
        let submission = form.submission();
        assert_eq!(submission.title, "");
        assert!(submission.authors.is_empty());
        assert!(submission.tags.is_empty());
        assert_eq!(submission.location, None);
    }
}
