// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// The plain-text fields of the work form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Title,
    Isbn,
    Description,
    CoverUrl,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [
        DraftField::Title,
        DraftField::Isbn,
        DraftField::Description,
        DraftField::CoverUrl,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Isbn => "ISBN",
            Self::Description => "Description",
            Self::CoverUrl => "Cover URL",
        }
    }
}

/// What the user has typed (or a lookup has filled) into the text fields.
///
/// Lookup data goes through [`BookDraft::fill_if_empty`], which never
/// overwrites user input. The ISBN field is deliberately excluded from
/// autofill: it is the field the lookup was triggered from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    title: String,
    isbn: String,
    description: String,
    cover_url: String,
}

impl BookDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cover_url(&self) -> &str {
        &self.cover_url
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Isbn => &self.isbn,
            DraftField::Description => &self.description,
            DraftField::CoverUrl => &self.cover_url,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Title => &mut self.title,
            DraftField::Isbn => &mut self.isbn,
            DraftField::Description => &mut self.description,
            DraftField::CoverUrl => &mut self.cover_url,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Fills a field from lookup data. Returns `false` (and keeps the current
    /// text) when the field already holds something or the incoming value is
    /// empty.
    pub fn fill_if_empty(&mut self, field: DraftField, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        let slot = self.field_mut(field);
        if !slot.is_empty() {
            return false;
        }
        slot.push_str(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{BookDraft, DraftField};

    #[test]
    fn fill_if_empty_never_overwrites_user_input() {
        let mut draft = BookDraft::new();
        draft.set_field(DraftField::Title, "My own title");

        assert!(!draft.fill_if_empty(DraftField::Title, "The Hobbit"));
        assert_eq!(draft.title(), "My own title");

        assert!(draft.fill_if_empty(DraftField::Description, "A hole in the ground"));
        assert_eq!(draft.description(), "A hole in the ground");
    }

    #[test]
    fn fill_if_empty_ignores_empty_lookup_values() {
        let mut draft = BookDraft::new();
        assert!(!draft.fill_if_empty(DraftField::CoverUrl, ""));
        assert_eq!(draft.cover_url(), "");
    }
}
