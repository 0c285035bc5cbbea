// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::EntityId;

/// The kind of entity a multi-valued field manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Author,
    Tag,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Tag => "tag",
        }
    }
}

/// One selectable option: an opaque value plus the label shown to the user.
///
/// Identity is the value; the label is display-only and may collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    value: EntityId,
    label: String,
}

impl Choice {
    pub fn new(value: EntityId, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }

    pub fn value(&self) -> &EntityId {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The ordered list of options a field knows about, unique by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceList {
    choices: Vec<Choice>,
}

impl ChoiceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from an iterator, keeping the first choice per value.
    pub fn from_choices(choices: impl IntoIterator<Item = Choice>) -> Self {
        let mut list = Self::new();
        for choice in choices {
            list.add(choice);
        }
        list
    }

    /// Appends a choice. Returns `false` (and changes nothing) when the value
    /// is already present.
    pub fn add(&mut self, choice: Choice) -> bool {
        if self.contains_value(choice.value()) {
            return false;
        }
        self.choices.push(choice);
        true
    }

    pub fn contains_value(&self, value: &EntityId) -> bool {
        self.choices.iter().any(|c| c.value() == value)
    }

    pub fn get(&self, value: &EntityId) -> Option<&Choice> {
        self.choices.iter().find(|c| c.value() == value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Choice> {
        self.choices.iter()
    }

    pub fn as_slice(&self) -> &[Choice] {
        &self.choices
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChoiceList {
    type Item = &'a Choice;
    type IntoIter = std::slice::Iter<'a, Choice>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The values currently selected in one field, in selection order.
///
/// Order is what the backing multi-valued form field serializes, so it is
/// part of the contract, not a rendering detail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    values: Vec<EntityId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value. Returns `false` (and changes nothing) when the value
    /// is already selected.
    pub fn insert(&mut self, value: EntityId) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.values.push(value);
        true
    }

    /// Removes a value. Returns `false` when it was not selected.
    pub fn remove(&mut self, value: &EntityId) -> bool {
        let Some(index) = self.values.iter().position(|v| v == value) else {
            return false;
        };
        self.values.remove(index);
        true
    }

    /// Removes and returns the most recently selected value.
    pub fn pop_last(&mut self) -> Option<EntityId> {
        self.values.pop()
    }

    pub fn contains(&self, value: &EntityId) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn values(&self) -> &[EntityId] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
