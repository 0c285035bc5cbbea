// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tagged multi-select over a fixed choice list.
//!
//! Headless: the widget owns choices, selection, filter query and dropdown
//! state, and exposes row descriptors for whatever draws it. Selected values
//! keep their selection order because that order is what the backing form
//! field submits.

use crossterm::event::KeyCode;
use memchr::memmem;

use crate::model::{Choice, ChoiceList, EntityId, SelectionSet};
use crate::reconcile::SelectionSurface;

/// One selected value, rendered as a removable tag chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRow {
    pub value: EntityId,
    pub label: String,
}

/// One candidate row in the open dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub value: EntityId,
    pub label: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone)]
pub struct TaggedMultiSelect {
    choices: ChoiceList,
    selected: SelectionSet,
    query: String,
    open: bool,
    highlight: usize,
    /// Indices into `choices` of the candidates the current query leaves
    /// visible, recomputed whenever the query or the selection changes.
    visible: Vec<usize>,
    revision: u64,
}

impl TaggedMultiSelect {
    /// Preselected values that are not in `choices` are dropped silently.
    pub fn new(choices: ChoiceList, preselected: impl IntoIterator<Item = EntityId>) -> Self {
        let mut selected = SelectionSet::new();
        for value in preselected {
            if choices.contains_value(&value) {
                selected.insert(value);
            }
        }
        let mut widget = Self {
            choices,
            selected,
            query: String::new(),
            open: false,
            highlight: 0,
            visible: Vec::new(),
            revision: 0,
        };
        widget.recompute_visible();
        widget
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Unselected choices whose label contains the case-folded query,
    /// in choice-list order. An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&Choice> {
        let choices = self.choices.as_slice();
        self.matching_unselected(query)
            .into_iter()
            .map(|idx| &choices[idx])
            .collect()
    }

    /// Selects a known, unselected value; clears the query and closes the
    /// dropdown on success. Anything else is a silent no-op.
    pub fn select(&mut self, value: EntityId) -> bool {
        if !self.choices.contains_value(&value) {
            return false;
        }
        if !self.selected.insert(value) {
            return false;
        }
        self.query.clear();
        self.open = false;
        self.revision = self.revision.wrapping_add(1);
        self.recompute_visible();
        true
    }

    /// Removes a value from the selection; values that are not selected are
    /// a silent no-op.
    pub fn deselect(&mut self, value: &EntityId) -> bool {
        if !self.selected.remove(value) {
            return false;
        }
        self.revision = self.revision.wrapping_add(1);
        self.recompute_visible();
        true
    }

    /// Makes a new choice available (idempotent on its value). The choice
    /// shows up in the dropdown but is not selected.
    pub fn add_choice(&mut self, choice: Choice) -> bool {
        if !self.choices.add(choice) {
            return false;
        }
        self.recompute_visible();
        true
    }

    /// Keyboard contract of the focused widget. Returns whether the key was
    /// consumed; unconsumed keys are the caller's to route.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(ch) => {
                self.query.push(ch);
                self.open = true;
                self.highlight = 0;
                self.recompute_visible();
                true
            }
            KeyCode::Backspace => {
                if self.query.is_empty() {
                    if self.selected.pop_last().is_some() {
                        self.revision = self.revision.wrapping_add(1);
                        self.recompute_visible();
                    }
                } else {
                    self.query.pop();
                    self.highlight = 0;
                    self.recompute_visible();
                }
                true
            }
            KeyCode::Down => {
                if self.open {
                    if !self.visible.is_empty() {
                        self.highlight = (self.highlight + 1).min(self.visible.len() - 1);
                    }
                } else {
                    self.open = true;
                    self.highlight = 0;
                    self.recompute_visible();
                }
                true
            }
            KeyCode::Up => {
                if !self.open {
                    return false;
                }
                self.highlight = self.highlight.saturating_sub(1);
                true
            }
            KeyCode::Enter => {
                if !self.open {
                    return false;
                }
                if let Some(value) = self.highlighted_value() {
                    self.select(value);
                } else {
                    self.open = false;
                }
                true
            }
            KeyCode::Esc => {
                if !self.open {
                    return false;
                }
                self.open = false;
                self.query.clear();
                self.highlight = 0;
                self.recompute_visible();
                true
            }
            _ => false,
        }
    }

    /// The selected values as tag chips, in selection order.
    pub fn tag_rows(&self) -> Vec<TagRow> {
        self.selected
            .values()
            .iter()
            .filter_map(|value| self.choices.get(value))
            .map(|choice| TagRow {
                value: choice.value().clone(),
                label: choice.label().to_owned(),
            })
            .collect()
    }

    /// The dropdown rows for the current query, with the highlight applied.
    pub fn option_rows(&self) -> Vec<OptionRow> {
        let choices = self.choices.as_slice();
        self.visible
            .iter()
            .enumerate()
            .map(|(row, &idx)| OptionRow {
                value: choices[idx].value().clone(),
                label: choices[idx].label().to_owned(),
                highlighted: row == self.highlight,
            })
            .collect()
    }

    /// What the backing form field submits: the selected ids, in order.
    pub fn field_values(&self) -> Vec<String> {
        self.selected
            .values()
            .iter()
            .map(|value| value.as_str().to_owned())
            .collect()
    }

    pub fn known_choices(&self) -> &ChoiceList {
        &self.choices
    }

    pub fn current_values(&self) -> &[EntityId] {
        self.selected.values()
    }

    pub fn selected_len(&self) -> usize {
        self.selected.len()
    }

    fn highlighted_value(&self) -> Option<EntityId> {
        let idx = *self.visible.get(self.highlight)?;
        Some(self.choices.as_slice()[idx].value().clone())
    }

    fn matching_unselected(&self, query: &str) -> Vec<usize> {
        let needle = query.to_lowercase();
        let finder = memmem::Finder::new(needle.as_bytes());
        let mut out = Vec::new();
        for (idx, choice) in self.choices.iter().enumerate() {
            if self.selected.contains(choice.value()) {
                continue;
            }
            if !needle.is_empty()
                && finder.find(choice.label().to_lowercase().as_bytes()).is_none()
            {
                continue;
            }
            out.push(idx);
        }
        out
    }

    fn recompute_visible(&mut self) {
        self.visible = self.matching_unselected(&self.query);
        if self.visible.is_empty() {
            self.highlight = 0;
        } else {
            self.highlight = self.highlight.min(self.visible.len() - 1);
        }
    }
}

impl SelectionSurface for TaggedMultiSelect {
    fn known_choices(&self) -> &ChoiceList {
        TaggedMultiSelect::known_choices(self)
    }

    fn select(&mut self, value: EntityId) -> bool {
        TaggedMultiSelect::select(self, value)
    }

    fn deselect(&mut self, value: EntityId) -> bool {
        TaggedMultiSelect::deselect(self, &value)
    }

    fn add_choice(&mut self, choice: Choice) -> bool {
        TaggedMultiSelect::add_choice(self, choice)
    }

    fn current_values(&self) -> &[EntityId] {
        TaggedMultiSelect::current_values(self)
    }
}
