// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Single-select picker over a location hierarchy.
//!
//! Rows are derived, never stored by the caller: every mutation recomputes
//! the flattened row list so the drawing layer only ever iterates
//! [`TreePicker::visible_rows`].

use std::collections::BTreeSet;

use memchr::memmem;

use crate::model::{LocationId, LocationNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeMarker {
    Expanded,
    Collapsed,
    Leaf,
}

/// One visible line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub value: LocationId,
    pub label: String,
    pub depth: usize,
    pub marker: TreeMarker,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct TreePicker {
    roots: Vec<LocationNode>,
    collapsed: BTreeSet<LocationId>,
    /// Case-folded filter term; empty means no filter.
    filter: String,
    /// Values the filter keeps visible: matches, their ancestors and their
    /// subtrees. `None` when no filter is active.
    keep: Option<BTreeSet<LocationId>>,
    /// Branches with a matching descendant; drawn expanded while the filter
    /// is active regardless of their collapse state.
    force_expanded: BTreeSet<LocationId>,
    selected: Option<LocationId>,
    rows: Vec<TreeRow>,
}

impl TreePicker {
    pub fn new(roots: Vec<LocationNode>) -> Self {
        let mut picker = Self {
            roots,
            collapsed: BTreeSet::new(),
            filter: String::new(),
            keep: None,
            force_expanded: BTreeSet::new(),
            selected: None,
            rows: Vec::new(),
        };
        picker.recompute_rows();
        picker
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn selected_value(&self) -> Option<&LocationId> {
        self.selected.as_ref()
    }

    /// What the backing form field submits.
    pub fn field_value(&self) -> Option<&str> {
        self.selected.as_ref().map(|value| value.as_str())
    }

    pub fn visible_rows(&self) -> &[TreeRow] {
        &self.rows
    }

    /// Case-folded substring filter on labels. Matches are revealed along
    /// with their ancestors (drawn expanded) and their subtrees; an empty
    /// term restores full visibility with the collapse state untouched.
    pub fn set_filter(&mut self, term: &str) {
        self.filter = term.to_lowercase();
        self.force_expanded.clear();
        if self.filter.is_empty() {
            self.keep = None;
        } else {
            let finder = memmem::Finder::new(self.filter.as_bytes());
            let mut keep = BTreeSet::new();
            filter_sets(
                &self.roots,
                &finder,
                false,
                &mut keep,
                &mut self.force_expanded,
            );
            self.keep = Some(keep);
        }
        self.recompute_rows();
    }

    /// Flips the collapse state of a branch. Leaves and unknown values are
    /// a silent no-op.
    pub fn toggle(&mut self, value: &LocationId) -> bool {
        match find_node(&self.roots, value) {
            Some(node) if !node.is_leaf() => {
                if !self.collapsed.remove(value) {
                    self.collapsed.insert(value.clone());
                }
                self.recompute_rows();
                true
            }
            _ => false,
        }
    }

    /// Stores the single selection, replacing any prior one. Unknown values
    /// are a silent no-op.
    pub fn select(&mut self, value: &LocationId) -> bool {
        if find_node(&self.roots, value).is_none() {
            return false;
        }
        self.selected = Some(value.clone());
        self.recompute_rows();
        true
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
        self.recompute_rows();
    }

    pub fn collapse_all(&mut self) {
        self.collapsed.clear();
        collect_branch_values(&self.roots, &mut self.collapsed);
        self.recompute_rows();
    }

    fn recompute_rows(&mut self) {
        let mut rows = Vec::new();
        collect_rows(
            &self.roots,
            0,
            &self.collapsed,
            self.selected.as_ref(),
            self.keep.as_ref(),
            &self.force_expanded,
            &mut rows,
        );
        self.rows = rows;
    }
}

fn find_node<'a>(nodes: &'a [LocationNode], value: &LocationId) -> Option<&'a LocationNode> {
    for node in nodes {
        if node.value() == value {
            return Some(node);
        }
        if let Some(found) = find_node(node.children(), value) {
            return Some(found);
        }
    }
    None
}

fn collect_branch_values(nodes: &[LocationNode], out: &mut BTreeSet<LocationId>) {
    for node in nodes {
        if !node.is_leaf() {
            out.insert(node.value().clone());
            collect_branch_values(node.children(), out);
        }
    }
}

/// Returns whether any node in `nodes` (or below) matches, filling `keep`
/// with everything the filter leaves visible and `force_expanded` with the
/// branches that must be drawn open to show a match.
fn filter_sets(
    nodes: &[LocationNode],
    finder: &memmem::Finder<'_>,
    ancestor_matched: bool,
    keep: &mut BTreeSet<LocationId>,
    force_expanded: &mut BTreeSet<LocationId>,
) -> bool {
    let mut any = false;
    for node in nodes {
        let matched = finder.find(node.label().to_lowercase().as_bytes()).is_some();
        let child_matched = filter_sets(
            node.children(),
            finder,
            ancestor_matched || matched,
            keep,
            force_expanded,
        );
        if matched || child_matched || ancestor_matched {
            keep.insert(node.value().clone());
        }
        if child_matched {
            force_expanded.insert(node.value().clone());
        }
        any = any || matched || child_matched;
    }
    any
}

fn collect_rows(
    nodes: &[LocationNode],
    depth: usize,
    collapsed: &BTreeSet<LocationId>,
    selected: Option<&LocationId>,
    keep: Option<&BTreeSet<LocationId>>,
    force_expanded: &BTreeSet<LocationId>,
    out: &mut Vec<TreeRow>,
) {
    for node in nodes {
        if keep.is_some_and(|k| !k.contains(node.value())) {
            continue;
        }
        let marker = if node.is_leaf() {
            TreeMarker::Leaf
        } else if force_expanded.contains(node.value()) || !collapsed.contains(node.value()) {
            TreeMarker::Expanded
        } else {
            TreeMarker::Collapsed
        };
        out.push(TreeRow {
            value: node.value().clone(),
            label: node.label().to_owned(),
            depth,
            marker,
            selected: selected == Some(node.value()),
        });
        if marker == TreeMarker::Expanded {
            collect_rows(
                node.children(),
                depth + 1,
                collapsed,
                selected,
                keep,
                force_expanded,
                out,
            );
        }
    }
}

#[cfg(test)]
mod tests;
