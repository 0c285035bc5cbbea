// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{TreeMarker, TreePicker};
use crate::model::fixtures::location_tree;
use crate::model::LocationId;

fn lid(value: &str) -> LocationId {
    LocationId::new(value).expect("location id")
}

fn labels(picker: &TreePicker) -> Vec<&str> {
    picker.visible_rows().iter().map(|r| r.label.as_str()).collect()
}

#[fixture]
fn picker() -> TreePicker {
    TreePicker::new(location_tree())
}

#[rstest]
fn rows_walk_the_tree_depth_first(picker: TreePicker) {
    assert_eq!(
        labels(&picker),
        [
            "Office",
            "Shelf A",
            "Shelf B",
            "Top row",
            "Living room",
            "Main wall",
            "Storage box",
            "Attic",
        ]
    );
    let depths: Vec<usize> = picker.visible_rows().iter().map(|r| r.depth).collect();
    assert_eq!(depths, [0, 1, 1, 2, 0, 1, 1, 0]);
    assert_eq!(picker.visible_rows()[3].marker, TreeMarker::Leaf);
}

#[rstest]
fn toggle_collapses_and_restores_a_branch(mut picker: TreePicker) {
    assert!(picker.toggle(&lid("l:office")));
    assert_eq!(
        labels(&picker),
        ["Office", "Living room", "Main wall", "Storage box", "Attic"]
    );
    assert_eq!(picker.visible_rows()[0].marker, TreeMarker::Collapsed);

    assert!(picker.toggle(&lid("l:office")));
    assert_eq!(labels(&picker).len(), 8);
}

#[rstest]
fn toggle_ignores_leaves_and_unknown_values(mut picker: TreePicker) {
    assert!(!picker.toggle(&lid("l:attic")));
    assert!(!picker.toggle(&lid("l:nowhere")));
    assert_eq!(labels(&picker).len(), 8);
}

#[rstest]
fn select_replaces_the_previous_selection(mut picker: TreePicker) {
    assert!(picker.select(&lid("l:office-a")));
    assert!(picker.select(&lid("l:attic")));

    let selected: Vec<&str> = picker
        .visible_rows()
        .iter()
        .filter(|r| r.selected)
        .map(|r| r.label.as_str())
        .collect();
    assert_eq!(selected, ["Attic"]);
    assert_eq!(picker.field_value(), Some("l:attic"));

    assert!(!picker.select(&lid("l:nowhere")));
    assert_eq!(picker.field_value(), Some("l:attic"));
}

#[rstest]
fn filter_reveals_matches_and_expands_their_ancestors(mut picker: TreePicker) {
    picker.collapse_all();
    picker.set_filter("top");

    assert_eq!(labels(&picker), ["Office", "Shelf B", "Top row"]);
    // Collapsed branches on the match's path are drawn open.
    assert_eq!(picker.visible_rows()[0].marker, TreeMarker::Expanded);
    assert_eq!(picker.visible_rows()[1].marker, TreeMarker::Expanded);
    let depths: Vec<usize> = picker.visible_rows().iter().map(|r| r.depth).collect();
    assert_eq!(depths, [0, 1, 2]);
}

#[rstest]
fn filter_is_case_folded_and_keeps_match_subtrees(mut picker: TreePicker) {
    picker.set_filter("SHELF");
    assert_eq!(labels(&picker), ["Office", "Shelf A", "Shelf B", "Top row"]);
}

#[rstest]
fn clearing_the_filter_restores_the_collapse_state(mut picker: TreePicker) {
    picker.collapse_all();
    picker.set_filter("top");
    picker.set_filter("");

    assert_eq!(labels(&picker), ["Office", "Living room", "Attic"]);
    assert!(picker
        .visible_rows()
        .iter()
        .all(|r| r.marker != TreeMarker::Expanded));
}

#[rstest]
fn expand_all_and_collapse_all_cover_the_forest(mut picker: TreePicker) {
    picker.collapse_all();
    assert_eq!(labels(&picker), ["Office", "Living room", "Attic"]);

    picker.expand_all();
    assert_eq!(labels(&picker).len(), 8);
}
