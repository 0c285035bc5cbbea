// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::choice::{Choice, ChoiceList};
use super::ids::{EntityId, LocationId};
use super::location::LocationNode;

fn eid(value: &str) -> EntityId {
    EntityId::new(value).expect("entity id")
}

fn lid(value: &str) -> LocationId {
    LocationId::new(value).expect("location id")
}

pub(crate) fn author_choices() -> ChoiceList {
    ChoiceList::from_choices([
        Choice::new(eid("a:1"), "J.R.R. Tolkien"),
        Choice::new(eid("a:2"), "Ursula K. Le Guin"),
        Choice::new(eid("a:3"), "Stanisław Lem"),
        Choice::new(eid("a:4"), "Jane Austen"),
        Choice::new(eid("a:5"), "Terry Pratchett"),
    ])
}

pub(crate) fn tag_choices() -> ChoiceList {
    ChoiceList::from_choices([
        Choice::new(eid("t:1"), "Fantasy"),
        Choice::new(eid("t:2"), "Science Fiction"),
        Choice::new(eid("t:3"), "Classic"),
        Choice::new(eid("t:4"), "History"),
        Choice::new(eid("t:5"), "Unread"),
    ])
}

pub(crate) fn location_tree() -> Vec<LocationNode> {
    vec![
        LocationNode::with_children(
            lid("l:office"),
            "Office",
            vec![
                LocationNode::new(lid("l:office-a"), "Shelf A"),
                LocationNode::with_children(
                    lid("l:office-b"),
                    "Shelf B",
                    vec![LocationNode::new(lid("l:office-b-top"), "Top row")],
                ),
            ],
        ),
        LocationNode::with_children(
            lid("l:living"),
            "Living room",
            vec![
                LocationNode::new(lid("l:living-main"), "Main wall"),
                LocationNode::new(lid("l:living-box"), "Storage box"),
            ],
        ),
        LocationNode::new(lid("l:attic"), "Attic"),
    ]
}

#[cfg(test)]
pub(crate) fn tiny_choices() -> ChoiceList {
    ChoiceList::from_choices([
        Choice::new(eid("1"), "Fantasy"),
        Choice::new(eid("2"), "Fiction"),
        Choice::new(eid("3"), "Field Guides"),
    ])
}
