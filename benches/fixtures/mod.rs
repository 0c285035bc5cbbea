// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use exlibris::model::{Choice, ChoiceList, EntityId, EntityKind};
use exlibris::services::Catalog;

pub const FIRST_NAMES: &[&str] = &[
    "Ada", "Bram", "Clara", "Doris", "Edmund", "Freya", "Gareth", "Hilda", "Ivan", "Joan", "Kazuo",
    "Lena", "Marlon", "Nadia", "Octavia", "Petra",
];

pub const LAST_NAMES: &[&str] = &[
    "Abara",
    "Banville",
    "Carver",
    "Donoghue",
    "Eco",
    "Fitzgerald",
    "Garland",
    "Hargrove",
    "Ishiguro",
    "Jemisin",
    "Keegan",
    "Lindqvist",
    "Mantel",
    "Naipaul",
    "Okri",
    "Pullman",
    "Quentell",
    "Rushdie",
    "Saramago",
    "Tokarczuk",
];

pub fn author_id(index: usize) -> EntityId {
    format!("a:{}", index + 1).parse().expect("author id")
}

/// Cycles through the name pools; labels repeat once the pools are exhausted,
/// which is fine because ids stay unique.
pub fn author_name(index: usize) -> (&'static str, &'static str) {
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last = LAST_NAMES[(index / FIRST_NAMES.len()) % LAST_NAMES.len()];
    (first, last)
}

pub fn author_choices(len: usize) -> ChoiceList {
    ChoiceList::from_choices((0..len).map(|index| {
        let (first, last) = author_name(index);
        Choice::new(author_id(index), format!("{first} {last}"))
    }))
}

/// A catalog of `len` authors; every ninth one carries a "Last, First"
/// alternate name so the scorer has alt-name work to do.
pub fn author_catalog(len: usize) -> Catalog {
    let mut catalog = Catalog::new();
    for index in 0..len {
        let (first, last) = author_name(index);
        let choice = Choice::new(author_id(index), format!("{first} {last}"));
        if index % 9 == 3 {
            catalog.add_entity_with_alt_names(
                EntityKind::Author,
                choice,
                vec![format!("{last}, {first}")],
            );
        } else {
            catalog.add_entity(EntityKind::Author, choice);
        }
    }
    catalog
}
