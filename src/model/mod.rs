// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model for the cataloging form.
//!
//! A book form holds a text draft plus multi-valued entity fields (authors,
//! tags) and a shelving location; the reconciliation records that feed
//! disambiguation live here too.

pub mod choice;
pub mod draft;
pub(crate) mod fixtures;
pub mod ids;
pub mod location;
pub mod unresolved;

pub use choice::{Choice, ChoiceList, EntityKind, SelectionSet};
pub use draft::{BookDraft, DraftField};
pub use ids::{EntityId, Id, IdError, LocationId};
pub use location::LocationNode;
pub use unresolved::{Resolution, ScoredChoice, UnresolvedItem};
