// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Headless form widgets.
//!
//! Everything here is plain state plus row descriptors; the terminal layer
//! in `crate::tui` draws the rows and feeds keys back in. The multi-selects
//! double as the [`crate::reconcile::SelectionSurface`] the reconciler
//! writes through.

pub mod form;
pub mod multi_select;
pub mod tree_select;

pub use form::{BookForm, FormSubmission};
pub use multi_select::{OptionRow, TagRow, TaggedMultiSelect};
pub use tree_select::{TreeMarker, TreePicker, TreeRow};
