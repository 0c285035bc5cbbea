// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::LocationId;

/// One node of the shelving-location hierarchy (room, shelf, box, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNode {
    value: LocationId,
    label: String,
    children: Vec<LocationNode>,
}

impl LocationNode {
    pub fn new(value: LocationId, label: impl Into<String>) -> Self {
        Self::with_children(value, label, Vec::new())
    }

    pub fn with_children(
        value: LocationId,
        label: impl Into<String>,
        children: Vec<LocationNode>,
    ) -> Self {
        Self {
            value,
            label: label.into(),
            children,
        }
    }

    pub fn value(&self) -> &LocationId {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[LocationNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
