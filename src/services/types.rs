// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

/// Bibliographic data an ISBN lookup returns.
///
/// Upstream sources differ in coverage, so every field tolerates absence and
/// arrives empty rather than failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// One entity row of a catalog file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntityEntry {
    pub id: String,
    pub name: String,
    /// Extra names this entity also answers similarity queries under.
    #[serde(default)]
    pub alt_names: Vec<String>,
}

/// One node of the shelving-location tree in a catalog file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLocationEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub children: Vec<CatalogLocationEntry>,
}

/// On-disk catalog shape consumed by `--catalog`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub authors: Vec<CatalogEntityEntry>,
    #[serde(default)]
    pub tags: Vec<CatalogEntityEntry>,
    #[serde(default)]
    pub locations: Vec<CatalogLocationEntry>,
}
