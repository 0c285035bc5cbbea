// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Contracts for the capabilities the form consumes.
//!
//! The form needs three things from the outside world: bibliographic lookup
//! by ISBN, similarity search over known entities, and entity creation. Each
//! is a trait so the TUI runs the same against the bundled in-memory catalog
//! or a remote backend.

pub mod catalog;
pub mod types;

use std::fmt;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::model::{Choice, EntityKind, ScoredChoice};

pub use catalog::{Catalog, CatalogError, CatalogService};
pub use types::{BookRecord, CatalogEntityEntry, CatalogFile, CatalogLocationEntry};

/// A normalized ISBN: separators stripped, length checked.
///
/// Only shape is validated here; whether the ISBN resolves to anything is
/// the lookup service's call, so no checksum is computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isbn(String);

fn isbn_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-\s]").expect("hard-coded separator pattern is valid"))
}

impl Isbn {
    pub fn parse(input: &str) -> Result<Self, IsbnError> {
        let normalized = isbn_separators().replace_all(input, "").into_owned();
        if normalized.chars().count() < 10 {
            return Err(IsbnError::TooShort {
                len: normalized.chars().count(),
            });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsbnError {
    TooShort { len: usize },
}

impl fmt::Display for IsbnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len } => write!(
                f,
                "isbn has {len} characters after stripping separators, need at least 10"
            ),
        }
    }
}

impl std::error::Error for IsbnError {}

/// Why a service call did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service answered and has no data for the input.
    NotFound,
    /// The service answered and refused the request (duplicate create,
    /// empty name, ...). The message is the service's own wording.
    Rejected(String),
    /// The service could not be reached or failed outright.
    Unavailable(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("not found"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
            Self::Unavailable(reason) => write!(f, "service unavailable: {reason}"),
        }
    }
}

impl std::error::Error for ServiceError {}

#[async_trait]
pub trait IsbnLookup: Send + Sync {
    async fn lookup(&self, isbn: &Isbn) -> Result<BookRecord, ServiceError>;
}

#[async_trait]
pub trait SimilaritySearch: Send + Sync {
    /// Ranked candidates for `text`, best first. Thresholding and truncation
    /// are the service's job; callers keep the returned ranking verbatim.
    async fn similar(
        &self,
        kind: EntityKind,
        text: &str,
    ) -> Result<Vec<ScoredChoice>, ServiceError>;
}

#[async_trait]
pub trait EntityCreate: Send + Sync {
    async fn create(&self, kind: EntityKind, label: &str) -> Result<Choice, ServiceError>;
}
