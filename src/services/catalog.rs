// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rapidfuzz::fuzz;
use rayon::prelude::*;
use tokio::sync::Mutex;

use crate::model::ids::IdError;
use crate::model::{fixtures, Choice, ChoiceList, EntityId, EntityKind, LocationId, LocationNode};
use crate::model::ScoredChoice;

use super::types::{BookRecord, CatalogEntityEntry, CatalogFile, CatalogLocationEntry};
use super::{EntityCreate, Isbn, IsbnError, IsbnLookup, ServiceError, SimilaritySearch};

/// How many candidates a similarity query returns.
const SIMILAR_LIMIT: usize = 2;
/// Minimum score (percent) a candidate needs to be proposed at all.
const SIMILAR_THRESHOLD: u8 = 70;

/// One entity the catalog knows, with the extra names it also answers
/// similarity queries under.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CatalogEntity {
    choice: Choice,
    alt_names: Vec<String>,
}

impl CatalogEntity {
    /// Best score across the primary label and every alternate name.
    fn best_score(&self, needle_lower: &str) -> u8 {
        let mut best = similarity_score(needle_lower, &self.choice.label().to_lowercase());
        for alt in &self.alt_names {
            best = best.max(similarity_score(needle_lower, &alt.to_lowercase()));
        }
        best
    }
}

/// The data a [`CatalogService`] serves: entities per kind, the shelving
/// location tree, and the ISBN records it can answer lookups from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    authors: Vec<CatalogEntity>,
    tags: Vec<CatalogEntity>,
    locations: Vec<LocationNode>,
    isbn_records: BTreeMap<String, BookRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in demo library: a handful of authors, tags, shelves and
    /// ISBN records, enough to walk the whole autofill flow offline.
    pub fn demo() -> Self {
        let mut catalog = Self::new();

        for choice in &fixtures::author_choices() {
            catalog.add_entity(EntityKind::Author, choice.clone());
        }
        for choice in &fixtures::tag_choices() {
            catalog.add_entity(EntityKind::Tag, choice.clone());
        }
        for node in fixtures::location_tree() {
            catalog.add_location(node);
        }

        catalog.set_alt_names(EntityKind::Author, "a:1", &["John Ronald Reuel Tolkien"]);
        catalog.set_alt_names(EntityKind::Author, "a:2", &["Ursula Le Guin"]);
        catalog.set_alt_names(EntityKind::Author, "a:3", &["Stanislaw Lem"]);

        for (isbn, record) in demo_isbn_records() {
            catalog.add_isbn_record(isbn, record);
        }

        catalog
    }

    /// Loads entity and location data from a `--catalog` JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: CatalogFile = serde_json::from_str(&text).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let mut catalog = Self::new();
        for entry in file.authors {
            let entity = entity_from_entry("authors", entry)?;
            catalog.authors.push(entity);
        }
        for entry in file.tags {
            let entity = entity_from_entry("tags", entry)?;
            catalog.tags.push(entity);
        }
        for entry in file.locations {
            catalog.locations.push(location_from_entry(entry)?);
        }
        Ok(catalog)
    }

    /// Merges ISBN records from an `--isbn-db` JSON file (a map of ISBN to
    /// book record). Keys are normalized, so separator style in the file
    /// does not matter.
    pub fn load_isbn_db(&mut self, path: &Path) -> Result<(), CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: BTreeMap<String, BookRecord> =
            serde_json::from_str(&text).map_err(|source| CatalogError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        for (key, record) in records {
            let isbn = Isbn::parse(&key).map_err(|source| CatalogError::InvalidIsbn {
                value: key,
                source: Box::new(source),
            })?;
            self.add_isbn_record(isbn, record);
        }
        Ok(())
    }

    pub fn add_entity(&mut self, kind: EntityKind, choice: Choice) {
        self.add_entity_with_alt_names(kind, choice, Vec::new());
    }

    pub fn add_entity_with_alt_names(
        &mut self,
        kind: EntityKind,
        choice: Choice,
        alt_names: Vec<String>,
    ) {
        self.entities_mut(kind).push(CatalogEntity { choice, alt_names });
    }

    pub fn add_location(&mut self, node: LocationNode) {
        self.locations.push(node);
    }

    pub fn add_isbn_record(&mut self, isbn: Isbn, record: BookRecord) {
        self.isbn_records.insert(isbn.into_string(), record);
    }

    /// All known choices of one kind, in catalog order.
    pub fn choices(&self, kind: EntityKind) -> ChoiceList {
        ChoiceList::from_choices(self.entities(kind).iter().map(|e| e.choice.clone()))
    }

    pub fn locations(&self) -> &[LocationNode] {
        &self.locations
    }

    pub fn isbn_record(&self, isbn: &Isbn) -> Option<&BookRecord> {
        self.isbn_records.get(isbn.as_str())
    }

    fn entities(&self, kind: EntityKind) -> &[CatalogEntity] {
        match kind {
            EntityKind::Author => &self.authors,
            EntityKind::Tag => &self.tags,
        }
    }

    fn entities_mut(&mut self, kind: EntityKind) -> &mut Vec<CatalogEntity> {
        match kind {
            EntityKind::Author => &mut self.authors,
            EntityKind::Tag => &mut self.tags,
        }
    }

    fn set_alt_names(&mut self, kind: EntityKind, value: &str, alt_names: &[&str]) {
        if let Some(entity) = self
            .entities_mut(kind)
            .iter_mut()
            .find(|e| e.choice.value().as_str() == value)
        {
            entity.alt_names = alt_names.iter().map(|s| (*s).to_owned()).collect();
        }
    }
}

fn entity_from_entry(
    field: &'static str,
    entry: CatalogEntityEntry,
) -> Result<CatalogEntity, CatalogError> {
    let value = EntityId::new(entry.id.clone()).map_err(|source| CatalogError::InvalidId {
        field,
        value: entry.id,
        source: Box::new(source),
    })?;
    Ok(CatalogEntity {
        choice: Choice::new(value, entry.name),
        alt_names: entry.alt_names,
    })
}

fn location_from_entry(entry: CatalogLocationEntry) -> Result<LocationNode, CatalogError> {
    let value = LocationId::new(entry.id.clone()).map_err(|source| CatalogError::InvalidId {
        field: "locations",
        value: entry.id,
        source: Box::new(source),
    })?;
    let mut children = Vec::with_capacity(entry.children.len());
    for child in entry.children {
        children.push(location_from_entry(child)?);
    }
    Ok(LocationNode::with_children(value, entry.name, children))
}

fn demo_isbn_records() -> Vec<(Isbn, BookRecord)> {
    let isbn = |s: &str| Isbn::parse(s).expect("hard-coded demo isbn is valid");
    vec![
        (
            isbn("978-0-261-10334-4"),
            BookRecord {
                title: "The Hobbit".to_owned(),
                authors: vec!["J. R. R. Tolkien".to_owned()],
                description: "Bilbo Baggins is swept into a quest for treasure.".to_owned(),
                cover_url: "https://covers.openlibrary.org/b/isbn/9780261103344-M.jpg".to_owned(),
                categories: vec!["Fantasy".to_owned(), "Classics".to_owned()],
            },
        ),
        (
            isbn("978-0-441-47812-5"),
            BookRecord {
                title: "The Left Hand of Darkness".to_owned(),
                authors: vec!["Ursula K. Le Guin".to_owned()],
                description: "An envoy alone on the ice world of Gethen.".to_owned(),
                cover_url: "https://covers.openlibrary.org/b/isbn/9780441478125-M.jpg".to_owned(),
                categories: vec!["Science Fiction".to_owned()],
            },
        ),
        (
            isbn("978-0-15-602732-8"),
            BookRecord {
                title: "Solaris".to_owned(),
                authors: vec!["Stanislaw Lem".to_owned(), "Christopher Priest".to_owned()],
                description: "A sentient ocean studies its studiers.".to_owned(),
                cover_url: "https://covers.openlibrary.org/b/isbn/9780156027328-M.jpg".to_owned(),
                categories: vec!["Science Fiction".to_owned(), "First Contact".to_owned()],
            },
        ),
    ]
}

#[derive(Debug)]
pub enum CatalogError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: Box<IdError>,
    },
    InvalidIsbn {
        value: String,
        source: Box<IsbnError>,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::InvalidId {
                field,
                value,
                source,
            } => write!(f, "invalid id {value:?} in {field}: {source}"),
            Self::InvalidIsbn { value, source } => {
                write!(f, "invalid isbn key {value:?}: {source}")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::InvalidIsbn { source, .. } => Some(source),
        }
    }
}

/// In-memory implementation of all three service contracts.
///
/// Creation mutates the entity store, so the catalog sits behind a lock;
/// lookups clone what they answer with.
#[derive(Debug)]
pub struct CatalogService {
    inner: Mutex<Catalog>,
}

impl CatalogService {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Mutex::new(catalog),
        }
    }

    /// Snapshot of the catalog as it stands, including entities created
    /// since construction.
    pub async fn catalog(&self) -> Catalog {
        self.inner.lock().await.clone()
    }
}

#[async_trait]
impl IsbnLookup for CatalogService {
    async fn lookup(&self, isbn: &Isbn) -> Result<BookRecord, ServiceError> {
        let catalog = self.inner.lock().await;
        catalog
            .isbn_record(isbn)
            .cloned()
            .ok_or(ServiceError::NotFound)
    }
}

#[async_trait]
impl SimilaritySearch for CatalogService {
    async fn similar(
        &self,
        kind: EntityKind,
        text: &str,
    ) -> Result<Vec<ScoredChoice>, ServiceError> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Err(ServiceError::Rejected(required_message(kind)));
        }

        let catalog = self.inner.lock().await;
        let entities = catalog.entities(kind);
        let mut ranked: Vec<(usize, u8)> = entities
            .par_iter()
            .enumerate()
            .filter_map(|(index, entity)| {
                let score = entity.best_score(&needle);
                (score >= SIMILAR_THRESHOLD).then_some((index, score))
            })
            .collect();

        // Score descending; the index tiebreak keeps catalog order stable.
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(SIMILAR_LIMIT);

        Ok(ranked
            .into_iter()
            .map(|(index, score)| ScoredChoice::new(entities[index].choice.clone(), score))
            .collect())
    }
}

#[async_trait]
impl EntityCreate for CatalogService {
    async fn create(&self, kind: EntityKind, label: &str) -> Result<Choice, ServiceError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ServiceError::Rejected(required_message(kind)));
        }

        let mut catalog = self.inner.lock().await;
        let label_lower = label.to_lowercase();
        if catalog
            .entities(kind)
            .iter()
            .any(|e| e.choice.label().to_lowercase() == label_lower)
        {
            return Err(ServiceError::Rejected(exists_message(kind)));
        }

        let value = mint_id(catalog.entities(kind), kind);
        let choice = Choice::new(value, label);
        catalog.add_entity(kind, choice.clone());
        Ok(choice)
    }
}

fn required_message(kind: EntityKind) -> String {
    match kind {
        EntityKind::Author => "Name is required".to_owned(),
        EntityKind::Tag => "Label is required".to_owned(),
    }
}

fn exists_message(kind: EntityKind) -> String {
    match kind {
        EntityKind::Author => "Author already exists".to_owned(),
        EntityKind::Tag => "Tag already exists".to_owned(),
    }
}

fn mint_id(entities: &[CatalogEntity], kind: EntityKind) -> EntityId {
    let prefix = match kind {
        EntityKind::Author => "a",
        EntityKind::Tag => "t",
    };
    let mut n = entities.len() + 1;
    loop {
        let candidate = format!("{prefix}:{n}");
        if !entities.iter().any(|e| e.choice.value().as_str() == candidate) {
            return EntityId::new(candidate).expect("minted entity id is valid");
        }
        n += 1;
    }
}

/// Best of three measures, as an integer percentage: plain ratio, best
/// substring window, and ratio over word-sorted text with punctuation
/// dropped (so "Tolkien, J.R.R." and "J.R.R. Tolkien" land together).
fn similarity_score(needle_lower: &str, haystack_lower: &str) -> u8 {
    let ratio = fuzz::ratio(needle_lower.chars(), haystack_lower.chars());
    let partial = partial_ratio(needle_lower, haystack_lower);
    let needle_sorted = sorted_tokens(needle_lower);
    let haystack_sorted = sorted_tokens(haystack_lower);
    let token_sort = fuzz::ratio(needle_sorted.chars(), haystack_sorted.chars());
    ratio.max(partial).max(token_sort).round() as u8
}

/// The `rapidfuzz` crate does not ship `fuzz::partial_ratio`, so this is its
/// standard definition: the best `ratio` between the shorter string and every
/// same-length substring window of the longer one, on the 0-100 scale the
/// Python API uses.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };
    if short.is_empty() {
        return fuzz::ratio(a.chars(), b.chars()) * 100.0;
    }
    long.windows(short.len())
        .map(|window| fuzz::ratio(short.iter().copied(), window.iter().copied()))
        .fold(0.0, f64::max)
        * 100.0
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests;
