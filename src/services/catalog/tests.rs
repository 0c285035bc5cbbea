// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use super::{similarity_score, Catalog, CatalogError, CatalogService, SIMILAR_LIMIT};
use crate::model::{Choice, EntityId, EntityKind};
use crate::services::{EntityCreate, Isbn, IsbnLookup, ServiceError, SimilaritySearch};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("exlibris-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn eid(value: &str) -> EntityId {
    EntityId::new(value).expect("entity id")
}

fn demo_service() -> CatalogService {
    CatalogService::new(Catalog::demo())
}

#[test]
fn similarity_score_is_100_for_case_fold_equal_text() {
    assert_eq!(similarity_score("fantasy", "fantasy"), 100);
}

#[test]
fn similarity_score_is_100_for_exact_substring_window() {
    assert_eq!(similarity_score("tolkien", "j.r.r. tolkien"), 100);
}

#[test]
fn similarity_score_ignores_word_order_and_punctuation() {
    assert_eq!(similarity_score("tolkien, j.r.r.", "j.r.r. tolkien"), 100);
}

#[tokio::test]
async fn similar_ranks_surname_against_full_name() {
    let service = demo_service();

    let candidates = service
        .similar(EntityKind::Author, "Tolkien")
        .await
        .expect("similar");

    assert!(!candidates.is_empty());
    assert!(candidates.len() <= SIMILAR_LIMIT);
    let top = &candidates[0];
    assert_eq!(top.choice().label(), "J.R.R. Tolkien");
    assert_eq!(top.score(), 100);
}

#[tokio::test]
async fn similar_counts_alternate_names_toward_best_score() {
    let service = demo_service();

    let candidates = service
        .similar(EntityKind::Author, "Stanislaw Lem")
        .await
        .expect("similar");

    let top = candidates.first().expect("at least one candidate");
    assert_eq!(top.choice().value(), &eid("a:3"));
    assert_eq!(top.score(), 100);
}

#[tokio::test]
async fn similar_drops_candidates_below_threshold() {
    let mut catalog = Catalog::new();
    catalog.add_entity(EntityKind::Tag, Choice::new(eid("t:1"), "Fantasy"));
    catalog.add_entity(EntityKind::Tag, Choice::new(eid("t:2"), "Zzz"));
    let service = CatalogService::new(catalog);

    let candidates = service
        .similar(EntityKind::Tag, "fantasy")
        .await
        .expect("similar");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].choice().value(), &eid("t:1"));
}

#[tokio::test]
async fn similar_truncates_to_top_two_keeping_catalog_order_on_ties() {
    let mut catalog = Catalog::new();
    catalog.add_entity(EntityKind::Tag, Choice::new(eid("h:1"), "History"));
    catalog.add_entity(EntityKind::Tag, Choice::new(eid("h:2"), "History"));
    catalog.add_entity(EntityKind::Tag, Choice::new(eid("h:3"), "History"));
    let service = CatalogService::new(catalog);

    let candidates = service
        .similar(EntityKind::Tag, "History")
        .await
        .expect("similar");

    assert_eq!(candidates.len(), SIMILAR_LIMIT);
    assert_eq!(candidates[0].choice().value(), &eid("h:1"));
    assert_eq!(candidates[1].choice().value(), &eid("h:2"));
}

#[tokio::test]
async fn similar_rejects_blank_input_with_service_wording() {
    let service = demo_service();

    let author_err = service.similar(EntityKind::Author, "  ").await.unwrap_err();
    assert_eq!(author_err, ServiceError::Rejected("Name is required".to_owned()));

    let tag_err = service.similar(EntityKind::Tag, "").await.unwrap_err();
    assert_eq!(tag_err, ServiceError::Rejected("Label is required".to_owned()));
}

#[tokio::test]
async fn create_mints_sequential_id_and_stores_choice() {
    let service = demo_service();

    let created = service
        .create(EntityKind::Author, "Diana Wynne Jones")
        .await
        .expect("create");

    assert_eq!(created.value(), &eid("a:6"));
    assert_eq!(created.label(), "Diana Wynne Jones");

    let catalog = service.catalog().await;
    assert!(catalog.choices(EntityKind::Author).contains_value(&eid("a:6")));
}

#[tokio::test]
async fn create_skips_ids_already_taken() {
    let mut catalog = Catalog::new();
    catalog.add_entity(EntityKind::Author, Choice::new(eid("a:2"), "Only Author"));
    let service = CatalogService::new(catalog);

    let created = service.create(EntityKind::Author, "Another").await.expect("create");
    assert_eq!(created.value(), &eid("a:3"));
}

#[tokio::test]
async fn create_rejects_duplicate_labels_case_insensitively() {
    let service = demo_service();

    let err = service
        .create(EntityKind::Author, "j.r.r. tolkien")
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Rejected("Author already exists".to_owned()));

    let err = service.create(EntityKind::Tag, "FANTASY").await.unwrap_err();
    assert_eq!(err, ServiceError::Rejected("Tag already exists".to_owned()));
}

#[tokio::test]
async fn create_rejects_blank_labels() {
    let service = demo_service();

    let err = service.create(EntityKind::Tag, "   ").await.unwrap_err();
    assert_eq!(err, ServiceError::Rejected("Label is required".to_owned()));
}

#[tokio::test]
async fn lookup_answers_from_isbn_records() {
    let service = demo_service();

    let record = service
        .lookup(&Isbn::parse("978-0-261-10334-4").unwrap())
        .await
        .expect("lookup");
    assert_eq!(record.title, "The Hobbit");
    assert_eq!(record.authors, ["J. R. R. Tolkien"]);

    let missing = service
        .lookup(&Isbn::parse("9999999999").unwrap())
        .await
        .unwrap_err();
    assert_eq!(missing, ServiceError::NotFound);
}

#[test]
fn demo_catalog_has_entities_locations_and_records() {
    let catalog = Catalog::demo();
    assert_eq!(catalog.choices(EntityKind::Author).len(), 5);
    assert_eq!(catalog.choices(EntityKind::Tag).len(), 5);
    assert!(!catalog.locations().is_empty());
    assert!(catalog.isbn_record(&Isbn::parse("9780441478125").unwrap()).is_some());
}

#[test]
fn load_builds_catalog_from_json_file() {
    let tmp = TempDir::new("catalog-load");
    let path = tmp.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{
            "authors": [
                {"id": "7", "name": "Joan Aiken", "alt_names": ["J. Aiken"]}
            ],
            "tags": [
                {"id": "9", "name": "Adventure"}
            ],
            "locations": [
                {"id": "attic", "name": "Attic", "children": [
                    {"id": "attic-box", "name": "Box 3"}
                ]}
            ]
        }"#,
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();

    let authors = catalog.choices(EntityKind::Author);
    assert_eq!(authors.len(), 1);
    assert_eq!(authors.get(&eid("7")).unwrap().label(), "Joan Aiken");
    assert_eq!(catalog.choices(EntityKind::Tag).len(), 1);

    let locations = catalog.locations();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].label(), "Attic");
    assert_eq!(locations[0].children()[0].label(), "Box 3");
}

#[tokio::test]
async fn loaded_alternate_names_answer_similarity_queries() {
    let tmp = TempDir::new("catalog-alt");
    let path = tmp.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{"authors": [{"id": "7", "name": "Joan Aiken", "alt_names": ["Aiken, Joan"]}]}"#,
    )
    .unwrap();

    let service = CatalogService::new(Catalog::load(&path).unwrap());
    let candidates = service
        .similar(EntityKind::Author, "aiken, joan")
        .await
        .expect("similar");
    assert_eq!(candidates[0].score(), 100);
}

#[test]
fn load_reports_invalid_ids_with_field_context() {
    let tmp = TempDir::new("catalog-bad-id");
    let path = tmp.path().join("catalog.json");
    std::fs::write(&path, r#"{"tags": [{"id": " 9", "name": "Padded"}]}"#).unwrap();

    let err = Catalog::load(&path).unwrap_err();
    match err {
        CatalogError::InvalidId { field, value, .. } => {
            assert_eq!(field, "tags");
            assert_eq!(value, " 9");
        }
        other => panic!("expected InvalidId, got {other:?}"),
    }
}

#[test]
fn load_reports_missing_file_as_io_error() {
    let tmp = TempDir::new("catalog-missing");
    let err = Catalog::load(&tmp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn load_isbn_db_normalizes_keys() {
    let tmp = TempDir::new("isbn-db");
    let path = tmp.path().join("isbn.json");
    std::fs::write(
        &path,
        r#"{"978-0-261-10334-4": {"title": "The Hobbit"}}"#,
    )
    .unwrap();

    let mut catalog = Catalog::new();
    catalog.load_isbn_db(&path).unwrap();

    let record = catalog.isbn_record(&Isbn::parse("9780261103344").unwrap()).unwrap();
    assert_eq!(record.title, "The Hobbit");
    assert!(record.authors.is_empty());
}

#[test]
fn load_isbn_db_rejects_short_keys() {
    let tmp = TempDir::new("isbn-db-bad");
    let path = tmp.path().join("isbn.json");
    std::fs::write(&path, r#"{"123": {"title": "Too short"}}"#).unwrap();

    let mut catalog = Catalog::new();
    let err = catalog.load_isbn_db(&path).unwrap_err();
    match err {
        CatalogError::InvalidIsbn { value, .. } => assert_eq!(value, "123"),
        other => panic!("expected InvalidIsbn, got {other:?}"),
    }
}
