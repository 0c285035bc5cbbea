// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use exlibris::model::{EntityKind, ScoredChoice};
use exlibris::services::{CatalogService, SimilaritySearch};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group name in this file: `service.similar`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (e.g. `authors_1k_typo`).
// - If implementations move/deduplicate, update the wiring but do not rename
//   group or case IDs.
fn benches_similarity(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("current-thread runtime");

    let mut group = c.benchmark_group("service.similar");

    for (case_id, len, query) in [
        ("authors_1k_typo", 1_024, "Nadia Ishigro"),
        ("authors_16k_typo", 16_384, "Nadia Ishigro"),
        ("authors_16k_alt_name", 16_384, "Tokarczuk, Lena"),
        ("authors_16k_miss", 16_384, "qqqq zzzz"),
    ] {
        let service = CatalogService::new(fixtures::author_catalog(len));
        group.throughput(Throughput::Elements(len as u64));
        group.bench_function(case_id, |b| {
            b.iter(|| {
                let ranked = runtime
                    .block_on(service.similar(EntityKind::Author, black_box(query)))
                    .expect("similar");
                black_box(checksum_ranked(&ranked))
            })
        });
    }

    group.finish();
}

fn checksum_ranked(ranked: &[ScoredChoice]) -> u64 {
    ranked
        .iter()
        .map(|scored| u64::from(scored.score()) + scored.choice().label().len() as u64)
        .sum()
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_similarity
}
criterion_main!(benches);
