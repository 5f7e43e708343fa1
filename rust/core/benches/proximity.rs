// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Benchmark for the brute-force proximity scan.
//!
//! Run with: cargo bench -p cityblock-core --bench proximity

use cityblock_core::{
    Building, Coordinate, Dataset, ModelDefinition, ModelGroup, ModelSubstitution,
    ProximityQuery, QueryEngine,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Grid of square footprints, `side` x `side`, 20 units apart.
fn generate_engine(side: usize, vertices_per_building: usize) -> QueryEngine {
    let mut buildings = Vec::with_capacity(side * side);
    for i in 0..side {
        for j in 0..side {
            let cx = i as f64 * 20.0;
            let cz = j as f64 * 20.0;
            let nodes = (0..vertices_per_building)
                .map(|k| {
                    let angle = k as f64 / vertices_per_building as f64 * std::f64::consts::TAU;
                    Coordinate::new(cx + 6.0 * angle.cos(), cz + 6.0 * angle.sin())
                })
                .collect();
            buildings.push(Building::new(format!("{}-{}", i, j), None, 9.0, nodes));
        }
    }

    // Every 50th building belongs to one of four models.
    let mut definition = ModelDefinition {
        groups: (0..4)
            .map(|g| ModelGroup::new(g.to_string(), format!("/model-{}.fbx", g)))
            .collect(),
        ..Default::default()
    };
    for (n, b) in buildings.iter().enumerate().step_by(50) {
        definition.assign(b.id.clone(), ((n / 50) % 4).to_string());
    }

    let dataset = Dataset::new(buildings, Coordinate::default()).expect("valid dataset");
    let models = ModelSubstitution::from_definition(definition).expect("valid definition");
    QueryEngine::new(dataset, models)
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("proximity_query");

    for side in [10usize, 30, 60] {
        let engine = generate_engine(side, 8);
        let center = Coordinate::new(side as f64 * 10.0, side as f64 * 10.0);
        let query = ProximityQuery::new(center, 150.0).expect("valid query");

        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_with_input(BenchmarkId::new("buildings", side * side), &query, |b, q| {
            b.iter(|| black_box(engine.query(black_box(q))).len())
        });
    }

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let engine = generate_engine(30, 8);
    let query = ProximityQuery::new(Coordinate::new(300.0, 300.0), 150.0).expect("valid query");

    c.bench_function("query_and_serialize", |b| {
        b.iter(|| {
            let result = engine.query(black_box(&query));
            serde_json::to_vec(&result).expect("serializable")
        })
    });
}

criterion_group!(benches, bench_query, bench_serialize);
criterion_main!(benches);
