use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use catalogsync_core::{CategoryId, ProductId};
use catalogsync_events::Fold;
use catalogsync_products::{
    Category, EditIntent, FoldInput, PriceMarkup, Product, ProductReconciler, enrich_all,
};

fn catalog(size: usize) -> (Vec<Product>, Vec<Category>) {
    let categories: Vec<Category> = (1..=20)
        .map(|id| Category::new(CategoryId::new(id), format!("Category {id}")))
        .collect();
    let products = (0..size as i64)
        .map(|id| {
            Product::new(ProductId::new(id + 1), format!("Product {id}"), format!("GEN-{id:05}"))
                .in_category(CategoryId::new(id % 25 + 1))
                .with_price(id as f64 * 0.25)
        })
        .collect();
    (products, categories)
}

fn bench_enrichment(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrichment");

    for size in [10, 100, 1000, 10000].iter() {
        let (products, categories) = catalog(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("enrich_all", size), size, |b, _| {
            b.iter(|| enrich_all(black_box(&products), black_box(&categories), PriceMarkup::DEFAULT));
        });
    }

    group.finish();
}

fn bench_edit_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit_latency");

    for size in [100, 1000, 10000].iter() {
        let (products, categories) = catalog(*size);
        let snapshot = enrich_all(&products, &categories, PriceMarkup::DEFAULT);
        let target = snapshot[snapshot.len() / 2].clone();

        // Update is a full pass over the reconciled list.
        group.bench_with_input(BenchmarkId::new("update", size), size, |b, _| {
            let mut fold = Fold::new(ProductReconciler);
            fold.apply(FoldInput::Snapshot(snapshot.clone()));
            b.iter(|| {
                fold.apply(black_box(FoldInput::Edit(EditIntent::restock(&target))));
            });
        });
    }

    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile_replay");

    for edits in [10, 100, 1000].iter() {
        let (products, categories) = catalog(500);
        let snapshot = enrich_all(&products, &categories, PriceMarkup::DEFAULT);
        let inputs: Vec<FoldInput> = std::iter::once(FoldInput::Snapshot(snapshot.clone()))
            .chain((0..*edits).map(|i| {
                let item = &snapshot[i % snapshot.len()];
                match i % 3 {
                    0 => FoldInput::Edit(EditIntent::Add(item.clone())),
                    1 => FoldInput::Edit(EditIntent::restock(item)),
                    _ => FoldInput::Edit(EditIntent::delete(item)),
                }
            }))
            .collect();

        group.throughput(Throughput::Elements(*edits as u64));
        group.bench_with_input(BenchmarkId::new("replay", edits), edits, |b, _| {
            b.iter(|| Fold::replay(ProductReconciler, black_box(inputs.clone())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_enrichment, bench_edit_latency, bench_replay);
criterion_main!(benches);
