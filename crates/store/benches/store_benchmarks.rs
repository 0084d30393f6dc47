use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tokio::runtime::Runtime;

use tally_core::{ItemName, Quantity};
use tally_store::{DocumentStore, InMemoryDocumentStore, ItemDocument};

fn seeded_store(rt: &Runtime, items: usize) -> InMemoryDocumentStore {
    let store = InMemoryDocumentStore::new();
    rt.block_on(async {
        for i in 0..items {
            store
                .write(
                    &ItemName::new(format!("item-{i}")),
                    ItemDocument::new(Quantity::new(1 + i as u64).unwrap()),
                )
                .await
                .unwrap();
        }
    });
    store
}

fn bench_adjust(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("adjust");

    for items in [16usize, 256, 4096] {
        group.throughput(Throughput::Elements(items as u64));
        group.bench_with_input(BenchmarkId::from_parameter(items), &items, |b, &items| {
            let store = seeded_store(&rt, items);
            let names: Vec<ItemName> = (0..items)
                .map(|i| ItemName::new(format!("item-{i}")))
                .collect();

            b.iter(|| {
                rt.block_on(async {
                    for name in &names {
                        black_box(store.adjust(name, 1).await.unwrap());
                    }
                });
            });
        });
    }

    group.finish();
}

fn bench_snapshot_fanout(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("snapshot_fanout");

    for subscribers in [1usize, 8, 64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, &subscribers| {
                let store = seeded_store(&rt, 64);
                let subs: Vec<_> = rt.block_on(async {
                    let mut subs = Vec::with_capacity(subscribers);
                    for _ in 0..subscribers {
                        subs.push(store.subscribe().await.unwrap());
                    }
                    subs
                });
                let name = ItemName::new("item-0");

                b.iter(|| {
                    rt.block_on(async {
                        store.adjust(&name, 1).await.unwrap();
                    });
                    // Drain so channels stay bounded in practice.
                    for sub in &subs {
                        while sub.try_recv().is_ok() {}
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_adjust, bench_snapshot_fanout);
criterion_main!(benches);
