use std::collections::HashMap;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use campstock_catalog::Item;
use campstock_core::{Entity, ItemId, WarehouseId};
use campstock_ledger::StockEntry;
use campstock_projection::{consolidated_totals, requirement_rows};

fn build_catalog(count: usize) -> (Vec<Item>, Vec<StockEntry>) {
    let warehouses: Vec<WarehouseId> = (0..3).map(|_| WarehouseId::new()).collect();

    let mut items = Vec::with_capacity(count);
    let mut entries = Vec::new();
    for i in 0..count {
        let mut item = Item::register(&format!("item-{i}"), "Gear", chrono::Utc::now()).unwrap();
        item.reserve_demand((i % 17) as u64).unwrap();
        for (w, warehouse) in warehouses.iter().enumerate() {
            entries.push(StockEntry::open(
                item.id(),
                *warehouse,
                ((i + w) % 11) as u64,
            ));
        }
        items.push(item);
    }
    (items, entries)
}

fn bench_requirement_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("requirement_report");

    for count in [100usize, 1_000, 10_000] {
        let (items, entries) = build_catalog(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("{count}_items"), |b| {
            b.iter(|| {
                let totals: HashMap<ItemId, u64> = consolidated_totals(black_box(&entries));
                requirement_rows(black_box(items.iter()), &totals)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_requirement_report);
criterion_main!(benches);
