// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `tenet_property` managers.

use std::sync::Arc;

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use tenet_property::{Mode, PropertyDescriptor, PropertyManager, PropertyValues};
use tenet_type::{Context, IntegerPrototype, Range, TypeUnit};

fn eager_manager(count: usize, unit: &Arc<TypeUnit>) -> PropertyManager<usize> {
    let mut manager = PropertyManager::new(count, false, Mode::Rw);
    for i in 0..count {
        manager
            .add_property(format!("p{i}"))
            .unwrap()
            .set_type(Arc::clone(unit), Context::Configuration)
            .unwrap();
    }
    manager
}

fn values(count: usize) -> PropertyValues {
    (0..count).map(|i| (format!("p{i}"), format!("{i}"))).collect()
}

fn bench_manager(c: &mut Criterion) {
    let unit = Arc::new(
        TypeUnit::new(IntegerPrototype::new()).with_mutator(Range::between(0, 10_000).unwrap()),
    );

    let mut group = c.benchmark_group("manager/initialize");

    for count in [4_usize, 16, 64] {
        group.bench_function(BenchmarkId::new("eager", count), |b| {
            b.iter_batched(
                || (eager_manager(count, &unit), values(count)),
                |(mut manager, values)| {
                    manager.initialize(values).unwrap();
                    black_box(manager)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("lazy", count), |b| {
            b.iter_batched(
                || {
                    let mut manager = PropertyManager::new(count, true, Mode::Rw);
                    let unit = Arc::clone(&unit);
                    manager
                        .set_builder(move |name| {
                            let mut descriptor = PropertyDescriptor::new(name);
                            descriptor
                                .set_as_lazy()
                                .ok()?
                                .set_type(Arc::clone(&unit), Context::Configuration)
                                .ok()?;
                            Some(descriptor)
                        })
                        .unwrap();
                    (manager, values(count))
                },
                |(mut manager, values)| {
                    manager.initialize(values).unwrap();
                    black_box(manager)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();

    let mut group = c.benchmark_group("manager/access");

    let mut manager = eager_manager(16, &unit);
    manager.initialize(values(16)).unwrap();

    group.bench_function("get", |b| {
        b.iter(|| black_box(manager.get("p7").unwrap()));
    });

    group.bench_function("set", |b| {
        b.iter(|| manager.set("p7", black_box("42")).unwrap());
    });

    group.bench_function("get_all", |b| {
        b.iter(|| black_box(manager.get_all().unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_manager);
criterion_main!(benches);
