// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `tenet_type` pipelines.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use tenet_type::{
    Context, InfoLevel, IntegerPrototype, LengthRange, Options, PlainRenderer, Range,
    StringPrototype, TypeFactory, TypeUnit, Value,
};

fn bench_pipeline(c: &mut Criterion) {
    let integer = TypeUnit::new(IntegerPrototype::new())
        .with_mutator(Range::between(0, 1_000_000).unwrap());

    let mut group = c.benchmark_group("pipeline/integer");

    group.bench_function("native", |b| {
        b.iter(|| {
            let mut value = Value::from(4096);
            black_box(integer.process(&mut value, Context::Internal, false).is_ok());
            black_box(value)
        });
    });

    for input in ["4096", "0x1000", "4Ki", "4.096e3"] {
        group.bench_function(BenchmarkId::new("interface_string", input), |b| {
            b.iter(|| {
                let mut value = Value::from(input);
                black_box(integer.process(&mut value, Context::Interface, false).is_ok());
                black_box(value)
            });
        });
    }

    group.bench_function("strict_rejection", |b| {
        b.iter(|| {
            let mut value = Value::from("4096");
            black_box(integer.process(&mut value, Context::Interface, true).is_err())
        });
    });

    group.finish();

    let mut group = c.benchmark_group("pipeline/string");

    let factory = TypeFactory::with_builtins();
    let mut text = factory.build("string", &Options::new()).unwrap();
    text.add_mutator(&factory, "trim", &Options::new())
        .unwrap()
        .add_mutator(&factory, "non_empty", &Options::new())
        .unwrap()
        .add_mutator(&factory, "chars", &Options::new().with("class", "alphanumeric"))
        .unwrap();
    let text = text.with_mutator(LengthRange::new(None, Some(64)).unwrap());

    group.bench_function("accepted", |b| {
        b.iter_batched(
            || Value::from("   username42   "),
            |mut value| {
                black_box(text.process(&mut value, Context::Interface, false).is_ok());
                value
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("rejected_and_rendered", |b| {
        b.iter(|| {
            let mut value = Value::from("user name");
            let err = text
                .process(&mut value, Context::Interface, false)
                .unwrap_err();
            black_box(err.render(&PlainRenderer, InfoLevel::Technical))
        });
    });

    let list = factory
        .build("list", &Options::new().with("items", "integer"))
        .unwrap();
    group.bench_function("list_split", |b| {
        b.iter(|| {
            list.try_cast(
                Value::from("1, 2, 3, 4, 5, 6, 7, 8"),
                Context::Configuration,
                false,
            )
        });
    });

    let plain = TypeUnit::new(StringPrototype);
    group.bench_function("textify", |b| {
        b.iter(|| black_box(plain.try_textify(&Value::from(12.5), Context::Internal)));
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
