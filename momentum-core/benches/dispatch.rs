//! Benchmarks for synchronous dispatch through stream graphs.
//!
//! Run with: cargo bench -p momentum-core

use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use momentum_core::{
    combine_latest_vec, MaybeReactive, MemorylessSubject, MotionRuntime, Observable,
    ReactiveProperty, StepFrameScheduler,
};

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/fan_out");

    for observers in [1, 4, 16, 64] {
        let subject = MemorylessSubject::new();
        let sink = Rc::new(Cell::new(0.0));
        for _ in 0..observers {
            let sink = sink.clone();
            subject.subscribe_fn(move |value: f64| sink.set(value)).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("memoryless", observers), &subject, |b, subject| {
            b.iter(|| subject.next(black_box(1.0)))
        });
    }

    group.finish();
}

fn bench_operator_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/chain");

    for depth in [1, 8, 32] {
        let subject = MemorylessSubject::new();
        let mut stream: Observable<f64> = subject.observable();
        for _ in 0..depth {
            stream = stream.added_by(1.0);
        }

        let sink = Rc::new(Cell::new(0.0));
        let sink_clone = sink.clone();
        stream.subscribe_fn(move |value| sink_clone.set(value)).unwrap();

        group.bench_with_input(BenchmarkId::new("added_by", depth), &subject, |b, subject| {
            b.iter(|| subject.next(black_box(2.0)))
        });
    }

    group.finish();
}

fn bench_combine_latest(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/combine_latest");

    for width in [2, 8, 32] {
        let properties: Vec<ReactiveProperty<f64>> =
            (0..width).map(|i| ReactiveProperty::with_value(i as f64)).collect();
        let entries: Vec<MaybeReactive<f64>> = properties.iter().map(|p| p.observable().into()).collect();

        let sum = Rc::new(Cell::new(0.0));
        let sum_clone = sum.clone();
        combine_latest_vec(entries)
            .subscribe_fn(move |values| sum_clone.set(values.iter().sum()))
            .unwrap();

        group.bench_with_input(BenchmarkId::new("vec", width), &properties, |b, properties| {
            b.iter(|| properties[0].write(black_box(3.0)))
        });
    }

    group.finish();
}

fn bench_debounced_frames(c: &mut Criterion) {
    let scheduler = StepFrameScheduler::new();
    let runtime = MotionRuntime::stepped(&scheduler);
    let subject = MemorylessSubject::new();

    let last = Rc::new(Cell::new(0.0));
    let last_clone = last.clone();
    subject
        .observable()
        .debounce_frames(&runtime)
        .subscribe_fn(move |value: f64| last_clone.set(value))
        .unwrap();

    c.bench_function("dispatch/debounce_frames", |b| {
        b.iter(|| {
            for value in 0..10 {
                subject.next(black_box(value as f64));
            }
            scheduler.step()
        })
    });
}

criterion_group!(
    benches,
    bench_fan_out,
    bench_operator_chain,
    bench_combine_latest,
    bench_debounced_frames
);
criterion_main!(benches);
