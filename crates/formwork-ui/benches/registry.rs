//! Benchmarks for form content creation and registry bulk operations

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use formwork_test_utils::HeadlessToolkit;
use formwork_ui::{Form, FormContext, Handle, Layout};

fn setup() -> Form {
    let context = FormContext::new(HeadlessToolkit::shared());
    Form::new_root(&context, 800, 600, "bench").unwrap()
}

fn populate(form: &Form, count: usize) -> Vec<Handle> {
    (0..count)
        .map(|i| {
            form.add_entry(&format!("Field {}", i), Layout::default())
                .unwrap()
                .0
        })
        .collect()
}

fn bench_add_entries(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_entries");

    for count in [10, 100, 500] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let form = setup();
                black_box(populate(&form, count))
            });
        });
    }

    group.finish();
}

fn bench_toggle_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle_groups");

    for count in [10, 100, 500] {
        group.throughput(Throughput::Elements(count as u64));

        let form = setup();
        let handles = populate(&form, count);

        group.bench_with_input(BenchmarkId::from_parameter(count), &handles, |b, handles| {
            b.iter(|| {
                for handle in handles {
                    form.toggle(*handle).unwrap();
                }
            });
        });
    }

    group.finish();
}

fn bench_clear_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("clear_all");

    for count in [10, 100, 500] {
        group.throughput(Throughput::Elements(count as u64));

        let form = setup();
        populate(&form, count);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(form.clear_all()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_add_entries, bench_toggle_groups, bench_clear_all);
criterion_main!(benches);
