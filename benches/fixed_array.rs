use basic_containers::FixedArray;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("FixedArray Fill (4096 x u32)");

    group.bench_function("[u32; N]::fill", |b| {
        let mut a = [0u32; 4096];
        b.iter(|| {
            a.fill(black_box(7));
            black_box(&a);
        })
    });

    group.bench_function("FixedArray::fill_copy", |b| {
        let mut a: FixedArray<u32, 4096> = FixedArray::default();
        b.iter(|| {
            a.fill_copy(black_box(7));
            black_box(&a);
        })
    });

    group.bench_function("FixedArray::fill", |b| {
        let mut a: FixedArray<u32, 4096> = FixedArray::default();
        b.iter(|| {
            a.fill(black_box(&7));
            black_box(&a);
        })
    });

    group.bench_function("FixedArray::splat", |b| {
        b.iter(|| FixedArray::<u32, 4096>::splat(black_box(7)))
    });
    group.finish();
}

criterion_group!(benches, bench_fill);
criterion_main!(benches);
