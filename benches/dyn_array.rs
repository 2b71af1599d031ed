use basic_containers::DynArray;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

fn bench_push(c: &mut Criterion) {
    let n = 1_000_000;
    {
        let mut group = c.benchmark_group("Vec vs DynArray (Push 1M, reserved)");
        group.sample_size(20);
        group.bench_function("std::vec::Vec", |b| {
            b.iter(|| {
                let mut v = Vec::with_capacity(n);
                for i in 0..n {
                    v.push(black_box(i as i32));
                }
                v
            })
        });

        group.bench_function("DynArray<i32>", |b| {
            b.iter(|| {
                let mut v: DynArray<i32> = DynArray::new();
                v.reserve(n);
                for i in 0..n {
                    v.push_back(black_box(i as i32));
                }
                v
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("Vec vs DynArray (Push 1M, growing)");
        group.sample_size(20);
        group.bench_function("std::vec::Vec", |b| {
            b.iter(|| {
                let mut v = Vec::new();
                for i in 0..n {
                    v.push(black_box(i as i32));
                }
                v
            })
        });

        group.bench_function("DynArray<i32>", |b| {
            b.iter(|| {
                let mut v: DynArray<i32> = DynArray::new();
                for i in 0..n {
                    v.push_back(black_box(i as i32));
                }
                v
            })
        });
        group.finish();
    }
}

fn bench_access(c: &mut Criterion) {
    let n = 1024;
    let mut group = c.benchmark_group("Vec vs DynArray (Access 1024)");
    let v_std = vec![123i32; n];
    let v_dyn = DynArray::with_size_value(n, 123i32);

    group.bench_function("std::vec::Vec", |b| {
        b.iter(|| {
            for i in 0..n {
                black_box(v_std.get(black_box(i)));
            }
        })
    });

    group.bench_function("DynArray::at", |b| {
        b.iter(|| {
            for i in 0..n {
                let _ = black_box(v_dyn.at(black_box(i)));
            }
        })
    });
    group.finish();
}

fn bench_insert_erase(c: &mut Criterion) {
    let n = 4096;
    let mut group = c.benchmark_group("Vec vs DynArray (Insert/Erase middle 4096)");
    let source: Vec<u64> = (0..n).collect();

    group.bench_function("std::vec::Vec", |b| {
        b.iter_batched(
            || source.clone(),
            |mut v| {
                v.insert(n as usize / 2, black_box(7));
                v.remove(n as usize / 2);
                v
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("DynArray<u64>", |b| {
        b.iter_batched(
            || DynArray::from_slice(&source),
            |mut v| {
                v.insert(n as usize / 2, black_box(7));
                v.erase(n as usize / 2);
                v
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("DynArray::insert_slice", |b| {
        let chunk = [1u64; 64];
        b.iter_batched(
            || DynArray::from_slice(&source),
            |mut v| {
                v.insert_slice(n as usize / 2, black_box(&chunk));
                v.erase_range(n as usize / 2..n as usize / 2 + 64);
                v
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_push, bench_access, bench_insert_erase);
criterion_main!(benches);
