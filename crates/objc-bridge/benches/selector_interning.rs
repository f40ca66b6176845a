// Selector registration and lookup benchmarks
//
// Measures:
// - registration of an already-interned name (cache hit)
// - registration of fresh names (cache miss)
// - the per-call-site cache behind `sel!`
// - equality, hashing and name rendering
// - registration under thread contention

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use objc_bridge::{Selector, sel};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

fn bench_register_hit(c: &mut Criterion) {
    let _warm = Selector::register("initWithObject:");

    c.bench_function("selector_register_hit", |b| {
        b.iter(|| black_box(Selector::register(black_box("initWithObject:"))))
    });
}

fn bench_register_miss(c: &mut Criterion) {
    let mut counter = 0u64;
    c.bench_function("selector_register_miss", |b| {
        b.iter(|| {
            counter = counter.wrapping_add(1);
            let name = format!("benchSelector{counter}:");
            black_box(Selector::register(&name))
        })
    });
}

fn bench_sel_macro(c: &mut Criterion) {
    c.bench_function("sel_macro_cached", |b| {
        b.iter(|| black_box(sel!("countByEnumeratingWithState:objects:count:")))
    });
}

fn bench_name_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector_register_by_length");

    for name in [
        "init",
        "initWithObject:",
        "performSelector:withObject:afterDelay:",
        "countByEnumeratingWithState:objects:count:",
    ] {
        let _warm = Selector::register(name);
        group.bench_with_input(BenchmarkId::from_parameter(name.len()), name, |b, name| {
            b.iter(|| black_box(Selector::register(name)))
        });
    }

    group.finish();
}

fn bench_equality_and_hash(c: &mut Criterion) {
    let a = Selector::register("isEqual:");
    let b = Selector::register("isEqual:");

    c.bench_function("selector_eq", |bench| {
        bench.iter(|| black_box(black_box(a) == black_box(b)))
    });

    c.bench_function("selector_hash", |bench| {
        bench.iter(|| {
            let mut hasher = DefaultHasher::new();
            black_box(a).hash(&mut hasher);
            black_box(hasher.finish())
        })
    });

    c.bench_function("selector_to_text", |bench| {
        bench.iter(|| black_box(black_box(a).to_text()))
    });
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector_register_contended");

    for threads in [2usize, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        thread::spawn(move || {
                            for i in 0..100 {
                                let name = if i % 2 == 0 { "shared:" } else { "alloc" };
                                black_box(Selector::register(name));
                            }
                            t
                        })
                    })
                    .collect();
                for handle in handles {
                    black_box(handle.join().unwrap());
                }
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_register_hit,
    bench_register_miss,
    bench_sel_macro,
    bench_name_lengths,
    bench_equality_and_hash,
    bench_contention,
);
criterion_main!(benches);
