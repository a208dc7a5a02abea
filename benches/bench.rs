use std::cell::RefCell;
use std::env;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use flagsort::{patterns, Lexicographic};

#[inline(never)]
fn bench_sort<T: Ord + std::fmt::Debug>(
    c: &mut Criterion,
    test_size: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
    bench_name: &str,
    sort_func: impl Fn(&mut [T]),
) {
    let batch_size = if test_size > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    c.bench_function(
        &format!("{bench_name}-{transform_name}-{pattern_name}-{test_size}"),
        |b| {
            b.iter_batched(
                || transform(pattern_provider(test_size)),
                |mut test_data| sort_func(black_box(test_data.as_mut_slice())),
                batch_size,
            )
        },
    );
}

fn measure_comp_count(
    name: &str,
    test_size: usize,
    instrumented_sort_func: impl Fn(),
    comp_count: Rc<RefCell<u64>>,
) {
    // Measure how many comparisons are performed by a specific implementation and input
    // combination. For flagsort these are only the comparisons of the small range fallback.
    let run_count: usize = if test_size <= 20 {
        100_000
    } else if test_size < 10_000 {
        3000
    } else if test_size < 100_000 {
        1000
    } else {
        100
    };

    *comp_count.borrow_mut() = 0;
    for _ in 0..run_count {
        instrumented_sort_func();
    }

    // If there is on average less than a single comparison this will be wrong.
    let total = *comp_count.borrow() / (run_count as u64);
    println!("{name}: mean comparisons: {total}");
}

#[inline(never)]
fn bench_impl<T: Ord + Lexicographic + std::fmt::Debug>(
    c: &mut Criterion,
    test_size: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
) {
    if env::var("MEASURE_COMP").is_ok() {
        if test_size > 100_000 {
            return;
        }

        // Instrument via sort_by with the digit functions of T, so the measured sort is the same
        // one `sort` runs.
        let comp_count = Rc::new(RefCell::new(0u64));

        let comp_count_copy = comp_count.clone();
        let instrumented_flagsort = || {
            let mut test_data = transform(pattern_provider(test_size));
            flagsort::sort_by(
                black_box(test_data.as_mut_slice()),
                |a, b| {
                    *comp_count_copy.borrow_mut() += 1;
                    a.cmp(b)
                },
                T::exhausted,
                T::RADIX,
                T::digit,
            );
        };
        measure_comp_count(
            &format!("flagsort-comp-{transform_name}-{pattern_name}-{test_size}"),
            test_size,
            instrumented_flagsort,
            comp_count.clone(),
        );

        let comp_count_copy = comp_count.clone();
        let instrumented_std = || {
            let mut test_data = transform(pattern_provider(test_size));
            black_box(test_data.as_mut_slice()).sort_unstable_by(|a, b| {
                *comp_count_copy.borrow_mut() += 1;
                a.cmp(b)
            });
        };
        measure_comp_count(
            &format!("rust_std_unstable-comp-{transform_name}-{pattern_name}-{test_size}"),
            test_size,
            instrumented_std,
            comp_count,
        );
    } else {
        bench_sort(
            c,
            test_size,
            transform_name,
            transform,
            pattern_name,
            pattern_provider,
            "flagsort",
            flagsort::sort,
        );

        bench_sort(
            c,
            test_size,
            transform_name,
            transform,
            pattern_name,
            pattern_provider,
            "rust_std_unstable",
            <[T]>::sort_unstable,
        );
    }
}

fn shuffle_vec<T: Ord>(mut v: Vec<T>) -> Vec<T> {
    use rand::seq::SliceRandom;
    use rand::thread_rng;

    let mut rng = thread_rng();
    v.shuffle(&mut rng);

    v
}

fn split_len(size: usize, part_a_percent: f64) -> (usize, usize) {
    let len_a = ((size as f64 / 100.0) * part_a_percent).round() as usize;
    let len_b = size - len_a;

    (len_a, len_b)
}

fn bench_patterns<T: Ord + Lexicographic + std::fmt::Debug>(
    c: &mut Criterion,
    test_size: usize,
    transform_name: &str,
    transform: fn(Vec<i32>) -> Vec<T>,
) {
    if test_size > 100_000 && !(transform_name == "i32" || transform_name == "u64") {
        // These are just too expensive.
        return;
    }

    let mut pattern_providers: Vec<(&'static str, fn(usize) -> Vec<i32>)> = vec![
        ("random", patterns::random),
        ("random_dense", |size| {
            patterns::random_uniform(size, 0..=(((size as f64).log2().round()) as i32))
        }),
        ("random_binary", |size| patterns::random_uniform(size, 0..=1)),
        ("random_zipf", |size| patterns::random_zipf(size, 1.0)),
        ("random_5p", |size| {
            let (len_95p, len_5p) = split_len(size, 95.0);
            let v: Vec<i32> = std::iter::repeat(0)
                .take(len_95p)
                .chain(patterns::random(len_5p))
                .collect();

            shuffle_vec(v)
        }),
        ("ascending", patterns::ascending),
        ("descending", patterns::descending),
        ("saws_long", |size| {
            patterns::saw_mixed(size, ((size as f64).log2().round()) as usize)
        }),
    ];

    // Inputs that stress the bucketing, one digit shared by almost everything or very few keys.
    let mut extra_pattern_providers: Vec<(&'static str, fn(usize) -> Vec<i32>)> = vec![
        ("all_equal", patterns::all_equal),
        ("few_distinct_10", |size| patterns::few_distinct(size, 0, 10)),
        ("90p_zero_10p_random", |size| {
            let (len_90p, len_10p) = split_len(size, 90.0);
            let v: Vec<i32> = std::iter::repeat(0)
                .take(len_90p)
                .chain(patterns::random(len_10p))
                .collect();

            shuffle_vec(v)
        }),
        ("random_low_byte", |size| {
            patterns::random_uniform(size, 0..256)
        }),
        ("pipe_organ", patterns::pipe_organ),
    ];

    if env::var("EXTRA_PATTERNS").is_ok() {
        pattern_providers.append(&mut extra_pattern_providers);
    }

    for (pattern_name, pattern_provider) in pattern_providers.iter() {
        if test_size < 3 && *pattern_name != "random" {
            continue;
        }

        bench_impl(
            c,
            test_size,
            transform_name,
            &transform,
            pattern_name,
            pattern_provider,
        );
    }
}

fn ensure_true_random() {
    // Ensure that random vecs are actually different.
    let random_vec_a = patterns::random(5);
    let random_vec_b = patterns::random(5);

    assert_ne!(random_vec_a, random_vec_b);
}

fn criterion_benchmark(c: &mut Criterion) {
    let test_sizes = [
        0, 1, 2, 3, 8, 16, 24, 25, 26, 36, 50, 101, 200, 500, 1_000, 2_048, 10_000, 100_000,
        1_000_000,
    ];

    patterns::disable_fixed_seed();
    ensure_true_random();

    for test_size in test_sizes {
        // Basic type often used to test sorting algorithms.
        bench_patterns(c, test_size, "i32", |values| values);

        // Common type for usize on 64-bit machines.
        bench_patterns(c, test_size, "u64", |values| {
            values
                .iter()
                .map(|val| -> u64 {
                    // Extends the value into the 64 bit range,
                    // while preserving input order.
                    let x = ((*val as i64) + (i32::MAX as i64) + 1) as u64;
                    x.checked_mul(i32::MAX as u64).unwrap()
                })
                .collect()
        });

        // Variable length keys, one extra digit pass per byte.
        bench_patterns(c, test_size, "rust_string", |values| {
            values.iter().map(|val| format!("{:010}", val)).collect()
        });

        // Composite key, fixed width prefix followed by a string.
        bench_patterns(c, test_size, "u16_string", |values| {
            values
                .iter()
                .map(|val| ((*val >> 16) as u16, format!("{}", val & 0xFFFF)))
                .collect()
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
