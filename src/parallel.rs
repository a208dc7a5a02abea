use core::cmp::Ordering;
use core::mem;

use rayon::prelude::*;

use crate::flagsort::FlagSort;
use crate::permute::{accumulate, count_digits, permute};
use crate::SMALL_SORT_THRESHOLD;

/// Buckets `v` by its first digit, then sorts the buckets as independent rayon tasks. Every task
/// gets its own scratch.
pub(crate) fn par_flag_sort<T, C, E, D>(
    v: &mut [T],
    radix: usize,
    compare: &C,
    exhausted: &E,
    digit: &D,
) where
    T: Send,
    C: Fn(&T, &T) -> Ordering + Sync,
    E: Fn(&T, usize) -> bool + Sync,
    D: Fn(&T, usize) -> usize + Sync,
{
    if v.len() < SMALL_SORT_THRESHOLD {
        FlagSort::new(radix, compare, exhausted, digit).sort_from(v, 0);
        return;
    }

    let mut count = vec![0; radix];
    let mut pile = vec![0; radix];
    let mut first_digit = digit;

    count_digits(v, 0, &mut first_digit, &mut count);
    accumulate(&mut count, &mut pile);
    permute(v, 0, &mut first_digit, &count, &mut pile);

    let mut buckets = Vec::new();
    let mut rest = v;
    let mut start = 0;
    for &end in &count {
        if end > start {
            let (bucket, tail) = mem::take(&mut rest).split_at_mut(end - start);
            buckets.push(bucket);
            rest = tail;
        }
        start = end;
    }

    log::debug!("parallel flag sort: {} buckets", buckets.len());

    buckets.into_par_iter().for_each(|bucket| {
        FlagSort::new(radix, compare, exhausted, digit).sort_from(bucket, 1);
    });
}
