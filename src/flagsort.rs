use core::cmp::Ordering;
use core::mem;
use core::ops::Range;

use crate::permute::{accumulate, count_digits, count_stripe, permute};
use crate::smallsort::insertion_sort;
use crate::SMALL_SORT_THRESHOLD;

/// Recursive bucketing driver. Owns the key functions and the `count`/`pile` scratch shared by
/// every range of one top-level call.
pub(crate) struct FlagSort<C, E, D> {
    compare: C,
    exhausted: E,
    digit: D,
    count: Vec<usize>,
    pile: Vec<usize>,
}

impl<C, E, D> FlagSort<C, E, D> {
    pub(crate) fn new(radix: usize, compare: C, exhausted: E, digit: D) -> Self {
        Self {
            compare,
            exhausted,
            digit,
            count: vec![0; radix],
            pile: vec![0; radix],
        }
    }

    /// Sorts `v`, whose elements must share every digit before `pass`.
    pub(crate) fn sort_from<T>(&mut self, v: &mut [T], pass: usize)
    where
        C: FnMut(&T, &T) -> Ordering,
        E: FnMut(&T, usize) -> bool,
        D: FnMut(&T, usize) -> usize,
    {
        if v.is_empty() {
            return;
        }

        count_digits(v, pass, &mut self.digit, &mut self.count);
        self.sort_counted(v, pass);
    }

    /// Sorts `v` at digit `pass`. `count` must hold the digit `pass` counts of `v`.
    fn sort_counted<T>(&mut self, mut v: &mut [T], mut pass: usize)
    where
        C: FnMut(&T, &T) -> Ordering,
        E: FnMut(&T, usize) -> bool,
        D: FnMut(&T, usize) -> usize,
    {
        loop {
            // Every element shares the digits before `pass` with `v[0]`. If `v[0]` ended there,
            // all of them did, and they are all equal.
            if pass > 0 && (self.exhausted)(&v[0], pass - 1) {
                return;
            }

            let len = v.len();
            if len < SMALL_SORT_THRESHOLD {
                let compare = &mut self.compare;
                insertion_sort(v, &mut |a, b| compare(a, b) == Ordering::Less);
                return;
            }

            accumulate(&mut self.count, &mut self.pile);
            debug_assert_eq!(self.count.last(), Some(&len));
            permute(v, pass, &mut self.digit, &self.count, &mut self.pile);

            // Each stripe is one bucket. Recurse into all but the largest, which continues in this
            // frame, so every recursion at least halves the range.
            let largest = largest_bucket(&self.count);

            let mut start = 0;
            while start < len {
                if start == largest.start {
                    start = largest.end;
                    continue;
                }

                let end = count_stripe(v, start, pass, &mut self.digit, &mut self.count);
                self.sort_counted(&mut v[start..end], pass + 1);
                start = end;
            }

            let end = count_stripe(v, largest.start, pass, &mut self.digit, &mut self.count);
            debug_assert_eq!(end, largest.end);

            v = &mut mem::take(&mut v)[largest];
            pass += 1;
        }
    }
}

/// Finds the largest bucket given the end offsets produced by `accumulate`. Ties go to the first.
fn largest_bucket(ends: &[usize]) -> Range<usize> {
    let mut largest = 0..0;
    let mut start = 0;
    for &end in ends {
        if end - start > largest.len() {
            largest = start..end;
        }
        start = end;
    }

    largest
}
