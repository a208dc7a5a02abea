//! In-place American flag sort, an unstable most-significant-digit radix sort.
//!
//! Keys are decomposed into big-endian digits through [`Lexicographic`]. Each pass counts the
//! digits of a range, moves every element into its digit's bucket with an in-place cycle
//! permutation, and continues with the next digit inside every bucket. Ranges shorter than
//! [`SMALL_SORT_THRESHOLD`] are finished with insertion sort, which is the only place that
//! compares elements.

use core::cmp::Ordering;
use core::mem::{self, ManuallyDrop};
use core::ptr;

mod flagsort;
mod lexicographic;
#[cfg(feature = "rayon")]
mod parallel;
mod permute;
mod smallsort;

pub mod patterns;

pub use lexicographic::{FixedWidth, Lexicographic};

/// Ranges shorter than this are sorted by comparison instead of being bucketed.
pub const SMALL_SORT_THRESHOLD: usize = 25;

/// Sorts the slice, but might not preserve the order of equal elements.
///
/// This sort is unstable (i.e., may reorder equal elements), in-place (i.e., does not allocate
/// memory proportional to the input), and *O*(*n* \* *d*) where *d* is the number of digits of the
/// key. Scratch memory is two arrays of `T::RADIX` counters.
///
/// # Current implementation
///
/// American flag sort: elements are bucketed by their most significant digit, then every bucket
/// is bucketed by the next digit, until a bucket runs out of digits or becomes shorter than
/// [`SMALL_SORT_THRESHOLD`].
pub fn sort<T>(v: &mut [T])
where
    T: Ord + Lexicographic,
{
    sort_by(v, T::cmp, T::exhausted, T::RADIX, T::digit);
}

/// Sorts the slice with caller supplied key functions, but might not preserve the order of equal
/// elements.
///
/// `digit(e, position)` yields the big-endian digit of `e` at `position`, a value in
/// `0..radix`, and 0 for positions past the end of `e`. `exhausted(e, position)` is `true` if the
/// digit at `position` is the last digit of `e`. `compare` is only used to finish ranges shorter
/// than [`SMALL_SORT_THRESHOLD`] and must agree with the digit order. If the three functions
/// disagree, the order of the elements is unspecified, but every element is retained.
///
/// Useful for composite keys, for example strings with an explicit end of key:
///
/// ```
/// let mut v = ["ab", "", "b", "a"];
/// flagsort::sort_by(
///     &mut v,
///     |a, b| a.cmp(b),
///     |s, pos| pos >= s.len(),
///     257,
///     |s, pos| s.as_bytes().get(pos).map_or(0, |&b| b as usize + 1),
/// );
/// assert_eq!(v, ["", "a", "ab", "b"]);
/// ```
///
/// # Panics
///
/// Panics if `digit` returns a value `>= radix`, or if it is not a pure function of the element.
pub fn sort_by<T, C, E, D>(v: &mut [T], compare: C, exhausted: E, radix: usize, digit: D)
where
    C: FnMut(&T, &T) -> Ordering,
    E: FnMut(&T, usize) -> bool,
    D: FnMut(&T, usize) -> usize,
{
    // Sorting has no meaningful behavior on zero-sized types.
    if mem::size_of::<T>() == 0 || v.len() < 2 {
        return;
    }

    log::trace!("flag sort: len={} radix={}", v.len(), radix);

    flagsort::FlagSort::new(radix, compare, exhausted, digit).sort_from(v, 0);
}

/// Sorts the slice with a key extraction function, but might not preserve the order of equal
/// elements.
///
/// The key function is called several times per element, it is not cached.
pub fn sort_by_key<T, K, F>(v: &mut [T], key: F)
where
    K: Ord + Lexicographic,
    F: Fn(&T) -> K,
{
    sort_by(
        v,
        |a, b| key(a).cmp(&key(b)),
        |e, pos| key(e).exhausted(pos),
        K::RADIX,
        |e, pos| key(e).digit(pos),
    );
}

/// Sorts the slice and moves one element of every run of equal elements to the front.
///
/// Returns the number of distinct elements. `v[..n]` is sorted and duplicate free, the order of
/// `v[n..]` is unspecified.
pub fn sort_uniq<T>(v: &mut [T]) -> usize
where
    T: Ord + Lexicographic,
{
    sort(v);

    if v.is_empty() {
        return 0;
    }

    let mut write = 1;
    for read in 1..v.len() {
        if v[read] != v[write - 1] {
            v.swap(read, write);
            write += 1;
        }
    }

    write
}

/// Parallel version of [`sort`].
#[cfg(feature = "rayon")]
pub fn par_sort<T>(v: &mut [T])
where
    T: Ord + Lexicographic + Send,
{
    par_sort_by(v, T::cmp, T::exhausted, T::RADIX, T::digit);
}

/// Parallel version of [`sort_by`]. After bucketing by the first digit, every bucket is sorted as
/// an independent task.
#[cfg(feature = "rayon")]
pub fn par_sort_by<T, C, E, D>(v: &mut [T], compare: C, exhausted: E, radix: usize, digit: D)
where
    T: Send,
    C: Fn(&T, &T) -> Ordering + Sync,
    E: Fn(&T, usize) -> bool + Sync,
    D: Fn(&T, usize) -> usize + Sync,
{
    if mem::size_of::<T>() == 0 || v.len() < 2 {
        return;
    }

    log::trace!("parallel flag sort: len={} radix={}", v.len(), radix);

    parallel::par_flag_sort(v, radix, &compare, &exhausted, &digit);
}

/// Parallel version of [`sort_by_key`].
#[cfg(feature = "rayon")]
pub fn par_sort_by_key<T, K, F>(v: &mut [T], key: F)
where
    T: Send,
    K: Ord + Lexicographic,
    F: Fn(&T) -> K + Sync,
{
    par_sort_by(
        v,
        |a, b| key(a).cmp(&key(b)),
        |e, pos| key(e).exhausted(pos),
        K::RADIX,
        |e, pos| key(e).digit(pos),
    );
}

// Owns a value moved out of a slice. On drop the value is written to `pos`, which must be the one
// slot of the slice not holding a live value.
struct GapGuard<T> {
    pos: *mut T,
    value: ManuallyDrop<T>,
}

impl<T> Drop for GapGuard<T> {
    fn drop(&mut self) {
        // SAFETY: See the invariant above, `pos` is valid for a write and currently holds no live
        // value, so this neither leaks nor duplicates.
        unsafe {
            ptr::copy_nonoverlapping(&*self.value, self.pos, 1);
        }
    }
}
