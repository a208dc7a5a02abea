//! Bucketing pass: digit counting, bucket bounds, and the in-place cycle permutation.

use core::mem::ManuallyDrop;
use core::ptr;

use crate::GapGuard;

/// Overwrites `count` with the number of elements of `v` per value of digit `pass`.
pub(crate) fn count_digits<T, D>(v: &[T], pass: usize, digit: &mut D, count: &mut [usize])
where
    D: FnMut(&T, usize) -> usize,
{
    count.fill(0);
    for elem in v {
        count[digit(elem, pass)] += 1;
    }
}

/// Counts digit `pass + 1` for the stripe starting at `start`, the maximal run of elements that
/// share digit `pass` with `v[start]`. Returns the exclusive end of the stripe.
pub(crate) fn count_stripe<T, D>(
    v: &[T],
    start: usize,
    pass: usize,
    digit: &mut D,
    count: &mut [usize],
) -> usize
where
    D: FnMut(&T, usize) -> usize,
{
    count.fill(0);

    let stripe_digit = digit(&v[start], pass);
    let mut end = start;
    while end < v.len() && digit(&v[end], pass) == stripe_digit {
        count[digit(&v[end], pass + 1)] += 1;
        end += 1;
    }

    end
}

/// Turns per-digit counts into bucket bounds. Afterwards bucket `r` spans
/// `pile[r]..count[r]`, `count` holding running end offsets and `pile` the start offsets.
pub(crate) fn accumulate(count: &mut [usize], pile: &mut [usize]) {
    debug_assert_eq!(count.len(), pile.len());

    let mut sum = 0;
    for (c, p) in count.iter_mut().zip(pile.iter_mut()) {
        *p = sum;
        sum += *c;
        *c = sum;
    }
}

/// Moves every element of `v` into the bucket of its digit `pass`, with bounds as produced by
/// [`accumulate`].
///
/// Scans left to right. Every position before the scan index holds an element of the right
/// bucket, and `pile[r]` is the next free slot of bucket `r`. A misplaced element is lifted out,
/// leaving a hole at the scan index, and carried along the displacement chain until an element
/// of the hole's bucket comes up. Each element is written once per chain it takes part in.
pub(crate) fn permute<T, D>(
    v: &mut [T],
    pass: usize,
    digit: &mut D,
    count: &[usize],
    pile: &mut [usize],
) where
    D: FnMut(&T, usize) -> usize,
{
    let len = v.len();
    let v_base = v.as_mut_ptr();

    let mut i = 0;
    while i < len {
        // SAFETY: `i < len`.
        let r = digit(unsafe { &*v_base.add(i) }, pass);
        let next_free = pile[r];
        let bucket_start = if r == 0 { 0 } else { count[r - 1] };

        if bucket_start <= i && i < next_free {
            // Placed earlier by a chain.
            i += 1;
            continue;
        }

        if i == next_free {
            pile[r] = next_free + 1;
            i += 1;
            continue;
        }

        // SAFETY: `i < len`, so reading it is valid. From here on `hole` owns the element taken
        // out of `v[i]` and `v[i]` is the only slot not holding a live value. Every other slot
        // touched in the chain is checked to be in bounds and not equal to `i`. If `digit`
        // panics or the cursor check fails, dropping `hole` writes the carried element into
        // `v[i]`, so `v` again holds every element exactly once.
        unsafe {
            let mut hole = GapGuard {
                pos: v_base.add(i),
                value: ManuallyDrop::new(ptr::read(v_base.add(i))),
            };

            let mut carried = r;
            loop {
                let target = pile[carried];
                pile[carried] = target + 1;

                if target == i {
                    // Cycle closed, `hole` drops and fills `v[i]`.
                    break;
                }

                if target >= len {
                    panic_on_digit_violation();
                }

                let v_target = v_base.add(target);
                let displaced = digit(&*v_target, pass);
                if displaced == carried {
                    // Already in its bucket, the cursor moved past it.
                    continue;
                }

                ptr::swap(&mut *hole.value as *mut T, v_target);
                carried = displaced;
            }
        }

        i += 1;
    }
}

#[inline(never)]
#[cold]
fn panic_on_digit_violation() -> ! {
    panic!("digit contract violation: a digit changed during the sort or exceeded its bucket");
}
