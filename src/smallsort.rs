use core::mem::ManuallyDrop;
use core::ptr;

use crate::GapGuard;

/// Sorts `v` with insertion sort, the fallback for ranges below `SMALL_SORT_THRESHOLD`.
///
/// Not stable-by-contract, but happens to be stable. If `is_less` panics every element of `v` is
/// still present exactly once.
pub(crate) fn insertion_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    // Shift each element of the unsorted region v[i..] as far left as is needed to make v sorted.
    for i in 1..len {
        insert_tail(&mut v[..=i], is_less);
    }
}

/// Inserts `v[v.len() - 1]` into pre-sorted sequence `v[..v.len() - 1]` so that whole `v[..]`
/// becomes sorted.
fn insert_tail<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    debug_assert!(v.len() >= 2);

    let v_base = v.as_mut_ptr();
    let i = v.len() - 1;

    // SAFETY: The caller guarantees `v.len()` is at least 2, so `i` and `i - 1` are in bounds, and
    // every `j` visited below is smaller than `i - 1`.
    unsafe {
        let v_i = v_base.add(i);

        if is_less(&*v_i, &*v_i.sub(1)) {
            // From here on `gap` owns the value taken out of `v_i`. If `is_less` panics, dropping
            // `gap` writes that value into the open slot, so `v` again holds every element once.
            let mut gap = GapGuard {
                pos: v_i.sub(1),
                value: ManuallyDrop::new(ptr::read(v_i)),
            };
            ptr::copy_nonoverlapping(gap.pos, v_i, 1);

            for j in (0..(i - 1)).rev() {
                let v_j = v_base.add(j);
                if !is_less(&*gap.value, &*v_j) {
                    break;
                }

                ptr::copy_nonoverlapping(v_j, gap.pos, 1);
                gap.pos = v_j;
            }
            // `gap` gets dropped and thus copies the held value into the remaining gap in `v`.
        }
    }
}
