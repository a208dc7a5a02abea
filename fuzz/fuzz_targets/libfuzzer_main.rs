#![no_main]

use libfuzzer_sys::fuzz_target;

#[path = "../src/util.rs"]
mod util;

fuzz_target!(|data: &[u8]| {
    let mut bytes = data.to_vec();
    flagsort::sort(&mut bytes);
    util::check_sorted(data, &bytes);

    let original = util::u8_as_u64(data);
    let mut v = original.clone();
    flagsort::sort(&mut v);
    util::check_sorted(&original, &v);

    let original = util::u8_as_byte_strings(data);
    let mut v = original.clone();
    flagsort::sort(&mut v);
    util::check_sorted(&original, &v);

    // Signed pairs exercise the sign flip and the composite digit sequence.
    let original = data
        .chunks_exact(2)
        .map(|c| (c[0] as i8, c[1] as i16 - 128))
        .collect::<Vec<_>>();
    let mut v = original.clone();
    flagsort::sort(&mut v);
    util::check_sorted(&original, &v);
});
