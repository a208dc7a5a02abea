/// Reads `data` as a sequence of big-endian u64 values, ignoring a trailing partial chunk.
pub fn u8_as_u64(data: &[u8]) -> Vec<u64> {
    data.chunks_exact(8)
        .map(|chunk| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            u64::from_be_bytes(bytes)
        })
        .collect()
}

/// Splits `data` on zero bytes into byte strings, empty strings included.
pub fn u8_as_byte_strings(data: &[u8]) -> Vec<Vec<u8>> {
    data.split(|&b| b == 0).map(<[u8]>::to_vec).collect()
}

/// Checks that `sorted` is ordered and holds the same elements as `original`.
pub fn check_sorted<T: Ord + Clone + std::fmt::Debug>(original: &[T], sorted: &[T]) {
    let mut expected = original.to_vec();
    expected.sort();

    assert_eq!(sorted, expected.as_slice());
}
