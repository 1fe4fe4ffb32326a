//! Benchmark workload profiles for dynarr.
//!
//! Provides deterministic inputs shared by the Criterion benches:
//!
//! - [`append_profile`]: element counts for the append benchmarks
//! - [`insert_positions`]: pseudo-random insert offsets via seed
//! - [`filled`]: an array of `0..n` built with plain appends

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynarr::DynamicArray;

/// Element counts used by the append and reserve benchmarks.
///
/// Spans the first few reallocations up to a size where migration cost
/// dominates.
pub fn append_profile() -> [usize; 4] {
    [16, 1_000, 10_000, 100_000]
}

/// Build an array holding `0..n` via `push`.
pub fn filled(n: usize) -> DynamicArray<u64> {
    let mut array = DynamicArray::new();
    for i in 0..n as u64 {
        array.push(i);
    }
    array
}

/// Deterministic insert offsets for a sequence of `count` inserts starting
/// from an array of `initial_len` elements.
///
/// Offset `i` is always within `[0, initial_len + i]`, so every offset is a
/// valid insert position at the time it is used.
pub fn insert_positions(initial_len: usize, count: usize, seed: u64) -> Vec<usize> {
    let mut state = seed;
    (0..count)
        .map(|i| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as usize) % (initial_len + i + 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynarr::Cursor;

    #[test]
    fn filled_holds_sequence() {
        let a = filled(100);
        assert_eq!(a.len(), 100);
        assert!(a.iter().copied().eq(0..100));
    }

    #[test]
    fn insert_positions_are_valid() {
        let positions = insert_positions(10, 500, 7);
        let mut a = filled(10);
        for (i, &pos) in positions.iter().enumerate() {
            assert!(pos <= 10 + i, "position {pos} out of bounds at step {i}");
            a.insert(Cursor::new(pos), i as u64);
        }
        assert_eq!(a.len(), 510);
    }

    #[test]
    fn insert_positions_deterministic() {
        assert_eq!(insert_positions(5, 20, 42), insert_positions(5, 20, 42));
        assert_ne!(insert_positions(5, 20, 42), insert_positions(5, 20, 43));
    }
}
