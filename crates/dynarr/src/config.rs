//! Construction requests and the growth schedule.

/// A request for an empty array with room for at least `capacity` elements.
///
/// This is a distinct type so that "N elements" and "room for N elements"
/// can never be confused at a call site:
///
/// ```
/// use dynarr::{reserve, DynamicArray};
///
/// let filled: DynamicArray<u32> = DynamicArray::with_len(4);
/// let empty: DynamicArray<u32> = DynamicArray::with_reserve(reserve(4));
/// assert_eq!((filled.len(), filled.capacity()), (4, 4));
/// assert_eq!((empty.len(), empty.capacity()), (0, 4));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Reserve {
    /// Number of slots to allocate up front.
    pub capacity: usize,
}

impl Reserve {
    /// Create a reserve request for `capacity` slots.
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

/// Shorthand for [`Reserve::new`].
pub const fn reserve(capacity: usize) -> Reserve {
    Reserve::new(capacity)
}

/// Capacity doubling rule applied when an append finds the array full.
///
/// An empty array jumps to [`INITIAL_CAPACITY`](Self::INITIAL_CAPACITY);
/// any other capacity is multiplied by [`GROWTH_FACTOR`](Self::GROWTH_FACTOR).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthPolicy;

impl GrowthPolicy {
    /// Capacity of the first allocation made by an append.
    pub const INITIAL_CAPACITY: usize = 2;

    /// Multiplier applied to a non-zero capacity.
    pub const GROWTH_FACTOR: usize = 2;

    /// Capacity to grow to from `capacity`.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if doubling overflows `usize`.
    #[inline]
    pub fn next_capacity(capacity: usize) -> usize {
        if capacity == 0 {
            Self::INITIAL_CAPACITY
        } else {
            capacity
                .checked_mul(Self::GROWTH_FACTOR)
                .unwrap_or_else(|| capacity_overflow())
        }
    }
}

#[cold]
#[track_caller]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
