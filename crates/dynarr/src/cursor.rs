//! Position handles into a [`DynamicArray`](crate::DynamicArray).
//!
//! A [`Cursor`] is an offset in `[0, len]`. It records no provenance and
//! no generation, so it silently goes stale after any call that
//! reallocates or shifts elements. Using a stale cursor, or one taken from
//! another array, is a caller error: the array panics if the offset is out
//! of range and otherwise addresses whatever element now sits there.

use std::fmt;
use std::ops::Sub;

/// Offset of an element (or of the one-past-the-end position).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    offset: usize,
}

impl Cursor {
    /// Cursor at `offset`.
    pub const fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// The offset this cursor points at.
    #[inline]
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// The following position.
    #[inline]
    pub const fn next(self) -> Self {
        self.advance(1)
    }

    /// The preceding position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at offset 0.
    #[inline]
    pub const fn prev(self) -> Self {
        self.retreat(1)
    }

    /// The position `n` elements further on.
    ///
    /// # Panics
    ///
    /// Panics if the offset would overflow `usize`.
    #[inline]
    pub const fn advance(self, n: usize) -> Self {
        match self.offset.checked_add(n) {
            Some(offset) => Self::new(offset),
            None => panic!("cursor moved past the addressable range"),
        }
    }

    /// The position `n` elements back.
    ///
    /// # Panics
    ///
    /// Panics if that would move before offset 0.
    #[inline]
    pub const fn retreat(self, n: usize) -> Self {
        match self.offset.checked_sub(n) {
            Some(offset) => Self::new(offset),
            None => panic!("cursor moved before the first element"),
        }
    }
}

impl Sub for Cursor {
    type Output = usize;

    /// Distance from `rhs` forward to `self`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is after `self`.
    fn sub(self, rhs: Self) -> usize {
        self.offset
            .checked_sub(rhs.offset)
            .expect("cursor distance is negative")
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor({})", self.offset)
    }
}
