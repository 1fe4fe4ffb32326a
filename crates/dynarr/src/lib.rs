//! Growable contiguous array built on an exclusive-ownership heap buffer.
//!
//! Two layers, leaves first:
//!
//! ```text
//! DynamicArray<T> (size, capacity, growth, cursors, comparisons)
//! └── Buffer<T> (zero or one heap block of MaybeUninit<T> slots)
//! ```
//!
//! The array never hands its buffer to callers. Every operation that
//! changes capacity builds a fresh [`Buffer`], migrates the live elements
//! into it and swaps it in, so the array either fully advances or is left
//! exactly as it was.
//!
//! # Growth
//!
//! Capacity doubles when exhausted (`0 -> 2 -> 4 -> 8 ...`, see
//! [`GrowthPolicy`]), so `N` appends from empty cost `O(N)` in total and
//! trigger `O(log N)` reallocations.
//!
//! # Cursors
//!
//! A [`Cursor`] is a plain offset. It is valid only until the next call
//! that reallocates or shifts elements (`push` past capacity, `insert`,
//! `erase`, `reserve`, growing `resize`). Nothing detects a stale cursor.
//!
//! # Unsafe code
//!
//! The crate denies `unsafe_code` at the root. Only `buffer` (raw slot
//! storage), `array` and `iter` (which track which slots are live) opt
//! back in, and every block carries a `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod buffer;
pub mod config;
pub mod cursor;
pub mod error;
pub mod iter;

pub use array::DynamicArray;
pub use buffer::Buffer;
pub use config::{reserve, GrowthPolicy, Reserve};
pub use cursor::Cursor;
pub use error::ArrayError;
pub use iter::IntoIter;

/// Build a [`DynamicArray`] from a list of values, like `vec!`.
///
/// `dynarr![a, b, c]` moves the listed values in (capacity equals the
/// number of values). `dynarr![value; n]` repeats a cloneable value.
///
/// ```
/// use dynarr::dynarr;
///
/// let a = dynarr![1, 2, 3];
/// assert_eq!(a.len(), 3);
/// assert_eq!(a.capacity(), 3);
///
/// let b = dynarr!["x"; 4];
/// assert_eq!(b, ["x", "x", "x", "x"]);
/// ```
#[macro_export]
macro_rules! dynarr {
    () => {
        $crate::DynamicArray::new()
    };
    ($value:expr; $n:expr) => {
        $crate::DynamicArray::from_elem($n, $value)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($value),+])
    };
}
