//! The growable array.
//!
//! [`DynamicArray`] owns one [`Buffer`] and tracks how many of its leading
//! slots are live (`len`) and how many exist (`capacity`). Mutators either
//! work in place when capacity suffices or allocate a fresh buffer, migrate
//! the live elements, and swap it in. Nothing about the array changes until
//! the fresh buffer exists, so a failed allocation leaves it untouched.

#![allow(unsafe_code)]

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

use crate::buffer::Buffer;
use crate::config::{GrowthPolicy, Reserve};
use crate::cursor::Cursor;
use crate::error::ArrayError;
use crate::iter::IntoIter;

/// A contiguous, growable, index-addressable sequence.
///
/// Invariants:
/// - `len <= capacity`, and `capacity` equals the buffer's slot count;
/// - slots `[0, len)` hold live values, slots `[len, capacity)` do not;
/// - `capacity == 0` means no heap block is owned.
///
/// Borrowing access (`iter`, slicing, `[i]`, `get`, sorting...) comes from
/// the `Deref<Target = [T]>` impl.
pub struct DynamicArray<T> {
    buf: Buffer<T>,
    len: usize,
    capacity: usize,
}

impl<T> DynamicArray<T> {
    /// Create an empty array. Does not allocate.
    pub const fn new() -> Self {
        Self {
            buf: Buffer::new(),
            len: 0,
            capacity: 0,
        }
    }

    /// Create an empty array with exactly `request.capacity` slots.
    pub fn with_reserve(request: Reserve) -> Self {
        Self {
            buf: Buffer::with_slots(request.capacity),
            len: 0,
            capacity: request.capacity,
        }
    }

    /// Create an array of `len` default values; `capacity == len`.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self {
            buf: Buffer::from_default(len),
            len,
            capacity: len,
        }
    }

    /// Create an array of `len` copies of `value`; `capacity == len`.
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut array = Self::with_reserve(Reserve::new(len));
        if len > 0 {
            for _ in 1..len {
                // SAFETY: at most `len - 1` pushes into `len` slots.
                unsafe { array.push_unchecked(value.clone()) };
            }
            // SAFETY: the final slot is still free.
            unsafe { array.push_unchecked(value) };
        }
        array
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the array has no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Heap bytes held by the backing buffer.
    pub fn memory_bytes(&self) -> usize {
        self.capacity * std::mem::size_of::<T>()
    }

    /// The live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is live by the type invariant.
        unsafe { self.buf.live(self.len) }
    }

    /// The live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `[0, len)` is live by the type invariant.
        unsafe { self.buf.live_mut(self.len) }
    }

    /// Element at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len). Checked only in debug
    /// builds.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {index} out of range for length {}", self.len);
        // SAFETY: caller guarantees `index < len`, so the slot is live.
        unsafe { &*self.buf.as_ptr().add(index) }
    }

    /// Mutable element at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len). Checked only in debug
    /// builds.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {index} out of range for length {}", self.len);
        // SAFETY: caller guarantees `index < len`; `&mut self` makes it unique.
        unsafe { &mut *self.buf.as_mut_ptr().add(index) }
    }

    /// Element at `index`, or [`ArrayError::OutOfRange`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// Mutable element at `index`, or [`ArrayError::OutOfRange`] if
    /// `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// Drop every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drop elements past `new_len`. No-op if `new_len >= len`. Capacity is
    /// unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let old_len = self.len;
        // Shrink first so a panicking destructor cannot cause a double drop.
        self.len = new_len;
        // SAFETY: `[new_len, old_len)` was live and is now outside the
        // tracked range.
        unsafe { self.buf.drop_range(new_len, old_len) };
    }

    /// Resize to `new_len`, padding with `T::default()`.
    ///
    /// Shrinking truncates without reallocating. Growing within capacity
    /// fills in place. Growing past capacity reallocates once to exactly
    /// `new_len` slots, then fills.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Resize to `new_len`, padding with values produced by `fill`.
    pub fn resize_with<F>(&mut self, new_len: usize, mut fill: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        if new_len > self.capacity {
            self.reallocate(new_len);
        }
        while self.len < new_len {
            // SAFETY: `len < new_len <= capacity`.
            unsafe { self.push_unchecked(fill()) };
        }
    }

    /// Ensure room for `new_capacity` elements in total.
    ///
    /// No-op if `new_capacity <= capacity`; otherwise allocates exactly
    /// `new_capacity` slots. `len` is unchanged.
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity {
            return;
        }
        self.reallocate(new_capacity);
    }

    /// Append `value`, doubling capacity first if the array is full.
    #[inline]
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity {
            self.grow();
        }
        // SAFETY: `grow` guarantees `len < capacity`.
        unsafe { self.push_unchecked(value) };
    }

    /// Append a clone of `value`.
    pub fn push_clone(&mut self, value: &T)
    where
        T: Clone,
    {
        self.push(value.clone());
    }

    /// Append clones of every element of `values`.
    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        for value in values {
            self.push(value.clone());
        }
    }

    /// Remove and return the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` was live and is now outside
        // the tracked range.
        Some(unsafe { self.buf.read(self.len) })
    }

    /// Insert `value` at `at`, shifting later elements right.
    ///
    /// Returns a cursor to the inserted element. When the array is full the
    /// fresh buffer gets the next capacity of the growth schedule and the
    /// value is placed between the migrated prefix and suffix.
    ///
    /// # Panics
    ///
    /// Panics if `at` is past [`end`](Self::end).
    pub fn insert(&mut self, at: Cursor, value: T) -> Cursor {
        let pos = at.offset();
        assert!(
            pos <= self.len,
            "insert position {pos} past end of array (len {})",
            self.len
        );
        let tail = self.len - pos;
        if self.len < self.capacity {
            // SAFETY: `[pos, len)` is live and `[pos + 1, len + 1)` fits in
            // capacity; the vacated slot at `pos` is then written.
            unsafe {
                self.buf.shift(pos, pos + 1, tail);
                self.buf.write(pos, value);
            }
        } else {
            let new_capacity = GrowthPolicy::next_capacity(self.capacity);
            let mut fresh = Buffer::with_slots(new_capacity);
            // SAFETY: `fresh` has `len + 1 <= new_capacity` slots; prefix and
            // suffix are live in the old buffer and land either side of `pos`.
            unsafe {
                fresh.migrate_from(0, &self.buf, 0, pos);
                fresh.write(pos, value);
                fresh.migrate_from(pos + 1, &self.buf, pos, tail);
            }
            self.buf.swap(&mut fresh);
            tracing::trace!(
                from = self.capacity,
                to = new_capacity,
                len = self.len + 1,
                "reallocated dynamic array on insert"
            );
            self.capacity = new_capacity;
        }
        self.len += 1;
        Cursor::new(pos)
    }

    /// Remove and return the element at `at`, shifting later elements left.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not a live element (for example [`end`](Self::end)).
    pub fn remove(&mut self, at: Cursor) -> T {
        let pos = at.offset();
        assert!(
            pos < self.len,
            "remove position {pos} is not a live element (len {})",
            self.len
        );
        // SAFETY: `pos` is live; after reading it the tail `[pos + 1, len)`
        // moves down one slot and the last slot leaves the tracked range.
        unsafe {
            let removed = self.buf.read(pos);
            self.buf.shift(pos + 1, pos, self.len - pos - 1);
            self.len -= 1;
            removed
        }
    }

    /// Drop the element at `at`, shifting later elements left.
    ///
    /// Returns a cursor at the same offset: the element that followed the
    /// erased one, or [`end`](Self::end) if it was the last.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not a live element.
    pub fn erase(&mut self, at: Cursor) -> Cursor {
        drop(self.remove(at));
        at
    }

    /// Exchange contents with `other`. O(1), no element moves.
    ///
    /// This shadows the slice method of the same name; to swap two elements
    /// use `a.as_mut_slice().swap(i, j)`.
    pub fn swap(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
        std::mem::swap(&mut self.len, &mut other.len);
        std::mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Move the contents out, leaving this array empty with no allocation.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Replace the contents with `source`'s, leaving `source` empty with no
    /// allocation. The previous contents of `self` are dropped.
    pub fn move_from(&mut self, source: &mut Self) {
        *self = source.take();
    }

    /// Cursor at the first element.
    #[inline]
    pub fn begin(&self) -> Cursor {
        Cursor::new(0)
    }

    /// Cursor one past the last element.
    #[inline]
    pub fn end(&self) -> Cursor {
        Cursor::new(self.len)
    }

    /// Cursor at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn cursor_at(&self, index: usize) -> Cursor {
        assert!(
            index <= self.len,
            "cursor index {index} past end of array (len {})",
            self.len
        );
        Cursor::new(index)
    }

    /// Element under `cursor`, or `None` at or past the end.
    pub fn get_at(&self, cursor: Cursor) -> Option<&T> {
        self.as_slice().get(cursor.offset())
    }

    /// Mutable element under `cursor`, or `None` at or past the end.
    pub fn get_at_mut(&mut self, cursor: Cursor) -> Option<&mut T> {
        self.as_mut_slice().get_mut(cursor.offset())
    }

    /// Write `value` into the first free slot.
    ///
    /// # Safety
    ///
    /// `len < capacity`.
    #[inline]
    unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.capacity);
        // SAFETY: caller guarantees the slot at `len` exists; it is free.
        unsafe { self.buf.write(self.len, value) };
        self.len += 1;
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) {
        self.reallocate(GrowthPolicy::next_capacity(self.capacity));
    }

    /// Move the live elements into a fresh buffer of `new_capacity` slots.
    fn reallocate(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.len);
        let mut fresh = Buffer::with_slots(new_capacity);
        // SAFETY: `[0, len)` is live in the old buffer and fits in `fresh`.
        // The old block is freed below without dropping the moved values.
        unsafe { fresh.migrate_from(0, &self.buf, 0, self.len) };
        self.buf.swap(&mut fresh);
        tracing::trace!(
            from = self.capacity,
            to = new_capacity,
            len = self.len,
            "reallocated dynamic array"
        );
        self.capacity = new_capacity;
    }

    /// Hand the buffer and live length to an owning iterator.
    pub(crate) fn into_parts(mut self) -> (Buffer<T>, usize) {
        let len = std::mem::take(&mut self.len);
        self.capacity = 0;
        (self.buf.take(), len)
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: `[0, len)` is live; the buffer frees the block afterwards.
        unsafe { self.buf.drop_range(0, self.len) };
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// Deep copy of the live elements; the copy's capacity equals its length.
    fn clone(&self) -> Self {
        Self::from(self.as_slice())
    }

    /// Copy into a temporary, then swap it in. If a clone panics part-way,
    /// `self` is left as it was.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> From<Reserve> for DynamicArray<T> {
    fn from(request: Reserve) -> Self {
        Self::with_reserve(request)
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(values: [T; N]) -> Self {
        let mut array = Self::with_reserve(Reserve::new(N));
        for value in values {
            // SAFETY: exactly `N` pushes into `N` slots.
            unsafe { array.push_unchecked(value) };
        }
        array
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(values: &[T]) -> Self {
        let mut array = Self::with_reserve(Reserve::new(values.len()));
        for value in values {
            // SAFETY: exactly `values.len()` pushes into as many slots.
            unsafe { array.push_unchecked(value.clone()) };
        }
        array
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(values: Vec<T>) -> Self {
        let mut array = Self::with_reserve(Reserve::new(values.len()));
        for value in values {
            // SAFETY: exactly `values.len()` pushes into as many slots.
            unsafe { array.push_unchecked(value) };
        }
        array
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut array = Self::with_reserve(Reserve::new(iter.size_hint().0));
        array.extend(iter);
        array
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for value in iter {
            self.push(*value);
        }
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let (buf, len) = self.into_parts();
        // SAFETY: `into_parts` hands over exactly the live prefix.
        unsafe { IntoIter::from_parts(buf, len) }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T, U> PartialEq<DynamicArray<U>> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &DynamicArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T, U, const N: usize> PartialEq<[U; N]> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U> PartialEq<[U]> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<&[U]> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialOrd> PartialOrd for DynamicArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for DynamicArray<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
