//! Owning iteration over a [`DynamicArray`](crate::DynamicArray).

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;

use crate::buffer::Buffer;

/// By-value iterator produced by `DynamicArray::into_iter`.
///
/// Owns the array's buffer. Slots in `[front, back)` are still live;
/// whatever has not been yielded is dropped with the iterator.
pub struct IntoIter<T> {
    buf: Buffer<T>,
    front: usize,
    back: usize,
}

impl<T> IntoIter<T> {
    /// # Safety
    ///
    /// The first `len` slots of `buf` must hold live values and nothing
    /// else may drop them.
    pub(crate) unsafe fn from_parts(buf: Buffer<T>, len: usize) -> Self {
        debug_assert!(len <= buf.slots());
        Self {
            buf,
            front: 0,
            back: len,
        }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[front, back)` is live and inside the block.
        unsafe {
            std::slice::from_raw_parts(self.buf.as_ptr().add(self.front), self.back - self.front)
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        // SAFETY: `index` was inside `[front, back)` and has just left it.
        Some(unsafe { self.buf.read(index) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: the old `back - 1` was live and has just left the range.
        Some(unsafe { self.buf.read(self.back) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let (front, back) = (self.front, self.back);
        self.front = back;
        // SAFETY: `[front, back)` held the unyielded values.
        unsafe { self.buf.drop_range(front, back) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
