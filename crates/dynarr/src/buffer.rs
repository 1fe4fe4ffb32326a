//! Exclusive-ownership heap storage for element slots.
//!
//! A [`Buffer`] owns zero or one contiguous heap block of
//! `MaybeUninit<T>` slots. It does not know which slots hold live values:
//! the owner (normally a [`DynamicArray`](crate::DynamicArray)) tracks
//! that and is responsible for dropping them. Dropping a buffer frees the
//! block but never runs element destructors.
//!
//! This module holds the raw pointer arithmetic for the crate. Every
//! `unsafe fn` documents the slot state it expects.

#![allow(unsafe_code)]

use std::fmt;
use std::mem::MaybeUninit;
use std::ops::{Index, IndexMut};
use std::ptr::{self, NonNull};

/// Sole owner of zero or one heap block of `T` slots.
///
/// Move-only: there is no `Clone`. Requesting zero slots never allocates,
/// so an empty buffer and a zero-slot buffer are the same state.
pub struct Buffer<T> {
    /// `None` when nothing is allocated. Never `Some` of an empty slice.
    block: Option<Box<[MaybeUninit<T>]>>,
}

impl<T> Buffer<T> {
    /// Create an empty buffer. Does not allocate.
    pub const fn new() -> Self {
        Self { block: None }
    }

    /// Allocate `slots` uninitialised slots.
    ///
    /// `slots == 0` performs no allocation.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the block size exceeds
    /// `isize::MAX` bytes. Allocation failure aborts through
    /// [`std::alloc::handle_alloc_error`].
    pub fn with_slots(slots: usize) -> Self {
        if slots == 0 {
            return Self::new();
        }
        Self {
            block: Some(Box::new_uninit_slice(slots)),
        }
    }

    /// Allocate `slots` slots, each initialised with `T::default()`.
    ///
    /// The caller takes responsibility for the `slots` live values: the
    /// buffer itself will not drop them.
    pub fn from_default(slots: usize) -> Self
    where
        T: Default,
    {
        let mut buffer = Self::with_slots(slots);
        if let Some(block) = buffer.block.as_deref_mut() {
            for slot in block {
                slot.write(T::default());
            }
        }
        buffer
    }

    /// Take ownership of an already allocated block.
    ///
    /// An empty block is discarded, leaving the buffer unallocated.
    pub fn from_boxed(block: Box<[MaybeUninit<T>]>) -> Self {
        if block.is_empty() {
            return Self::new();
        }
        Self { block: Some(block) }
    }

    /// Take ownership of a block from its raw parts.
    ///
    /// # Safety
    ///
    /// `ptr` and `slots` must describe a block previously produced by
    /// `Box<[MaybeUninit<T>]>` (for example via [`release`](Self::release)
    /// followed by [`Box::into_raw`]) that nothing else owns.
    pub unsafe fn from_raw(ptr: NonNull<MaybeUninit<T>>, slots: usize) -> Self {
        // SAFETY: the caller guarantees `ptr`/`slots` came from a boxed slice
        // of exactly `slots` elements and that ownership is being handed over.
        let block = unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), slots)) };
        Self::from_boxed(block)
    }

    /// Give up ownership of the block and hand it to the caller.
    ///
    /// The buffer is left empty. The block is not freed: it lives until the
    /// returned box is dropped or handed back with
    /// [`from_boxed`](Self::from_boxed). Live values in the block remain the
    /// caller's to drop.
    #[must_use = "dropping the released block frees it without dropping its values"]
    pub fn release(&mut self) -> Option<Box<[MaybeUninit<T>]>> {
        let block = self.block.take();
        if let Some(block) = &block {
            tracing::trace!(slots = block.len(), "released buffer block");
        }
        block
    }

    /// Move the block out into a new buffer, leaving this one empty.
    pub fn take(&mut self) -> Self {
        Self {
            block: self.block.take(),
        }
    }

    /// Whether a block is currently owned.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.block.is_some()
    }

    /// Number of slots in the owned block (0 when unallocated).
    #[inline]
    pub fn slots(&self) -> usize {
        self.block.as_ref().map_or(0, |block| block.len())
    }

    /// Address of the first slot, without transferring ownership.
    ///
    /// Dangling (but aligned and non-null) when nothing is allocated, so a
    /// null check cannot tell an empty buffer apart; use
    /// [`is_allocated`](Self::is_allocated) to test for ownership.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        match &self.block {
            Some(block) => block.as_ptr().cast(),
            None => NonNull::<T>::dangling().as_ptr().cast_const(),
        }
    }

    /// Mutable address of the first slot, without transferring ownership.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        match &mut self.block {
            Some(block) => block.as_mut_ptr().cast(),
            None => NonNull::<T>::dangling().as_ptr(),
        }
    }

    /// All slots as a slice of possibly-uninitialised values.
    #[inline]
    pub fn as_uninit_slice(&self) -> &[MaybeUninit<T>] {
        self.block.as_deref().unwrap_or(&[])
    }

    /// All slots as a mutable slice of possibly-uninitialised values.
    #[inline]
    pub fn as_uninit_slice_mut(&mut self) -> &mut [MaybeUninit<T>] {
        self.block.as_deref_mut().unwrap_or(&mut [])
    }

    /// Slot at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`slots`](Self::slots).
    #[inline]
    pub unsafe fn slot_unchecked(&self, index: usize) -> &MaybeUninit<T> {
        debug_assert!(index < self.slots(), "slot {index} out of {} slots", self.slots());
        // SAFETY: caller guarantees `index < slots`, so the block exists and
        // the offset stays inside it.
        unsafe { &*self.as_ptr().cast::<MaybeUninit<T>>().add(index) }
    }

    /// Mutable slot at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`slots`](Self::slots).
    #[inline]
    pub unsafe fn slot_unchecked_mut(&mut self, index: usize) -> &mut MaybeUninit<T> {
        debug_assert!(index < self.slots(), "slot {index} out of {} slots", self.slots());
        // SAFETY: as for `slot_unchecked`; `&mut self` makes the access unique.
        unsafe { &mut *self.as_mut_ptr().cast::<MaybeUninit<T>>().add(index) }
    }

    /// Exchange blocks with `other`. O(1), no element moves.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.block, &mut other.block);
    }
}

// Crate-internal raw slot operations. All indices are slot indices; none of
// these check bounds or track which slots are live.
impl<T> Buffer<T> {
    /// # Safety
    ///
    /// Slot `index` must be in bounds and hold a live value, which becomes
    /// logically uninitialised.
    #[inline]
    pub(crate) unsafe fn read(&self, index: usize) -> T {
        debug_assert!(index < self.slots());
        // SAFETY: caller guarantees the slot is in bounds and live.
        unsafe { ptr::read(self.as_ptr().add(index)) }
    }

    /// # Safety
    ///
    /// Slot `index` must be in bounds. Any live value there is overwritten
    /// without being dropped.
    #[inline]
    pub(crate) unsafe fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.slots());
        // SAFETY: caller guarantees the slot is in bounds.
        unsafe { ptr::write(self.as_mut_ptr().add(index), value) }
    }

    /// # Safety
    ///
    /// The first `len` slots must hold live values.
    #[inline]
    pub(crate) unsafe fn live(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.slots());
        // SAFETY: caller guarantees `[0, len)` is initialised; the pointer is
        // non-null and aligned even when `len == 0`.
        unsafe { std::slice::from_raw_parts(self.as_ptr(), len) }
    }

    /// # Safety
    ///
    /// The first `len` slots must hold live values.
    #[inline]
    pub(crate) unsafe fn live_mut(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.slots());
        // SAFETY: as for `live`; `&mut self` makes the slice unique.
        unsafe { std::slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }

    /// Move `count` values from `src` to `dst` inside this block. The ranges
    /// may overlap.
    ///
    /// # Safety
    ///
    /// Both ranges must be in bounds and the source range live. Afterwards
    /// the destination range is live; source slots outside it are
    /// logically uninitialised.
    #[inline]
    pub(crate) unsafe fn shift(&mut self, src: usize, dst: usize, count: usize) {
        debug_assert!(src.max(dst) + count <= self.slots());
        let base = self.as_mut_ptr();
        // SAFETY: caller guarantees both ranges are inside the block.
        unsafe { ptr::copy(base.add(src), base.add(dst), count) }
    }

    /// Move `count` values from `source[src..]` into `self[dst..]`.
    ///
    /// # Safety
    ///
    /// Both ranges must be in bounds and the source range live. The source
    /// slots become logically uninitialised.
    #[inline]
    pub(crate) unsafe fn migrate_from(&mut self, dst: usize, source: &Self, src: usize, count: usize) {
        debug_assert!(dst + count <= self.slots());
        debug_assert!(src + count <= source.slots());
        // SAFETY: distinct buffers never share a block, so the ranges cannot
        // overlap; bounds are the caller's guarantee.
        unsafe { ptr::copy_nonoverlapping(source.as_ptr().add(src), self.as_mut_ptr().add(dst), count) }
    }

    /// Drop the values in slots `[start, end)`.
    ///
    /// # Safety
    ///
    /// The range must be in bounds and live. It is logically uninitialised
    /// afterwards.
    #[inline]
    pub(crate) unsafe fn drop_range(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end && end <= self.slots());
        let base = self.as_mut_ptr();
        // SAFETY: caller guarantees `[start, end)` is live and in bounds.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), end - start)) }
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Buffer<T> {
    type Output = MaybeUninit<T>;

    /// # Panics
    ///
    /// Panics if `index >= self.slots()`.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_uninit_slice()[index]
    }
}

impl<T> IndexMut<usize> for Buffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_uninit_slice_mut()[index]
    }
}

impl<T> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("allocated", &self.is_allocated())
            .field("slots", &self.slots())
            .finish()
    }
}
