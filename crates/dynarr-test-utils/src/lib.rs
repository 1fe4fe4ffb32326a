//! Test utilities and instrumented element types for dynarr development.
//!
//! Provides a [`Ledger`] that counts clones and drops of the [`Tracked`]
//! values it hands out, a [`CloneBomb`] whose clone panics after a set
//! number of successes, and [`capacity_trace`] for checking the growth
//! schedule of a sequence of appends.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use dynarr::DynamicArray;

#[derive(Default)]
struct Counts {
    created: Cell<usize>,
    clones: Cell<usize>,
    drops: Cell<usize>,
}

/// Shared counters for a family of [`Tracked`] values.
///
/// Cheap to clone; all clones observe the same counts.
#[derive(Clone, Default)]
pub struct Ledger {
    counts: Rc<Counts>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracked value. Counts towards [`created`](Self::created).
    pub fn track(&self, value: i64) -> Tracked {
        self.counts.created.set(self.counts.created.get() + 1);
        Tracked {
            value,
            counts: Rc::clone(&self.counts),
        }
    }

    /// Values created with [`track`](Self::track).
    pub fn created(&self) -> usize {
        self.counts.created.get()
    }

    /// Calls to `Tracked::clone`.
    pub fn clones(&self) -> usize {
        self.counts.clones.get()
    }

    /// `Tracked` values dropped, originals and clones alike.
    pub fn drops(&self) -> usize {
        self.counts.drops.get()
    }

    /// Values created or cloned that have not been dropped yet.
    pub fn live(&self) -> usize {
        self.created() + self.clones() - self.drops()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("created", &self.created())
            .field("clones", &self.clones())
            .field("drops", &self.drops())
            .finish()
    }
}

/// An integer that reports its clones and drops to a [`Ledger`].
pub struct Tracked {
    value: i64,
    counts: Rc<Counts>,
}

impl Tracked {
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn set(&mut self, value: i64) {
        self.value = value;
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counts.clones.set(self.counts.clones.get() + 1);
        Self {
            value: self.value,
            counts: Rc::clone(&self.counts),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counts.drops.set(self.counts.drops.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<i64> for Tracked {
    fn eq(&self, other: &i64) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}

/// A value whose `clone` panics once a shared fuse runs out.
///
/// Every successful clone burns one unit of the fuse.
#[derive(Debug)]
pub struct CloneBomb {
    pub value: u32,
    fuse: Rc<Cell<usize>>,
}

impl CloneBomb {
    /// A family of bombs sharing one fuse of `clones_before_panic`.
    pub fn family(values: impl IntoIterator<Item = u32>, clones_before_panic: usize) -> Vec<Self> {
        let fuse = Rc::new(Cell::new(clones_before_panic));
        values
            .into_iter()
            .map(|value| Self {
                value,
                fuse: Rc::clone(&fuse),
            })
            .collect()
    }
}

impl Clone for CloneBomb {
    fn clone(&self) -> Self {
        let left = self.fuse.get();
        if left == 0 {
            panic!("CloneBomb detonated on value {}", self.value);
        }
        self.fuse.set(left - 1);
        Self {
            value: self.value,
            fuse: Rc::clone(&self.fuse),
        }
    }
}

impl PartialEq for CloneBomb {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Push `0..n` into an empty array, recording the capacity after every
/// reallocation.
///
/// The result is the sequence of distinct capacities observed, which for
/// the doubling schedule is `[2, 4, 8, ...]`.
pub fn capacity_trace(n: usize) -> Vec<usize> {
    let mut array = DynamicArray::new();
    let mut trace = Vec::new();
    for i in 0..n {
        let before = array.capacity();
        array.push(i);
        if array.capacity() != before {
            trace.push(array.capacity());
        }
    }
    trace
}
