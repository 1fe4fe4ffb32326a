//! Integration test: element lifetimes, copies, moves and panic safety.
//!
//! Uses `Tracked` values to verify that every element is dropped exactly
//! once on every removal path, that copies are deep and counted, and that
//! a clone panicking part-way leaves the original untouched.

use std::panic::{catch_unwind, AssertUnwindSafe};

use dynarr::{dynarr, reserve, Buffer, DynamicArray};
use dynarr_test_utils::{CloneBomb, Ledger, Tracked};

fn tracked_array(ledger: &Ledger, values: impl IntoIterator<Item = i64>) -> DynamicArray<Tracked> {
    values.into_iter().map(|v| ledger.track(v)).collect()
}

// ── Drops ────────────────────────────────────────────────────────────

#[test]
fn dropping_array_drops_each_element_once() {
    let ledger = Ledger::new();
    let a = tracked_array(&ledger, 0..10);
    assert_eq!(ledger.live(), 10);
    drop(a);
    assert_eq!(ledger.drops(), 10);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn reallocation_moves_without_dropping() {
    let ledger = Ledger::new();
    let mut a = DynamicArray::new();
    for i in 0..33 {
        a.push(ledger.track(i));
    }
    assert_eq!(ledger.drops(), 0, "migration must not drop moved elements");
    assert_eq!(ledger.clones(), 0, "migration must not clone");
    drop(a);
    assert_eq!(ledger.drops(), 33);
}

#[test]
fn every_removal_path_drops_exactly_once() {
    let ledger = Ledger::new();
    let mut a = tracked_array(&ledger, 0..12);

    let popped = a.pop().unwrap();
    assert_eq!(popped, 11);
    drop(popped);
    assert_eq!(ledger.drops(), 1);

    a.erase(a.cursor_at(3));
    assert_eq!(ledger.drops(), 2);

    a.truncate(8);
    assert_eq!(ledger.drops(), 4);

    a.resize_with(5, || unreachable!());
    assert_eq!(ledger.drops(), 7);

    a.clear();
    assert_eq!(ledger.drops(), 12);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn partially_consumed_into_iter_drops_remainder() {
    let ledger = Ledger::new();
    let mut it = tracked_array(&ledger, 0..6).into_iter();
    let first = it.next().unwrap();
    let last = it.next_back().unwrap();
    assert_eq!((first.value(), last.value()), (0, 5));
    drop(it);
    assert_eq!(ledger.drops(), 4);
    drop((first, last));
    assert_eq!(ledger.live(), 0);
}

#[test]
fn insert_on_full_array_keeps_every_element() {
    let ledger = Ledger::new();
    let mut a = tracked_array(&ledger, [1, 2, 4]);
    assert_eq!(a.len(), a.capacity());
    a.insert(a.cursor_at(2), ledger.track(3));
    assert_eq!(a, [1i64, 2, 3, 4]);
    assert_eq!(ledger.drops(), 0);
    drop(a);
    assert_eq!(ledger.live(), 0);
}

// ── Copies ───────────────────────────────────────────────────────────

#[test]
fn clone_copies_exactly_len_elements() {
    let ledger = Ledger::new();
    let mut a = DynamicArray::with_reserve(reserve(32));
    for i in 0..5 {
        a.push(ledger.track(i));
    }
    let copy = a.clone();
    assert_eq!(ledger.clones(), 5);
    assert_eq!(copy.capacity(), 5);
    assert_eq!(copy, a);
}

#[test]
fn copies_are_independent() {
    let ledger = Ledger::new();
    let a = tracked_array(&ledger, [1, 2, 3]);
    let mut b = a.clone();
    b[0].set(100);
    b.push(ledger.track(4));
    assert_eq!(a, [1i64, 2, 3]);
    assert_eq!(b, [100i64, 2, 3, 4]);

    let mut c = DynamicArray::new();
    c.clone_from(&b);
    c.pop();
    assert_eq!(b.len(), 4);
    assert_eq!(c.len(), 3);
}

#[test]
fn panicking_clone_leaves_target_untouched() {
    let source: DynamicArray<CloneBomb> = CloneBomb::family(0..5, 3).into();
    let mut target: DynamicArray<CloneBomb> = CloneBomb::family([42, 43], 0).into();

    let result = catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));
    assert!(result.is_err(), "fourth clone should detonate");
    assert_eq!(target.len(), 2);
    assert_eq!(target[0].value, 42);
    assert_eq!(target[1].value, 43);
}

#[test]
fn panicking_clone_during_push_clone_keeps_array() {
    let bombs = CloneBomb::family([7], 0);
    let mut a: DynamicArray<CloneBomb> = DynamicArray::new();
    let result = catch_unwind(AssertUnwindSafe(|| a.push_clone(&bombs[0])));
    assert!(result.is_err());
    assert!(a.is_empty());
    assert_eq!(a.capacity(), 0);
}

// ── Moves ────────────────────────────────────────────────────────────

#[test]
fn take_leaves_source_valid_empty() {
    let ledger = Ledger::new();
    let mut a = tracked_array(&ledger, [1, 2, 3]);
    let b = a.take();
    assert_eq!((a.len(), a.capacity()), (0, 0));
    assert_eq!(b, [1i64, 2, 3]);
    assert_eq!(ledger.clones(), 0);
    a.push(ledger.track(9));
    assert_eq!(a, [9i64]);
}

#[test]
fn move_from_drops_old_target_contents() {
    let ledger = Ledger::new();
    let mut target = tracked_array(&ledger, [1, 2]);
    let mut source = tracked_array(&ledger, [3, 4, 5]);
    target.move_from(&mut source);
    assert_eq!(ledger.drops(), 2);
    assert_eq!(target, [3i64, 4, 5]);
    assert!(source.is_empty());
    assert_eq!(source.capacity(), 0);
}

#[test]
fn rust_move_keeps_elements_in_order() {
    let a = dynarr![String::from("x"), String::from("y")];
    let moved = a;
    assert_eq!(moved, ["x", "y"]);
}

// ── Buffer release ───────────────────────────────────────────────────

#[test]
fn released_block_can_be_adopted_by_new_owner() {
    let mut buf: Buffer<u32> = Buffer::with_slots(4);
    buf[0].write(5);
    let block = buf.release().expect("allocated");
    assert!(!buf.is_allocated());

    let adopted = Buffer::from_boxed(block);
    assert!(adopted.is_allocated());
    assert_eq!(adopted.slots(), 4);
    // SAFETY: slot 0 was written before the release.
    assert_eq!(unsafe { adopted[0].assume_init_read() }, 5);
}
