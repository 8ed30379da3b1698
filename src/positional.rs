//! Array-backed collection where items carry their own position.
//!
//! [`SlotArray`] offers the same external contract as
//! [`KeyedArray`](crate::KeyedArray) but stores the position *inside* each
//! item as a [`Slot`](crate::Slot) token instead of in a side map. The
//! trade: no hash map (no hashing, no separate allocation), against the
//! requirement that the element type implements [`Slotted`] and that an
//! item belongs to at most one slot array at a time (the token is singular
//! per item).
//!
//! Every operation that shifts elements walks exactly the shifted span
//! once, rewriting each item's stored token. The cost profile matches the
//! keyed collection's range re-sync, written onto the items instead of a
//! table.
//!
//! # Example
//!
//! ```
//! use slotkit::{Slot, SlotArray, Slotted};
//!
//! struct Layer {
//!     name: &'static str,
//!     slot: Slot,
//! }
//!
//! impl Layer {
//!     fn new(name: &'static str) -> Self {
//!         Self { name, slot: Slot::NONE }
//!     }
//! }
//!
//! impl Slotted for Layer {
//!     fn slot(&self) -> Slot { self.slot }
//!     fn set_slot(&mut self, slot: Slot) { self.slot = slot; }
//! }
//!
//! let mut layers: SlotArray<Layer> = SlotArray::new();
//! layers.try_push(Layer::new("background")).ok();
//! layers.try_push(Layer::new("sprites")).ok();
//!
//! // Each item knows where it lives.
//! assert_eq!(layers.get(1).unwrap().slot.index(), Some(1));
//!
//! // Removal hands the item back with its token cleared.
//! let gone = layers.remove(0).unwrap();
//! assert!(gone.slot.is_none());
//! assert_eq!(layers.get(0).unwrap().slot.index(), Some(0));
//! ```

use core::cmp;
use core::ops::Index;
use core::slice;

use crate::dynamic::DynamicArray;
use crate::seq::{Sequence, SequenceMut};
use crate::slot::{Slot, Slotted};

/// Error returned when an item's slot token is already occupied.
///
/// Carries the rejected item so the caller can recover it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyOwned<T>(
    /// The item that could not be added.
    pub T,
);

impl<T> AlreadyOwned<T> {
    /// Returns the item that could not be added.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::fmt::Display for AlreadyOwned<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "item's slot is already occupied")
    }
}

impl<T: core::fmt::Debug> std::error::Error for AlreadyOwned<T> {}

/// Array-backed collection that stores each item's position on the item.
///
/// Invariant: for every live item at index `i`, `item.slot()` is
/// `Slot::from_index(i)`; an item outside any slot array carries
/// `Slot::NONE`.
pub struct SlotArray<T: Slotted> {
    items: DynamicArray<T>,
}

impl<T: Slotted> SlotArray<T> {
    /// Creates an empty collection with the default capacity.
    pub fn new() -> Self {
        Self {
            items: DynamicArray::new(),
        }
    }

    /// Creates an empty collection with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: DynamicArray::with_capacity(capacity),
        }
    }

    /// Returns the number of live items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the collection holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the backing array's capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Returns the backing array's growth increment.
    #[inline]
    pub fn resize_unit(&self) -> usize {
        self.items.resize_unit()
    }

    /// Sets the backing array's growth increment. `0` restores doubling.
    #[inline]
    pub fn set_resize_unit(&mut self, unit: usize) {
        self.items.set_resize_unit(unit);
    }

    /// Appends an item, stamping its slot token.
    ///
    /// An item whose token is already occupied belongs to a slot array and
    /// is rejected without touching state; it rides back in the error.
    pub fn try_push(&mut self, mut item: T) -> Result<usize, AlreadyOwned<T>> {
        if item.slot().is_some() {
            return Err(AlreadyOwned(item));
        }
        let at = self.items.len();
        item.set_slot(Slot::from_index(at));
        self.items.push(item);
        Ok(at)
    }

    /// Appends an item; `false` when its token is already occupied.
    ///
    /// Convenience wrapper over [`try_push`](Self::try_push) that drops the
    /// rejected item.
    #[inline]
    pub fn push(&mut self, item: T) -> bool {
        self.try_push(item).is_ok()
    }

    /// Inserts an item at `at`, shifting the tail right by one.
    ///
    /// The inserted item and every shifted item get their tokens
    /// rewritten in one forward walk. `Err` when the token is occupied or
    /// `at > len`; the error type is named for the token case, but an
    /// out-of-range `at` hands the item back in the same envelope.
    pub fn try_insert(&mut self, at: usize, item: T) -> Result<usize, AlreadyOwned<T>> {
        if item.slot().is_some() || at > self.items.len() {
            return Err(AlreadyOwned(item));
        }
        self.items.insert(at, item);
        self.restamp(at..self.items.len());
        Ok(at)
    }

    /// Appends a batch, keeping only items whose token is unoccupied.
    ///
    /// Returns the number of items actually added.
    pub fn extend_free<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let count_before = self.items.len();
        self.items
            .extend_exact(items.into_iter().filter(|item| item.slot().is_none()));
        let added = self.items.len() - count_before;
        self.restamp(count_before..self.items.len());
        added
    }

    /// Removes and returns the item at `index`.
    ///
    /// The removed item leaves with its token reset to [`Slot::NONE`];
    /// the tail is walked once, each stored token dropping by one.
    /// `None` without touching state when `index` is not live.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let mut item = self.items.remove(index)?;
        item.set_slot(Slot::NONE);
        self.restamp(index..self.items.len());
        Some(item)
    }

    /// Removes the item a slot token points at.
    ///
    /// `None` when the token is [`Slot::NONE`] or out of the live range.
    pub fn remove_slot(&mut self, slot: Slot) -> Option<T> {
        self.remove(slot.index()?)
    }

    /// Returns `true` if the item's token points back at this exact item
    /// in this array.
    ///
    /// An item held by a different slot array can carry a token whose
    /// index happens to fall inside this array's live range, so the check
    /// verifies identity at the slot, not just the range.
    pub fn owns(&self, item: &T) -> bool {
        match item.slot().index() {
            Some(i) => self
                .items
                .get(i)
                .is_some_and(|occupant| core::ptr::eq(occupant, item)),
            None => false,
        }
    }

    /// Returns the item at `index`, if live.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns the item at `index`, mutably.
    ///
    /// The caller must not rewrite the item's slot token through this
    /// reference; the token belongs to the collection.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Returns the item a slot token points at.
    #[inline]
    pub fn get_by_slot(&self, slot: Slot) -> Option<&T> {
        self.items.get(slot.index()?)
    }

    /// Returns the item a slot token points at, mutably.
    #[inline]
    pub fn get_by_slot_mut(&mut self, slot: Slot) -> Option<&mut T> {
        self.items.get_mut(slot.index()?)
    }

    /// Exchanges the items at `i` and `j`, rewriting both tokens.
    ///
    /// Returns `false` without touching state when either index is not
    /// live.
    pub fn swap_indices(&mut self, i: usize, j: usize) -> bool {
        let len = self.items.len();
        if i >= len || j >= len {
            return false;
        }
        if i != j {
            self.items.swap_indices(i, j);
            self.items[i].set_slot(Slot::from_index(i));
            self.items[j].set_slot(Slot::from_index(j));
        }
        true
    }

    /// Moves the item at `old` to `new`, rotating the span between them.
    ///
    /// Every token in `[min, max]` is rewritten. Returns `false` without
    /// touching state when either index is not live.
    pub fn relocate_index(&mut self, old: usize, new: usize) -> bool {
        let len = self.items.len();
        if old >= len || new >= len {
            return false;
        }
        self.items.relocate_index(old, new);
        let (lo, hi) = (cmp::min(old, new), cmp::max(old, new));
        self.restamp(lo..hi + 1);
        true
    }

    /// Replaces the item at `at`, returning the previous item.
    ///
    /// The outgoing item leaves with its token cleared; the incoming one
    /// is stamped with the slot. `Err` returns the offered item untouched
    /// when its token is occupied or `at` is not live.
    pub fn replace(&mut self, at: usize, mut item: T) -> Result<T, T> {
        if item.slot().is_some() || at >= self.items.len() {
            return Err(item);
        }
        item.set_slot(Slot::from_index(at));
        match self.items.replace(at, item) {
            Ok(mut old) => {
                old.set_slot(Slot::NONE);
                Ok(old)
            }
            Err(item) => Err(item),
        }
    }

    /// Returns an iterator over the live items in index order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the live items as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Drops every item, clearing each token first. Idempotent.
    ///
    /// Tokens are reset before storage is touched so a pooled item
    /// observed mid-drop never carries a stale position.
    pub fn clear(&mut self) {
        for item in self.items.iter_mut() {
            item.set_slot(Slot::NONE);
        }
        self.items.clear();
    }

    /// Clears every token and discards the backing buffer entirely.
    pub fn reset(&mut self) {
        self.clear();
        self.items.reset();
    }

    /// Shrinks the backing array to exactly `len`.
    #[inline]
    pub fn trim(&mut self) {
        self.items.trim();
    }

    /// Rewrites the slot token of every item in `range` to its index.
    fn restamp(&mut self, range: core::ops::Range<usize>) {
        for i in range {
            self.items[i].set_slot(Slot::from_index(i));
        }
    }
}

impl<T: Slotted> Default for SlotArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Slotted> Index<usize> for SlotArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T: Slotted + core::fmt::Debug> core::fmt::Debug for SlotArray<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T: Slotted> IntoIterator for &'a SlotArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Slotted> Sequence for SlotArray<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

impl<T: Slotted> SequenceMut for SlotArray<T> {
    #[inline]
    fn push_item(&mut self, item: T) -> Result<usize, T> {
        self.try_push(item).map_err(AlreadyOwned::into_inner)
    }

    #[inline]
    fn insert_item(&mut self, at: usize, item: T) -> Result<usize, T> {
        self.try_insert(at, item).map_err(AlreadyOwned::into_inner)
    }

    #[inline]
    fn replace_item(&mut self, at: usize, item: T) -> Result<T, T> {
        self.replace(at, item)
    }

    #[inline]
    fn swap_item(&mut self, i: usize, j: usize) -> bool {
        self.swap_indices(i, j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Node {
        value: u32,
        slot: Slot,
    }

    impl Node {
        fn new(value: u32) -> Self {
            Self {
                value,
                slot: Slot::NONE,
            }
        }
    }

    impl Slotted for Node {
        fn slot(&self) -> Slot {
            self.slot
        }

        fn set_slot(&mut self, slot: Slot) {
            self.slot = slot;
        }
    }

    /// Asserts the slot-sync invariant over every live item.
    fn assert_stamped(c: &SlotArray<Node>) {
        for (i, item) in c.iter().enumerate() {
            assert_eq!(item.slot().index(), Some(i), "slot desync at {i}");
        }
    }

    #[test]
    fn push_stamps_the_slot() {
        let mut c: SlotArray<Node> = SlotArray::new();
        let at = c.try_push(Node::new(7)).unwrap();
        assert_eq!(at, 0);
        assert_eq!(c.get(0).unwrap().slot.index(), Some(0));
        assert_stamped(&c);
    }

    #[test]
    fn occupied_token_is_rejected_with_the_item() {
        let mut c: SlotArray<Node> = SlotArray::new();
        let mut stray = Node::new(1);
        stray.set_slot(Slot::from_index(5));

        let err = c.try_push(stray).unwrap_err();
        assert_eq!(err.into_inner().value, 1);
        assert!(c.is_empty());
    }

    #[test]
    fn remove_clears_the_token_and_walks_the_tail() {
        let mut c: SlotArray<Node> = SlotArray::new();
        for v in [1, 2, 3, 4] {
            c.try_push(Node::new(v)).unwrap();
        }

        let gone = c.remove(1).unwrap();
        assert_eq!(gone.value, 2);
        assert!(gone.slot.is_none());
        assert_eq!(c.len(), 3);
        assert_stamped(&c);
    }

    #[test]
    fn remove_by_slot_token() {
        let mut c: SlotArray<Node> = SlotArray::new();
        c.try_push(Node::new(1)).unwrap();
        c.try_push(Node::new(2)).unwrap();

        let token = c.get(1).unwrap().slot;
        let gone = c.remove_slot(token).unwrap();
        assert_eq!(gone.value, 2);

        assert!(c.remove_slot(Slot::NONE).is_none());
        assert_stamped(&c);
    }

    #[test]
    fn insert_restamps_the_shifted_tail() {
        let mut c: SlotArray<Node> = SlotArray::new();
        c.try_push(Node::new(1)).unwrap();
        c.try_push(Node::new(3)).unwrap();

        c.try_insert(1, Node::new(2)).unwrap();
        let values: Vec<_> = c.iter().map(|n| n.value).collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert_stamped(&c);
    }

    #[test]
    fn insert_out_of_range_hands_the_item_back() {
        let mut c: SlotArray<Node> = SlotArray::new();
        c.try_push(Node::new(1)).unwrap();

        let back = c.try_insert(5, Node::new(2)).unwrap_err();
        assert_eq!(back.into_inner().value, 2);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn swap_rewrites_both_tokens() {
        let mut c: SlotArray<Node> = SlotArray::new();
        for v in [1, 2, 3] {
            c.try_push(Node::new(v)).unwrap();
        }

        assert!(c.swap_indices(0, 2));
        let values: Vec<_> = c.iter().map(|n| n.value).collect();
        assert_eq!(values, vec![3, 2, 1]);
        assert_stamped(&c);

        assert!(!c.swap_indices(0, 9));
    }

    #[test]
    fn relocate_restamps_the_span() {
        let mut c: SlotArray<Node> = SlotArray::new();
        for v in [10, 20, 30, 40] {
            c.try_push(Node::new(v)).unwrap();
        }

        assert!(c.relocate_index(0, 2));
        let values: Vec<_> = c.iter().map(|n| n.value).collect();
        assert_eq!(values, vec![20, 30, 10, 40]);
        assert_stamped(&c);
    }

    #[test]
    fn replace_moves_the_token_across() {
        let mut c: SlotArray<Node> = SlotArray::new();
        c.try_push(Node::new(1)).unwrap();

        let old = c.replace(0, Node::new(9)).unwrap();
        assert!(old.slot.is_none());
        assert_eq!(c.get(0).unwrap().value, 9);
        assert_stamped(&c);

        // Out of range hands the item back.
        let back = c.replace(5, Node::new(7)).unwrap_err();
        assert_eq!(back.value, 7);
        assert!(back.slot.is_none());
    }

    #[test]
    fn extend_free_skips_owned_items() {
        let mut c: SlotArray<Node> = SlotArray::new();
        let mut stray = Node::new(99);
        stray.set_slot(Slot::from_index(3));

        let added = c.extend_free([Node::new(1), stray, Node::new(2)]);
        assert_eq!(added, 2);
        let values: Vec<_> = c.iter().map(|n| n.value).collect();
        assert_eq!(values, vec![1, 2]);
        assert_stamped(&c);
    }

    #[test]
    fn owns_checks_identity_at_the_slot() {
        let mut c: SlotArray<Node> = SlotArray::new();
        c.try_push(Node::new(1)).unwrap();

        let free = Node::new(2);
        assert!(!c.owns(&free));
        assert!(c.owns(c.get(0).unwrap()));
    }

    #[test]
    fn owns_rejects_items_held_by_another_array() {
        let mut a: SlotArray<Node> = SlotArray::new();
        let mut b: SlotArray<Node> = SlotArray::new();
        for v in [1, 2, 3] {
            a.try_push(Node::new(v)).unwrap();
            b.try_push(Node::new(v + 10)).unwrap();
        }

        // Every index of `a` is live in `b` too; the token alone cannot
        // distinguish the owners.
        let foreign = a.get(2).unwrap();
        assert!(a.owns(foreign));
        assert!(!b.owns(foreign));
    }

    #[test]
    fn clear_resets_tokens_before_dropping() {
        // An item removed just before clear keeps NONE; items dropped by
        // clear had their tokens reset first (observable through a pool).
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Pooled {
            seen: Rc<RefCell<Vec<Slot>>>,
            slot: Slot,
        }

        impl Slotted for Pooled {
            fn slot(&self) -> Slot {
                self.slot
            }
            fn set_slot(&mut self, slot: Slot) {
                self.slot = slot;
            }
        }

        impl Drop for Pooled {
            fn drop(&mut self) {
                self.seen.borrow_mut().push(self.slot);
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut c: SlotArray<Pooled> = SlotArray::new();
        for _ in 0..3 {
            c.try_push(Pooled {
                seen: Rc::clone(&seen),
                slot: Slot::NONE,
            })
            .ok();
        }

        c.clear();
        assert_eq!(c.len(), 0);
        assert!(seen.borrow().iter().all(|s| s.is_none()));

        c.clear(); // idempotent
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn reset_discards_the_buffer() {
        let mut c: SlotArray<Node> = SlotArray::new();
        c.try_push(Node::new(1)).unwrap();

        c.reset();
        assert_eq!(c.len(), 0);
        assert_eq!(c.capacity(), 0);

        c.try_push(Node::new(2)).unwrap();
        assert_stamped(&c);
    }
}
