//! Array-backed collection with O(1) lookup by a derived key.
//!
//! [`KeyedArray`] keeps a [`DynamicArray`] of items next to a hash map from
//! each item's derived key to its current index. Every structural operation
//! re-synchronizes exactly the index range it disturbed:
//!
//! | Operation | Elements whose index changes | Re-sync cost |
//! |-----------|------------------------------|--------------|
//! | `try_push` | none | O(1) map insert |
//! | `remove_at` / `remove_by_key` | tail after the removal point | O(tail) |
//! | `try_insert` | inserted element and tail | O(tail) |
//! | `relocate_index` | span between old and new | O(span) |
//! | `swap_indices` | exactly two | O(1), two map writes |
//! | `extend_unique` | spliced range | O(batch) |
//!
//! Centralizing the re-sync in one private routine is the point of this
//! design: a structural change that shifts more than two elements must walk
//! the shifted range, and nothing else.
//!
//! # Example
//!
//! ```
//! use slotkit::{Keyed, KeyedArray};
//!
//! struct Entry {
//!     name: &'static str,
//!     value: u32,
//! }
//!
//! impl Keyed for Entry {
//!     type Key = &'static str;
//!     fn key(&self) -> &'static str { self.name }
//! }
//!
//! let mut entries: KeyedArray<Entry> = KeyedArray::new();
//! entries.push(Entry { name: "a", value: 1 });
//! entries.push(Entry { name: "b", value: 2 });
//!
//! entries.remove_by_key(&"a");
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries.get(&"b").unwrap().value, 2);
//! assert_eq!(entries.index_of_key(&"a"), None);
//! ```

use core::cmp;
use core::hash::Hash;
use core::ops::{Index, Range};
use core::slice;

use hashbrown::HashMap;

use crate::dynamic::DynamicArray;
use crate::seq::{Sequence, SequenceMut};

/// Capability for items that derive an associative key from themselves.
///
/// The key must be stable while the item is stored: changing a live item's
/// key through [`KeyedArray::get_mut`] desynchronizes the index and is a
/// caller contract violation.
pub trait Keyed {
    /// The derived key type.
    type Key: Eq + Hash + Clone;

    /// Returns the item's key.
    fn key(&self) -> Self::Key;
}

/// Error returned when an add would duplicate a live key.
///
/// Carries the rejected item so the caller can recover it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateKey<T>(
    /// The item that could not be added.
    pub T,
);

impl<T> DuplicateKey<T> {
    /// Returns the item that could not be added.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::fmt::Display for DuplicateKey<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "key is already present")
    }
}

impl<T: core::fmt::Debug> std::error::Error for DuplicateKey<T> {}

/// Array-backed collection with a key→index map kept in sync.
///
/// Keys are unique. Positional access, iteration and export all delegate
/// to the backing [`DynamicArray`]; associative access goes through the
/// map in O(1).
pub struct KeyedArray<T: Keyed> {
    items: DynamicArray<T>,
    index: HashMap<T::Key, usize>,
}

impl<T: Keyed> KeyedArray<T> {
    /// Creates an empty collection with the default capacity.
    pub fn new() -> Self {
        Self {
            items: DynamicArray::new(),
            index: HashMap::new(),
        }
    }

    /// Creates an empty collection sized for `capacity` items.
    ///
    /// The backing array allocates `capacity * 2` slots up front to push
    /// the first resize past the expected fill.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: DynamicArray::with_capacity(capacity * 2),
            index: HashMap::with_capacity(capacity),
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

    /// Appends an item, indexing it by its key.
    ///
    /// Returns `Err` without touching state when the key is already live;
    /// the rejected item rides back in the error.
    pub fn try_push(&mut self, item: T) -> Result<usize, DuplicateKey<T>> {
        let key = item.key();
        if self.index.contains_key(&key) {
            return Err(DuplicateKey(item));
        }
        let at = self.items.len();
        self.items.push(item);
        self.index.insert(key, at);
        Ok(at)
    }

    /// Appends an item; `false` when the key is already live.
    ///
    /// Convenience wrapper over [`try_push`](Self::try_push) that drops the
    /// rejected item.
    #[inline]
    pub fn push(&mut self, item: T) -> bool {
        self.try_push(item).is_ok()
    }

    /// Inserts an item at `at`, shifting the tail right by one.
    ///
    /// Returns `Err` when the key is already live or `at > len`; the
    /// error type is named for the key case, but an out-of-range `at`
    /// hands the item back in the same envelope. The shifted tail is
    /// re-synced.
    pub fn try_insert(&mut self, at: usize, item: T) -> Result<usize, DuplicateKey<T>> {
        if at > self.items.len() || self.index.contains_key(&item.key()) {
            return Err(DuplicateKey(item));
        }
        self.items.insert(at, item);
        self.sync_indices(at..self.items.len());
        Ok(at)
    }

    /// Appends a batch, keeping only items whose key is not already live.
    ///
    /// Duplicates against the collection and against earlier items of the
    /// same batch are dropped (earlier items win). Returns the number of
    /// items actually added. The spliced range is re-synced once at the
    /// end.
    pub fn extend_unique<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let count_before = self.items.len();
        let mut fresh = Vec::new();
        for item in items {
            let key = item.key();
            if self.index.contains_key(&key) {
                continue;
            }
            // Claim the key now so intra-batch duplicates are caught;
            // the placeholder index is fixed by the sync below.
            self.index.insert(key, usize::MAX);
            fresh.push(item);
        }
        let added = fresh.len();
        self.items.extend_exact(fresh);
        self.sync_indices(count_before..self.items.len());
        added
    }

    /// Removes and returns the item at `index`.
    ///
    /// Returns `None` without touching state if `index` is not live. The
    /// tail after the removal point is re-synced (every index there drops
    /// by one).
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let item = self.items.remove(index)?;
        self.index.remove(&item.key());
        self.sync_indices(index..self.items.len());
        Some(item)
    }

    /// Removes and returns the item with the given key.
    ///
    /// `None` when the key is not live.
    pub fn remove_by_key(&mut self, key: &T::Key) -> Option<T> {
        let at = *self.index.get(key)?;
        self.remove_at(at)
    }

    /// Returns the item with the given key in O(1).
    #[inline]
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        let at = *self.index.get(key)?;
        self.items.get(at)
    }

    /// Returns the item with the given key, mutably.
    ///
    /// The caller must not change the item's key through this reference;
    /// doing so desynchronizes the index.
    #[inline]
    pub fn get_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        let at = *self.index.get(key)?;
        self.items.get_mut(at)
    }

    /// Returns the index of the item with the given key, in O(1).
    #[inline]
    pub fn index_of_key(&self, key: &T::Key) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns `true` if an item with this key is live.
    #[inline]
    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the item at `index`, if live.
    #[inline]
    pub fn get_at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Moves the item at `old` to `new`, rotating the span between them.
    ///
    /// Every element in `[min, max]` changed index, so the whole span is
    /// re-synced. Returns `false` without touching state when either index
    /// is not live.
    pub fn relocate_index(&mut self, old: usize, new: usize) -> bool {
        let len = self.items.len();
        if old >= len || new >= len {
            return false;
        }
        self.items.relocate_index(old, new);
        let (lo, hi) = (cmp::min(old, new), cmp::max(old, new));
        self.sync_indices(lo..hi + 1);
        true
    }

    /// Moves the item with the given key to `new`.
    pub fn relocate_key(&mut self, key: &T::Key, new: usize) -> bool {
        match self.index.get(key) {
            Some(&old) => self.relocate_index(old, new),
            None => false,
        }
    }

    /// Exchanges the items at `i` and `j`.
    ///
    /// Only those two indices changed, so exactly two map entries are
    /// rewritten; no range re-sync. Returns `false` when either index is
    /// not live.
    pub fn swap_indices(&mut self, i: usize, j: usize) -> bool {
        let len = self.items.len();
        if i >= len || j >= len {
            return false;
        }
        if i == j {
            return true;
        }
        self.items.swap_indices(i, j);
        let ki = self.items[i].key();
        let kj = self.items[j].key();
        self.index.insert(ki, i);
        self.index.insert(kj, j);
        true
    }

    /// Exchanges the items with the given keys.
    pub fn swap_keys(&mut self, a: &T::Key, b: &T::Key) -> bool {
        let (Some(&i), Some(&j)) = (self.index.get(a), self.index.get(b)) else {
            return false;
        };
        self.swap_indices(i, j)
    }

    /// Replaces the item at `at`, returning the previous item.
    ///
    /// The incoming key may equal the outgoing one; any other live key is
    /// a duplicate and rejects the replacement. `Err` returns the offered
    /// item untouched.
    pub fn replace(&mut self, at: usize, item: T) -> Result<T, T> {
        let Some(occupant) = self.items.get(at) else {
            return Err(item);
        };
        let old_key = occupant.key();
        let new_key = item.key();
        if new_key != old_key && self.index.contains_key(&new_key) {
            return Err(item);
        }
        self.index.remove(&old_key);
        self.index.insert(new_key, at);
        match self.items.replace(at, item) {
            Ok(old) => Ok(old),
            // Unreachable: occupancy was checked above.
            Err(item) => Err(item),
        }
    }

    /// Sorts the items with a comparator, then re-syncs every index.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> cmp::Ordering,
    {
        self.items.sort_by(compare);
        self.sync_indices(0..self.items.len());
    }

    /// Returns a lazy view over every live item's key, in index order.
    ///
    /// Keys are derived per step; the view holds no storage of its own.
    #[inline]
    pub fn keys(&self) -> Keys<'_, T> {
        Keys {
            items: self.items.iter(),
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

    /// Drops every item and clears the key map. Idempotent.
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    /// Drops every item and discards the backing buffer and map capacity.
    pub fn reset(&mut self) {
        self.items.reset();
        self.index = HashMap::new();
    }

    /// Shrinks the backing array to exactly `len`.
    pub fn trim(&mut self) {
        self.items.trim();
        self.index.shrink_to_fit();
    }

    /// Re-derives `key → index` for every element in `range`.
    ///
    /// Called after any operation that changed the index of more than two
    /// elements. Partial re-sync is the dangling-index bug class this
    /// routine exists to prevent; callers pass the full disturbed range.
    fn sync_indices(&mut self, range: Range<usize>) {
        for i in range {
            let key = self.items[i].key();
            self.index.insert(key, i);
        }
    }
}

impl<T: Keyed + Clone> KeyedArray<T> {
    /// Clones the live items into a `Vec`, in index order.
    #[inline]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.to_vec()
    }

    /// Clones a sub-range of the live items into a `Vec`.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the live items.
    #[inline]
    pub fn to_vec_range(&self, range: Range<usize>) -> Vec<T> {
        self.items.to_vec_range(range)
    }
}

impl<T: Keyed> Default for KeyedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> Index<usize> for KeyedArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T: Keyed + core::fmt::Debug> core::fmt::Debug for KeyedArray<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Keyed> Extend<T> for KeyedArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.extend_unique(iter);
    }
}

impl<T: Keyed> FromIterator<T> for KeyedArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend_unique(iter);
        out
    }
}

impl<'a, T: Keyed> IntoIterator for &'a KeyedArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Keyed> Sequence for KeyedArray<T> {
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

impl<T: Keyed> SequenceMut for KeyedArray<T> {
    #[inline]
    fn push_item(&mut self, item: T) -> Result<usize, T> {
        self.try_push(item).map_err(DuplicateKey::into_inner)
    }

    #[inline]
    fn insert_item(&mut self, at: usize, item: T) -> Result<usize, T> {
        self.try_insert(at, item).map_err(DuplicateKey::into_inner)
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

/// Lazy view over a [`KeyedArray`]'s keys, in index order.
///
/// Each step derives the key from the live item; nothing is cached.
pub struct Keys<'a, T: Keyed> {
    items: slice::Iter<'a, T>,
}

impl<T: Keyed> Iterator for Keys<'_, T> {
    type Item = T::Key;

    #[inline]
    fn next(&mut self) -> Option<T::Key> {
        self.items.next().map(Keyed::key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T: Keyed> DoubleEndedIterator for Keys<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T::Key> {
        self.items.next_back().map(Keyed::key)
    }
}

impl<T: Keyed> ExactSizeIterator for Keys<'_, T> {}
