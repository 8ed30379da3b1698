//! Growable array with an explicit capacity policy.
//!
//! [`DynamicArray`] backs every other collection in this crate. It differs
//! from `Vec` in the knobs it exposes:
//!
//! - **Resize unit**: capacity grows by a fixed increment when one is set,
//!   and by doubling otherwise.
//! - **Exact bulk growth**: [`extend_exact`](DynamicArray::extend_exact) and
//!   [`insert_all`](DynamicArray::insert_all) compute the one target capacity
//!   before splicing, so a bulk operation reallocates at most once.
//! - **Explicit shrinking**: capacity only drops on [`trim`](DynamicArray::trim)
//!   (reallocate to exactly `len`) or [`reset`](DynamicArray::reset) (discard
//!   the buffer).
//! - **Structural moves**: [`relocate_index`](DynamicArray::relocate_index)
//!   rotates a single element through a block shift,
//!   [`swap_indices`](DynamicArray::swap_indices) exchanges two.
//!
//! # Example
//!
//! ```
//! use slotkit::DynamicArray;
//!
//! let mut arr: DynamicArray<u32> = DynamicArray::new();
//! arr.push(1);
//! arr.push(2);
//! arr.push(3);
//!
//! arr.insert(0, 9);
//! assert_eq!(arr.as_slice(), &[9, 1, 2, 3]);
//!
//! assert_eq!(arr.remove(1), Some(1));
//! assert_eq!(arr.as_slice(), &[9, 2, 3]);
//! ```
//!
//! # Growth policy
//!
//! | State | Single push | Bulk of `n` |
//! |-------|-------------|-------------|
//! | `resize_unit == 0` | `max(len * 2, len + 1)` | `(len + n) * 2` |
//! | `resize_unit == u` | `capacity + u` | `len + n + u` |
//!
//! Growth allocates a fresh buffer and moves the live prefix into it; the
//! old buffer is released without touching its uninitialized tail.

use core::cmp;
use core::mem::{ManuallyDrop, MaybeUninit};
use core::ops::{Index, IndexMut, Range};
use core::ptr;
use core::slice;

/// Default capacity for an empty array's first allocation.
const DEFAULT_CAPACITY: usize = 4;

/// A growable array with a manual capacity policy.
///
/// The buffer is a boxed `MaybeUninit` slice: the prefix `[0, len)` is
/// initialized, the tail is not. Every operation maintains
/// `len <= capacity`.
pub struct DynamicArray<T> {
    buf: Box<[MaybeUninit<T>]>,
    len: usize,
    /// Fixed growth increment; `0` selects doubling.
    resize_unit: usize,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array with the default capacity (4).
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Box::new_uninit_slice(capacity),
            len: 0,
            resize_unit: 0,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the physical capacity of the backing buffer.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the fixed growth increment, or `0` when doubling is in effect.
    #[inline]
    pub const fn resize_unit(&self) -> usize {
        self.resize_unit
    }

    /// Sets the growth increment. `0` restores doubling.
    #[inline]
    pub fn set_resize_unit(&mut self, unit: usize) {
        self.resize_unit = unit;
    }

    /// Reallocates the buffer to hold exactly `capacity` elements.
    ///
    /// The capacity never drops below `len`; live elements are preserved.
    pub fn set_capacity(&mut self, capacity: usize) {
        let target = cmp::max(capacity, self.len);
        if target != self.buf.len() {
            self.realloc(target);
        }
    }

    /// Shrinks the buffer to exactly `len` elements.
    pub fn trim(&mut self) {
        if self.buf.len() != self.len {
            self.realloc(self.len);
        }
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: the prefix [0, len) is initialized.
        unsafe { slice::from_raw_parts(self.buf.as_ptr() as *const T, self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: the prefix [0, len) is initialized.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr() as *mut T, self.len) }
    }

    /// Returns a reference to the element at `index`, if live.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns a mutable reference to the element at `index`, if live.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Appends an element, growing the buffer if full.
    pub fn push(&mut self, item: T) {
        if self.len == self.buf.len() {
            self.realloc(self.next_capacity());
        }
        self.buf[self.len].write(item);
        self.len += 1;
    }

    /// Inserts an element at `at`, shifting the tail right by one.
    ///
    /// `at == len` appends.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    pub fn insert(&mut self, at: usize, item: T) {
        assert!(at <= self.len, "insert position {at} out of bounds");
        if self.len == self.buf.len() {
            self.realloc(self.next_capacity());
        }
        unsafe {
            let p = self.buf.as_mut_ptr().add(at);
            ptr::copy(p, p.add(1), self.len - at);
            (*p).write(item);
        }
        self.len += 1;
    }

    /// Removes and returns the element at `index`.
    ///
    /// Returns `None` without touching state if `index` is past the live
    /// prefix. The tail shifts left by one.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        unsafe {
            let p = self.buf.as_mut_ptr().add(index);
            let value = (*p).assume_init_read();
            ptr::copy(p.add(1), p, self.len - index - 1);
            self.len -= 1;
            Some(value)
        }
    }

    /// Exchanges the elements at `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is past the live prefix (the underlying
    /// slice access faults; indices are not pre-validated).
    #[inline]
    pub fn swap_indices(&mut self, i: usize, j: usize) {
        self.as_mut_slice().swap(i, j);
    }

    /// Moves the element at `old` to `new`, rotating the span between them.
    ///
    /// `[A, B, C, D]` with `old = 0`, `new = 2` becomes `[B, C, A, D]`:
    /// every element between the two positions shifts by one, unlike a
    /// swap.
    ///
    /// # Panics
    ///
    /// Panics if either index is past the live prefix.
    pub fn relocate_index(&mut self, old: usize, new: usize) {
        assert!(old < self.len && new < self.len, "relocate out of bounds");
        if old == new {
            return;
        }
        unsafe {
            let base = self.buf.as_mut_ptr();
            let value = (*base.add(old)).assume_init_read();
            if old < new {
                ptr::copy(base.add(old + 1), base.add(old), new - old);
            } else {
                ptr::copy(base.add(new), base.add(new + 1), old - new);
            }
            (*base.add(new)).write(value);
        }
    }

    /// Appends every item, reallocating at most once.
    ///
    /// The target capacity is computed up front from the batch size and the
    /// growth policy, so the splice never triggers incremental resizes.
    pub fn extend_exact<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return;
        }
        self.reserve_bulk(items.len());
        for item in items {
            self.buf[self.len].write(item);
            self.len += 1;
        }
    }

    /// Splices every item in at `at`, reallocating at most once.
    ///
    /// The tail `[at, len)` shifts right by the batch size in a single
    /// block copy.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    pub fn insert_all<I>(&mut self, at: usize, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        assert!(at <= self.len, "insert position {at} out of bounds");
        let items: Vec<T> = items.into_iter().collect();
        let added = items.len();
        if added == 0 {
            return;
        }
        self.reserve_bulk(added);
        unsafe {
            let base = self.buf.as_mut_ptr();
            ptr::copy(base.add(at), base.add(at + added), self.len - at);
            for (k, item) in items.into_iter().enumerate() {
                (*base.add(at + k)).write(item);
            }
        }
        self.len += added;
    }

    /// Drops every live element, keeping the buffer. Idempotent.
    pub fn clear(&mut self) {
        let len = self.len;
        self.len = 0;
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_mut_ptr() as *mut T,
                len,
            ));
        }
    }

    /// Drops every live element and discards the buffer entirely.
    ///
    /// The array is left holding a zero-length buffer; the next push
    /// allocates from scratch.
    pub fn reset(&mut self) {
        self.clear();
        self.buf = Box::new_uninit_slice(0);
    }

    /// Returns an iterator over the live elements.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns a mutable iterator over the live elements.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Capacity for a single-element overflow per the growth policy.
    #[inline]
    fn next_capacity(&self) -> usize {
        if self.resize_unit > 0 {
            self.buf.len() + self.resize_unit
        } else {
            cmp::max(self.len * 2, self.len + 1)
        }
    }

    /// Ensures room for `added` more elements with at most one realloc.
    fn reserve_bulk(&mut self, added: usize) {
        if self.len + added <= self.buf.len() {
            return;
        }
        let target = if self.resize_unit > 0 {
            self.len + added + self.resize_unit
        } else {
            (self.len + added) * 2
        };
        self.realloc(target);
    }

    /// Replaces the buffer with one of `new_cap` slots, moving the prefix.
    fn realloc(&mut self, new_cap: usize) {
        debug_assert!(new_cap >= self.len);
        let mut new_buf = Box::new_uninit_slice(new_cap);
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), new_buf.as_mut_ptr(), self.len);
        }
        // The old buffer drops without running element destructors:
        // its contents were moved, and MaybeUninit has no drop glue.
        self.buf = new_buf;
    }
}

impl<T: PartialEq> DynamicArray<T> {
    /// Returns the index of the first element equal to `item`.
    ///
    /// Linear scan.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.as_slice().iter().position(|x| x == item)
    }

    /// Returns `true` if some live element equals `item`.
    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    /// Removes and returns the first element equal to `item`.
    ///
    /// Returns `None` without touching state when no element matches.
    /// Linear scan, then the tail shifts left by one.
    pub fn remove_item(&mut self, item: &T) -> Option<T> {
        let at = self.index_of(item)?;
        self.remove(at)
    }

    /// Exchanges the positions of two elements located by equality.
    ///
    /// Returns `false` without touching state if either is absent.
    pub fn swap_items(&mut self, a: &T, b: &T) -> bool {
        let (Some(i), Some(j)) = (self.index_of(a), self.index_of(b)) else {
            return false;
        };
        self.swap_indices(i, j);
        true
    }

    /// Moves the element equal to `item` to `new`, rotating the span.
    ///
    /// Returns `false` without touching state if the item is absent or
    /// `new` is past the live prefix.
    pub fn relocate(&mut self, item: &T, new: usize) -> bool {
        if new >= self.len {
            return false;
        }
        let Some(old) = self.index_of(item) else {
            return false;
        };
        self.relocate_index(old, new);
        true
    }
}

impl<T: Ord> DynamicArray<T> {
    /// Sorts the live elements by their natural order.
    ///
    /// Only the initialized prefix is touched; the spare tail of the
    /// buffer is never read or written.
    #[inline]
    pub fn sort(&mut self) {
        self.as_mut_slice().sort();
    }
}

impl<T> DynamicArray<T> {
    /// Sorts the live elements with a comparator.
    #[inline]
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> cmp::Ordering,
    {
        self.as_mut_slice().sort_by(compare);
    }

    /// Sorts the live elements by a derived sort key.
    #[inline]
    pub fn sort_by_key<K, F>(&mut self, key: F)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.as_mut_slice().sort_by_key(key);
    }

    /// Replaces the element at `at`, returning the old value.
    ///
    /// Returns `Err(item)` without touching state if `at` is past the
    /// live prefix.
    pub fn replace(&mut self, at: usize, item: T) -> Result<T, T> {
        match self.get_mut(at) {
            Some(p) => Ok(core::mem::replace(p, item)),
            None => Err(item),
        }
    }
}

impl<T: Clone> DynamicArray<T> {
    /// Clones the live elements into a `Vec`, in order.
    #[inline]
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    /// Clones a sub-range of the live elements into a `Vec`.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the live prefix.
    #[inline]
    pub fn to_vec_range(&self, range: Range<usize>) -> Vec<T> {
        self.as_slice()[range].to_vec()
    }

    /// Clones live elements into `dst`, front to front.
    ///
    /// Copies `min(len, dst.len())` elements and returns the count.
    pub fn copy_into(&self, dst: &mut [T]) -> usize {
        let n = cmp::min(self.len, dst.len());
        dst[..n].clone_from_slice(&self.as_slice()[..n]);
        n
    }
}

impl<T> Default for DynamicArray<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    /// Unchecked beyond the bounds check of the live slice: an index past
    /// `len` panics, even when the buffer has spare capacity there.
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.buf.len());
        out.resize_unit = self.resize_unit;
        for item in self.as_slice() {
            out.push(item.clone());
        }
        out
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: core::fmt::Debug> core::fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.extend_exact(iter);
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::with_capacity(0);
        out.extend_exact(iter);
        out
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> crate::Sequence for DynamicArray<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> crate::SequenceMut for DynamicArray<T> {
    #[inline]
    fn push_item(&mut self, item: T) -> Result<usize, T> {
        self.push(item);
        Ok(self.len - 1)
    }

    fn insert_item(&mut self, at: usize, item: T) -> Result<usize, T> {
        if at > self.len {
            return Err(item);
        }
        self.insert(at, item);
        Ok(at)
    }

    #[inline]
    fn replace_item(&mut self, at: usize, item: T) -> Result<T, T> {
        self.replace(at, item)
    }

    fn swap_item(&mut self, i: usize, j: usize) -> bool {
        if i >= self.len || j >= self.len {
            return false;
        }
        self.swap_indices(i, j);
        true
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let mut this = ManuallyDrop::new(self);
        let buf = core::mem::replace(&mut this.buf, Box::new_uninit_slice(0));
        IntoIter {
            buf,
            front: 0,
            back: this.len,
        }
    }
}

/// Owning iterator over a [`DynamicArray`]'s elements.
pub struct IntoIter<T> {
    buf: Box<[MaybeUninit<T>]>,
    front: usize,
    back: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        // Safety: [front, back) holds the not-yet-yielded initialized elements.
        let value = unsafe { self.buf[self.front].assume_init_read() };
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // Safety: [front, back] was the live range before the decrement.
        Some(unsafe { self.buf[self.back].assume_init_read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for i in self.front..self.back {
            unsafe { self.buf[i].assume_init_drop() };
        }
    }
}
