//! Minimal container contract shared by the collections and their views.
//!
//! [`Sequence`] is the read surface (length + positional access) that the
//! [query](crate::query) helpers and [projections](crate::project) operate
//! over. [`SequenceMut`] adds the mutators a projection adapter needs to
//! translate sub-item operations into owner operations.
//!
//! Mutators are uniform across implementors: a rejected value rides back in
//! `Err`, so no collection ever silently drops an item it declined to take.

/// Read access to an indexed sequence of items.
pub trait Sequence {
    /// The stored item type.
    type Item;

    /// Returns the number of live items.
    fn len(&self) -> usize;

    /// Returns the item at `index`, if live.
    fn get(&self, index: usize) -> Option<&Self::Item>;

    /// Returns `true` if the sequence holds no items.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mutation surface used by projection adapters.
///
/// Every method leaves the collection unchanged on rejection and returns
/// the offered value to the caller.
pub trait SequenceMut: Sequence {
    /// Appends an item, returning its index.
    ///
    /// `Err(item)` when the collection rejects it (duplicate key, already
    /// owned slot, ...).
    fn push_item(&mut self, item: Self::Item) -> Result<usize, Self::Item>;

    /// Inserts an item at `at`, returning its index.
    fn insert_item(&mut self, at: usize, item: Self::Item) -> Result<usize, Self::Item>;

    /// Replaces the item at `at`, returning the previous value.
    fn replace_item(&mut self, at: usize, item: Self::Item) -> Result<Self::Item, Self::Item>;

    /// Exchanges the items at `i` and `j`.
    ///
    /// Returns `false` without touching state if either index is not live.
    fn swap_item(&mut self, i: usize, j: usize) -> bool;
}
