//! Computed sub-views over a collection, with optional write-through.
//!
//! A [`Project`] implementation maps each stored item to a sub-value (a
//! key, a payload field, a summary) and can assemble a full item back from
//! one. [`Projected`] exposes the read side over any
//! [`Sequence`](crate::Sequence); [`ProjectedMut`] adds the write side by
//! assembling a full item and delegating to the owner's normal mutation,
//! which keeps the owner's own bookkeeping (key maps, slot tokens) intact.
//!
//! Sub-values are computed per access; the view holds no storage and no
//! secondary index, so sub-value search is a linear scan.
//!
//! # Example
//!
//! ```
//! use slotkit::{DynamicArray, Project, Projected, ProjectedMut};
//!
//! #[derive(Debug, PartialEq)]
//! struct Pixel { x: i32, y: i32 }
//!
//! /// Projects a pixel to its x coordinate; assembles on y = 0.
//! struct XAxis;
//!
//! impl Project<Pixel> for XAxis {
//!     type Sub = i32;
//!     fn project(&self, p: &Pixel) -> i32 { p.x }
//!     fn assemble(&self, x: i32) -> Pixel { Pixel { x, y: 0 } }
//! }
//!
//! let mut pixels: DynamicArray<Pixel> = DynamicArray::new();
//! pixels.push(Pixel { x: 3, y: 1 });
//! pixels.push(Pixel { x: 7, y: 2 });
//!
//! let xs = Projected::new(&pixels, XAxis);
//! assert_eq!(xs.to_vec(), vec![3, 7]);
//! assert_eq!(xs.index_of(&7), Some(1));
//!
//! // Raw-value ergonomics over the richer stored type.
//! let mut xs = ProjectedMut::new(&mut pixels, XAxis);
//! xs.push(9).unwrap();
//! assert_eq!(pixels[2], Pixel { x: 9, y: 0 });
//! ```

use crate::seq::{Sequence, SequenceMut};

/// A two-way mapping between stored items and a sub-value view.
///
/// `project` must be cheap and pure: it runs on every access. `assemble`
/// is the factory seam that lets a view accept raw sub-values for a
/// collection that stores richer wrapper items.
pub trait Project<T> {
    /// The projected sub-value type.
    type Sub;

    /// Computes the sub-value for an item.
    fn project(&self, item: &T) -> Self::Sub;

    /// Builds a full item around a sub-value.
    fn assemble(&self, sub: Self::Sub) -> T;
}

/// Read-only projected view over a sequence.
///
/// Purely computed: indexing projects the owner's item on the spot.
pub struct Projected<'a, S: ?Sized, P> {
    owner: &'a S,
    projection: P,
}

impl<'a, S, P> Projected<'a, S, P>
where
    S: Sequence + ?Sized,
    P: Project<S::Item>,
{
    /// Wraps a sequence in a projected view.
    pub fn new(owner: &'a S, projection: P) -> Self {
        Self { owner, projection }
    }

    /// Returns the number of items in the underlying sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.owner.len()
    }

    /// Returns `true` if the underlying sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }

    /// Projects the item at `index`, if live.
    #[inline]
    pub fn get(&self, index: usize) -> Option<P::Sub> {
        self.owner.get(index).map(|item| self.projection.project(item))
    }

    /// Returns an iterator over the projected sub-values, in index order.
    #[inline]
    pub fn iter(&self) -> ProjectedIter<'_, S, P> {
        ProjectedIter {
            owner: self.owner,
            projection: &self.projection,
            front: 0,
            back: self.owner.len(),
        }
    }

    /// Collects every projected sub-value into a `Vec`.
    pub fn to_vec(&self) -> Vec<P::Sub> {
        self.iter().collect()
    }
}

impl<S, P> Projected<'_, S, P>
where
    S: Sequence + ?Sized,
    P: Project<S::Item>,
    P::Sub: PartialEq,
{
    /// Returns the index of the first item projecting to `sub`.
    ///
    /// Linear scan by projected equality; no secondary index exists for
    /// sub-values.
    pub fn index_of(&self, sub: &P::Sub) -> Option<usize> {
        (0..self.owner.len()).find(|&i| {
            self.owner
                .get(i)
                .is_some_and(|item| self.projection.project(item) == *sub)
        })
    }

    /// Returns `true` if some item projects to `sub`.
    #[inline]
    pub fn contains(&self, sub: &P::Sub) -> bool {
        self.index_of(sub).is_some()
    }
}

/// Iterator over a [`Projected`] view's sub-values.
pub struct ProjectedIter<'a, S: ?Sized, P> {
    owner: &'a S,
    projection: &'a P,
    front: usize,
    back: usize,
}

impl<S, P> Iterator for ProjectedIter<'_, S, P>
where
    S: Sequence + ?Sized,
    P: Project<S::Item>,
{
    type Item = P::Sub;

    fn next(&mut self) -> Option<P::Sub> {
        if self.front == self.back {
            return None;
        }
        let item = self.owner.get(self.front)?;
        self.front += 1;
        Some(self.projection.project(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<S, P> DoubleEndedIterator for ProjectedIter<'_, S, P>
where
    S: Sequence + ?Sized,
    P: Project<S::Item>,
{
    fn next_back(&mut self) -> Option<P::Sub> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        let item = self.owner.get(self.back)?;
        Some(self.projection.project(item))
    }
}

impl<S, P> ExactSizeIterator for ProjectedIter<'_, S, P>
where
    S: Sequence + ?Sized,
    P: Project<S::Item>,
{
}

/// Projected view with write-through.
///
/// Mutations assemble a full item from the sub-value and delegate to the
/// owner's own operation, so the owner's invariants (unique keys, slot
/// tokens) hold without the view knowing about them. A rejected mutation
/// hands the assembled item back.
pub struct ProjectedMut<'a, S: ?Sized, P> {
    owner: &'a mut S,
    projection: P,
}

impl<'a, S, P> ProjectedMut<'a, S, P>
where
    S: SequenceMut + ?Sized,
    P: Project<S::Item>,
{
    /// Wraps a sequence in a writable projected view.
    pub fn new(owner: &'a mut S, projection: P) -> Self {
        Self { owner, projection }
    }

    /// Returns the number of items in the underlying sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.owner.len()
    }

    /// Returns `true` if the underlying sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }

    /// Projects the item at `index`, if live.
    #[inline]
    pub fn get(&self, index: usize) -> Option<P::Sub> {
        self.owner.get(index).map(|item| self.projection.project(item))
    }

    /// Assembles a full item around `sub` and appends it.
    ///
    /// `Err` carries the assembled item when the owner rejects it.
    pub fn push(&mut self, sub: P::Sub) -> Result<usize, S::Item> {
        self.owner.push_item(self.projection.assemble(sub))
    }

    /// Assembles a full item around `sub` and inserts it at `at`.
    pub fn insert(&mut self, at: usize, sub: P::Sub) -> Result<usize, S::Item> {
        self.owner.insert_item(at, self.projection.assemble(sub))
    }

    /// Assembles a full item around `sub` and replaces the item at `at`.
    ///
    /// `Ok` carries the previous item.
    pub fn replace(&mut self, at: usize, sub: P::Sub) -> Result<S::Item, S::Item> {
        self.owner.replace_item(at, self.projection.assemble(sub))
    }

    /// Exchanges the items at `i` and `j` in the owner.
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) -> bool {
        self.owner.swap_item(i, j)
    }
}
