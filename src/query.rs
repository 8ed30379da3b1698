//! Lazy filtered scans over any [`Sequence`].
//!
//! [`Scan`] is blanket-implemented for every sequence and provides:
//!
//! - [`in_reverse`](Scan::in_reverse): enumerate back to front; each call
//!   produces a fresh, restartable sequence.
//! - [`query`](Scan::query) / [`query_rev`](Scan::query_rev): predicate
//!   filter, forward or reverse.
//! - [`query_indexed`](Scan::query_indexed): additionally filter by the
//!   element's position counter in enumeration order against a
//!   [`NumCriteria`] bound. The forward counter runs `0, 1, ...`; the
//!   reverse counter starts at `len - 1` and counts down, each direction
//!   counting independently.
//!
//! All scans are single-pass pull iterators borrowing the sequence; the
//! borrow rules out structural mutation for the iterator's lifetime.
//!
//! # Example
//!
//! ```
//! use slotkit::{DynamicArray, Scan};
//!
//! let arr: DynamicArray<u32> = [1, 2, 3, 4, 5, 6].into_iter().collect();
//!
//! let evens: Vec<u32> = arr.query_rev(|x| x % 2 == 0).copied().collect();
//! assert_eq!(evens, vec![6, 4, 2]);
//!
//! let tail: Vec<u32> = arr.in_reverse().copied().collect();
//! assert_eq!(tail, vec![6, 5, 4, 3, 2, 1]);
//! ```

use crate::seq::Sequence;

/// Comparison criterion applied to an element's position counter.
///
/// [`NumCriteria::None`] disables the positional filter entirely,
/// regardless of the bound passed alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumCriteria {
    /// No positional filtering.
    #[default]
    None,
    /// Position must equal the bound.
    Equal,
    /// Position must exceed the bound.
    GreaterThan,
    /// Position must be below the bound.
    LessThan,
    /// Position must differ from the bound.
    NotEqual,
    /// Position must not exceed the bound.
    NotGreaterThan,
    /// Position must not be below the bound.
    NotLessThan,
}

impl NumCriteria {
    /// Returns `true` if `position` satisfies this criterion against `bound`.
    #[inline]
    pub fn admits(self, position: usize, bound: usize) -> bool {
        match self {
            NumCriteria::None => true,
            NumCriteria::Equal => position == bound,
            NumCriteria::GreaterThan => position > bound,
            NumCriteria::LessThan => position < bound,
            NumCriteria::NotEqual => position != bound,
            NumCriteria::NotGreaterThan => position <= bound,
            NumCriteria::NotLessThan => position >= bound,
        }
    }
}

/// Back-to-front enumeration of a sequence.
pub struct InReverse<'a, S: ?Sized> {
    owner: &'a S,
    remaining: usize,
}

impl<'a, S: Sequence + ?Sized> Iterator for InReverse<'a, S> {
    type Item = &'a S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.owner.get(self.remaining)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S: Sequence + ?Sized> ExactSizeIterator for InReverse<'_, S> {}

/// Lazy predicate scan with an optional positional criterion.
pub struct Query<'a, S: ?Sized, F> {
    owner: &'a S,
    predicate: F,
    reverse: bool,
    criteria: NumCriteria,
    bound: usize,
    /// Next position for a forward scan; one past it for a reverse scan.
    cursor: usize,
}

impl<'a, S, F> Iterator for Query<'a, S, F>
where
    S: Sequence + ?Sized,
    F: FnMut(&S::Item) -> bool,
{
    type Item = &'a S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let position = if self.reverse {
                if self.cursor == 0 {
                    return None;
                }
                self.cursor -= 1;
                self.cursor
            } else {
                if self.cursor >= self.owner.len() {
                    return None;
                }
                let p = self.cursor;
                self.cursor += 1;
                p
            };
            let item = self.owner.get(position)?;
            if (self.predicate)(item) && self.criteria.admits(position, self.bound) {
                return Some(item);
            }
        }
    }
}

/// Query and reverse-enumeration surface for every sequence.
pub trait Scan: Sequence {
    /// Enumerates back to front. Restartable: each call starts fresh.
    fn in_reverse(&self) -> InReverse<'_, Self> {
        InReverse {
            owner: self,
            remaining: self.len(),
        }
    }

    /// Forward scan yielding elements the predicate admits.
    fn query<F>(&self, predicate: F) -> Query<'_, Self, F>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        self.query_indexed(predicate, false, NumCriteria::None, 0)
    }

    /// Reverse scan yielding elements the predicate admits.
    fn query_rev<F>(&self, predicate: F) -> Query<'_, Self, F>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        self.query_indexed(predicate, true, NumCriteria::None, 0)
    }

    /// Scan with both a predicate and a positional criterion.
    ///
    /// The position compared against `bound` is the enumeration counter
    /// for the chosen direction: forward counts up from `0`, reverse
    /// counts down from `len - 1`. [`NumCriteria::None`] disables the
    /// positional filter regardless of `bound`.
    fn query_indexed<F>(
        &self,
        predicate: F,
        reverse: bool,
        criteria: NumCriteria,
        bound: usize,
    ) -> Query<'_, Self, F>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        Query {
            owner: self,
            predicate,
            reverse,
            criteria,
            bound,
            cursor: if reverse { self.len() } else { 0 },
        }
    }
}

impl<S: Sequence + ?Sized> Scan for S {}
