//! Array-backed collections with keyed, positional, and projected access.
//!
//! This crate provides one growable buffer primitive and two collections
//! layered on it by composition, plus computed views and query helpers
//! that work over all of them.
//!
//! # Design Philosophy
//!
//! Associative collections usually pay for lookup twice:
//!
//! ```text
//! HashMap<K, V>        - O(1) by key, no positional order
//! Vec<V> + scan        - ordered, O(n) by key
//! Vec<V> + HashMap     - both, but the sync is on you
//! ```
//!
//! This crate owns the sync. A structural change that shifts elements
//! re-derives positions for exactly the shifted range and nothing else, in
//! one centralized step per collection:
//!
//! ```text
//! DynamicArray<T>   - the buffer: growth policy, block shifts, rotation
//!     │
//!     ├── KeyedArray<T: Keyed>    - side map  key → index, re-synced per op
//!     └── SlotArray<T: Slotted>   - index stored on the item as a Slot token
//! ```
//!
//! `KeyedArray` spends a hash map for O(1) key lookup; `SlotArray` spends
//! a one-word token inside each item instead, which also means an item can
//! belong to at most one slot array at a time.
//!
//! # Quick Start
//!
//! ```
//! use slotkit::{Keyed, KeyedArray};
//!
//! struct Brush {
//!     name: &'static str,
//!     width: u32,
//! }
//!
//! impl Keyed for Brush {
//!     type Key = &'static str;
//!     fn key(&self) -> &'static str { self.name }
//! }
//!
//! let mut brushes: KeyedArray<Brush> = KeyedArray::new();
//! brushes.push(Brush { name: "fine", width: 1 });
//! brushes.push(Brush { name: "broad", width: 8 });
//!
//! // O(1) by key, positional order preserved.
//! assert_eq!(brushes.get(&"broad").unwrap().width, 8);
//! assert_eq!(brushes.index_of_key(&"fine"), Some(0));
//!
//! brushes.remove_by_key(&"fine");
//! assert_eq!(brushes.index_of_key(&"broad"), Some(0));
//! ```
//!
//! # Views and Queries
//!
//! Every collection implements [`Sequence`], which the rest of the crate
//! builds on:
//!
//! | Surface | What it gives you |
//! |---------|-------------------|
//! | [`Projected`] / [`ProjectedMut`] | computed sub-value view, write-through via an assemble seam |
//! | [`Scan::in_reverse`] | back-to-front enumeration |
//! | [`Scan::query`] / [`Scan::query_indexed`] | lazy predicate scans with positional cuts |
//!
//! ```
//! use slotkit::{DynamicArray, Scan};
//!
//! let arr: DynamicArray<u32> = [1, 2, 3, 4, 5, 6].into_iter().collect();
//! let evens: Vec<u32> = arr.query_rev(|x| x % 2 == 0).copied().collect();
//! assert_eq!(evens, vec![6, 4, 2]);
//! ```
//!
//! # Capacity Policy
//!
//! Growth is explicit: doubling by default, or a fixed
//! [`resize unit`](DynamicArray::set_resize_unit) when set. Bulk operations
//! compute their one target capacity before splicing. Shrinking happens
//! only on [`trim`](DynamicArray::trim) or [`reset`](DynamicArray::reset).
//!
//! # Error Policy
//!
//! Ordinary misuse never panics: missing keys and out-of-range removals
//! return `None`, rejected adds return the value back
//! ([`DuplicateKey`], [`AlreadyOwned`]). The indexers are the one
//! unchecked surface: indexing past the live prefix panics like any slice.
//!
//! # Threading
//!
//! None. Every collection is single-threaded and unsynchronized; `&mut`
//! receivers make exclusive access a compile-time fact.

#![warn(missing_docs)]

pub mod dynamic;
pub mod keyed;
pub mod positional;
pub mod project;
pub mod query;
pub mod seq;
pub mod slot;

pub use dynamic::{DynamicArray, IntoIter};
pub use keyed::{DuplicateKey, Keyed, KeyedArray, Keys};
pub use positional::{AlreadyOwned, SlotArray};
pub use project::{Project, Projected, ProjectedIter, ProjectedMut};
pub use query::{InReverse, NumCriteria, Query, Scan};
pub use seq::{Sequence, SequenceMut};
pub use slot::{Slot, Slotted};
