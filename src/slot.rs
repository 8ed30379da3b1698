//! Slot tokens for items that remember their own position.
//!
//! A [`Slot`] is a 1-based position token: `Slot::NONE` (the zero value)
//! means "not in any collection", and an occupied slot encodes `index + 1`.
//! Using a reserved zero instead of `Option<usize>` keeps the token a single
//! word inside stored items.
//!
//! [`Slotted`] is the capability a type implements to carry its own slot.
//! [`SlotArray`](crate::SlotArray) maintains the token on every structural
//! change, so `item.slot()` always points back at the item's current index.

/// A 1-based position token with a reserved "none" value.
///
/// # Example
///
/// ```
/// use slotkit::Slot;
///
/// let slot = Slot::from_index(3);
/// assert_eq!(slot.index(), Some(3));
/// assert!(slot.is_some());
///
/// assert!(Slot::NONE.is_none());
/// assert_eq!(Slot::NONE.index(), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Slot(u32);

impl Slot {
    /// Token representing "not in any collection".
    pub const NONE: Slot = Slot(0);

    /// Creates a slot pointing at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index + 1` does not fit in a `u32`.
    #[inline]
    pub fn from_index(index: usize) -> Slot {
        assert!(index < u32::MAX as usize, "slot index exceeds u32 range");
        Slot(index as u32 + 1)
    }

    /// Returns the index this slot points at, or `None` for [`Slot::NONE`].
    #[inline]
    pub const fn index(self) -> Option<usize> {
        match self.0 {
            0 => None,
            n => Some(n as usize - 1),
        }
    }

    /// Returns `true` if this is the "none" token.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if this slot points at an index.
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }
}

impl Default for Slot {
    #[inline]
    fn default() -> Self {
        Slot::NONE
    }
}

impl core::fmt::Debug for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.index() {
            Some(i) => write!(f, "Slot({i})"),
            None => write!(f, "Slot(None)"),
        }
    }
}

/// Capability for items that carry their own slot token.
///
/// A [`SlotArray`](crate::SlotArray) rewrites the token on every operation
/// that moves the item, so the token always mirrors the array-assigned
/// index. A slot is singular per item: an item whose slot is occupied
/// cannot be added to a second array.
///
/// # Example
///
/// ```
/// use slotkit::{Slot, Slotted};
///
/// struct Sprite {
///     id: u64,
///     slot: Slot,
/// }
///
/// impl Slotted for Sprite {
///     fn slot(&self) -> Slot { self.slot }
///     fn set_slot(&mut self, slot: Slot) { self.slot = slot; }
/// }
/// ```
pub trait Slotted {
    /// Returns the item's current slot token.
    fn slot(&self) -> Slot;

    /// Overwrites the item's slot token.
    ///
    /// Called by the owning collection; user code normally has no reason
    /// to call this.
    fn set_slot(&mut self, slot: Slot);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_zero_width() {
        assert!(Slot::NONE.is_none());
        assert!(!Slot::NONE.is_some());
        assert_eq!(Slot::NONE.index(), None);
        assert_eq!(Slot::default(), Slot::NONE);
    }

    #[test]
    fn from_index_roundtrip() {
        for i in [0usize, 1, 7, 1024, u16::MAX as usize] {
            let slot = Slot::from_index(i);
            assert_eq!(slot.index(), Some(i));
            assert!(slot.is_some());
        }
    }

    #[test]
    fn first_real_index_is_encoded_as_one() {
        // The zero value is reserved for NONE.
        assert_ne!(Slot::from_index(0), Slot::NONE);
    }

    #[test]
    fn debug_formatting() {
        assert_eq!(format!("{:?}", Slot::from_index(3)), "Slot(3)");
        assert_eq!(format!("{:?}", Slot::NONE), "Slot(None)");
    }
}
