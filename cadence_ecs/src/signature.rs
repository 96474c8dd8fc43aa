//! Bitmask signatures of components and systems.
//!
//! Every component type receives exactly one bit on registration.
//! A signature of an entity is the union of bits of all its components,
//! while a signature of a system is the union of bits it requires.
//!
//! ```text
//! Transform = 0b001
//! RigidBody = 0b010
//! Gravity   = 0b100
//! ----------|------
//! System    | 0b111
//! ```

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::{Error, Result};

/// Fixed-width (32-bit) set of component kinds.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Signature(u32);

impl Signature {
    /// Count of bits available for component kinds.
    pub const BITS: u32 = u32::BITS;

    /// Signature without any component kind.
    pub const EMPTY: Self = Self(0);

    /// Creates signature from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Creates signature with the only bit at `index` set.
    ///
    /// Returns `None` if `index` is out of range.
    pub const fn bit(index: u32) -> Option<Self> {
        if index < Self::BITS {
            Some(Self(1 << index))
        } else {
            None
        }
    }

    /// Raw bits of this signature.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if no bit is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Count of component kinds in this signature.
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns new signature with all bits of `other` set.
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns new signature with all bits of `other` cleared.
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Sets or clears bits of `other` depending on `enabled`.
    #[must_use]
    pub const fn apply(self, other: Self, enabled: bool) -> Self {
        if enabled {
            self.with(other)
        } else {
            self.without(other)
        }
    }

    /// Returns `true` if every bit of `required` is set in this signature.
    pub const fn contains(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }
}

impl BitOr for Signature {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.with(rhs)
    }
}

impl BitOrAssign for Signature {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.with(rhs);
    }
}

impl BitAnd for Signature {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Signature {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Signature {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl FromIterator<Signature> for Signature {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Signature>,
    {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Signature({:#b})", self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

/// Monotonic allocator of single-bit signatures.
///
/// Bits are handed out in increasing order and never returned.
#[derive(Debug, Default)]
pub struct SignatureAllocator {
    next: u32,
}

impl SignatureAllocator {
    /// Creates allocator with all bits available.
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocates next unused bit.
    ///
    /// # Errors
    ///
    /// An error is returned if all [`Signature::BITS`] bits were allocated.
    ///
    pub fn next(&mut self) -> Result<Signature> {
        let signature = Signature::bit(self.next).ok_or(Error::SignaturePoolExhausted {
            limit: Signature::BITS,
        })?;
        self.next += 1;
        Ok(signature)
    }

    /// Count of bits which were already allocated.
    pub const fn allocated(&self) -> u32 {
        self.next
    }

    /// Count of bits which are still available.
    pub const fn remaining(&self) -> u32 {
        Signature::BITS - self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_bits() {
        let mut allocator = SignatureAllocator::new();
        let first = allocator.next().unwrap();
        let second = allocator.next().unwrap();
        let third = allocator.next().unwrap();

        assert_eq!(first.bits(), 1);
        assert_eq!(second.bits(), 2);
        assert_eq!(third.bits(), 4);
        assert_eq!(allocator.allocated(), 3);
        assert_eq!(allocator.remaining(), 29);
    }

    #[test]
    fn test_allocator_exhaustion() {
        let mut allocator = SignatureAllocator::new();
        let all: Signature = (0..Signature::BITS)
            .map(|_| allocator.next().unwrap())
            .collect();
        assert_eq!(all.bits(), u32::MAX);

        let error = allocator.next().unwrap_err();
        assert!(matches!(error, Error::SignaturePoolExhausted { limit: 32 }));
        assert!(allocator.next().is_err());
    }

    #[test]
    fn test_contains() {
        let transform = Signature::bit(0).unwrap();
        let body = Signature::bit(1).unwrap();
        let gravity = Signature::bit(2).unwrap();

        let system = transform | body;
        assert!((transform | body | gravity).contains(system));
        assert!(system.contains(system));
        assert!(!transform.contains(system));
        assert!(transform.contains(Signature::EMPTY));
        assert!(Signature::EMPTY.contains(Signature::EMPTY));
    }

    #[test]
    fn test_apply() {
        let a = Signature::bit(3).unwrap();
        let b = Signature::bit(7).unwrap();

        let both = Signature::EMPTY.apply(a, true).apply(b, true);
        assert_eq!(both.len(), 2);
        assert_eq!(both.apply(a, false), b);
        assert_eq!(both.without(a).without(b), Signature::EMPTY);
        assert_eq!(both & !a, b);
        assert!(Signature::bit(32).is_none());
    }
}
