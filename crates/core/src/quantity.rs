//! Quantity value object.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// How many of an item are on hand.
///
/// An item only exists while its count is at least one; a count that
/// would reach zero means the document is deleted, never stored as zero.
/// `Quantity` enforces that invariant at construction and at
/// deserialization, so a zero-count document cannot round-trip through
/// the wire format either.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Quantity(u64);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    pub fn new(count: u64) -> DomainResult<Self> {
        if count == 0 {
            return Err(DomainError::invariant("quantity must be at least 1"));
        }
        Ok(Self(count))
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// One more of this item. Saturates at `u64::MAX`.
    #[must_use]
    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One fewer of this item; `None` means the item is gone entirely.
    #[must_use]
    pub fn decrement(self) -> Option<Self> {
        match self.0 - 1 {
            0 => None,
            n => Some(Self(n)),
        }
    }
}

impl ValueObject for Quantity {}

impl TryFrom<u64> for Quantity {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_is_rejected() {
        assert_eq!(
            Quantity::new(0),
            Err(DomainError::invariant("quantity must be at least 1"))
        );
    }

    #[test]
    fn one_decrements_to_none() {
        assert_eq!(Quantity::ONE.decrement(), None);
    }

    #[test]
    fn increment_then_decrement_round_trips() {
        let q = Quantity::new(3).unwrap();
        assert_eq!(q.increment().decrement(), Some(q));
    }

    #[test]
    fn zero_does_not_deserialize() {
        let err = serde_json::from_str::<Quantity>("0");
        assert!(err.is_err());

        let ok: Quantity = serde_json::from_str("1").unwrap();
        assert_eq!(ok, Quantity::ONE);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: any positive count constructs, and round-trips through u64.
        #[test]
        fn positive_counts_construct(count in 1u64..) {
            let q = Quantity::new(count).unwrap();
            prop_assert_eq!(u64::from(q), count);
        }

        /// Property: decrement is the inverse of increment below the
        /// saturation boundary.
        #[test]
        fn decrement_undoes_increment(count in 1u64..u64::MAX) {
            let q = Quantity::new(count).unwrap();
            prop_assert_eq!(q.increment().decrement(), Some(q));
        }

        /// Property: an item never reaches a stored quantity of zero;
        /// decrement either yields a valid quantity or removes the item.
        #[test]
        fn decrement_never_yields_zero(count in 1u64..) {
            let q = Quantity::new(count).unwrap();
            match q.decrement() {
                Some(rest) => prop_assert!(rest.get() >= 1),
                None => prop_assert_eq!(count, 1),
            }
        }
    }
}
