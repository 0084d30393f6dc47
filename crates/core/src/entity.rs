//! Entity trait: identity + continuity across state changes.

/// Something identified by a key rather than by its attribute values.
///
/// The one entity in this system is the inventory item: two records with
/// the same name describe the same item even when their counts differ,
/// and a record whose count changes is still the same item.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
