//! `tally-tracker` — the inventory tracker's two application components.
//!
//! The [`QuantityMutator`] adjusts per-name counts through the document
//! store; the [`LiveInventoryView`] consumes the store's snapshot stream
//! and projects each snapshot into a renderable row list. The two never
//! call each other: mutations flow into the store, and the view only
//! learns about them from the snapshots the store pushes back out.

pub mod mutator;
pub mod view;

pub use mutator::{QuantityMutator, TrackerError, TrackerResult};
pub use view::{display_label, project, ItemRow, LiveInventoryView};
