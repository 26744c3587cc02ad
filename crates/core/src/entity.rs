//! Entity trait: records that keep their identity while their attributes
//! are replaced.

/// Something addressed by a stable, server-assigned identifier.
pub trait Entity {
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// True when both values denote the same record, whatever their attributes.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
