//! Entity trait: identity across reloads.

/// Entity marker + minimal interface.
///
/// Rows fetched from the API are request-scoped copies; two copies with the
/// same id describe the same record even if their fields differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Looks up a record by id in a loaded list.
pub fn find_by_id<E: Entity>(rows: &[E], id: E::Id) -> Option<&E> {
    rows.iter().find(|row| row.id() == id)
}
