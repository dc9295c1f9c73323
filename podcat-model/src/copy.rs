//! Shallow change detection and copy between two records of the same type.
//!
//! `#[derive(Model)]` generates [`CopyModel`] for public fields. Non-public
//! fields are never candidates, and since `dst` is a plain `&mut T` every
//! candidate field is assignable.

/// Copy differing fields from one record into another.
pub trait CopyModel {
    /// Copy every candidate field of `src` that differs from `self`, skipping
    /// fields whose Rust name is in `ignored`.
    ///
    /// Returns `true` if any field of `self` changed.
    fn copy_from(&mut self, src: &Self, ignored: &[&str]) -> bool;
}

/// Copy all differing fields of `src` into `dst`, excluding `ignored`.
///
/// `dst` is mutated in place; the return value tells whether anything
/// changed, so callers can skip a redundant write.
pub fn copy_model<T: CopyModel>(dst: &mut T, src: &T, ignored: &[&str]) -> bool {
    dst.copy_from(src, ignored)
}

/// Overwrite `dst` with `src` when they differ. Used by generated code.
#[inline]
pub fn copy_field<V: PartialEq + Clone>(dst: &mut V, src: &V) -> bool {
    if dst == src {
        return false;
    }
    dst.clone_from(src);
    true
}
