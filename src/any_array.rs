//! A slice-view trait over every contiguous container in the crate and in `std`.

/// A trait generalizing any array-like contiguous collection.
///
/// Implemented by [`DynArray`](crate::DynArray), `FixedArray`, `Vec`, slices and
/// arrays, so the `*_any` helpers on the crate's containers can compare against or
/// copy from any of them without an explicit conversion. Everything else is reached
/// through the returned slice, so the trait never competes with slice methods.
pub trait AnyArray<T> {
    fn as_slice(&self) -> &[T];
}

impl<T> AnyArray<T> for std::vec::Vec<T> {
    fn as_slice(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AnyArray<T> for [T] {
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T, const N: usize> AnyArray<T> for [T; N] {
    fn as_slice(&self) -> &[T] {
        self.as_slice()
    }
}
