//! Fixed-length inline array with bounds-checked access and bulk fill.
//!
//! [`FixedArray`] is a thin wrapper over `[T; N]`: no heap, no length field, and the
//! same layout as the bare array. It adds the checked accessors and fill paths that
//! [`DynArray`](crate::DynArray) has, so code can move between the two without
//! changing how it reads elements.

use core::cmp::Ordering;
use core::fmt;
use core::mem::MaybeUninit;
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::slice::{self, SliceIndex};

use crate::any_array::AnyArray;
use crate::error::OutOfRange;
use crate::vecs::DynArray;

/// An array of exactly `N` elements stored inline.
///
/// Comparison is elementwise for equality and lexicographic for ordering.
///
/// # Examples
/// ```rust
/// use basic_containers::{FixedArray, fixed_array};
///
/// let a = fixed_array![1, 2, 3];
/// let b = FixedArray::<i32, 3>::splat(7);
/// assert!(a < b);
/// assert_eq!(a.at(1), Ok(&2));
/// assert!(a.at(3).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FixedArray<T, const N: usize> {
    data: [T; N],
}

impl<T, const N: usize> FixedArray<T, N> {
    /// Number of elements, available in const contexts.
    pub const SIZE: usize = N;

    /// Wraps an existing array.
    pub const fn new(data: [T; N]) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> [T; N] {
        self.data
    }

    #[inline(always)]
    pub const fn size(&self) -> usize {
        N
    }

    /// The underlying array.
    #[inline(always)]
    pub const fn data(&self) -> &[T; N] {
        &self.data
    }

    #[inline(always)]
    pub fn data_mut(&mut self) -> &mut [T; N] {
        &mut self.data
    }

    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    #[inline(always)]
    pub const fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    // --- Element access ---

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        OutOfRange::check(index, N)?;
        Ok(&self.data[index])
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        OutOfRange::check(index, N)?;
        Ok(&mut self.data[index])
    }

    /// First element.
    ///
    /// # Panics
    /// Panics if `N == 0`.
    #[track_caller]
    pub fn front(&self) -> &T {
        match self.data.first() {
            Some(item) => item,
            None => empty_access("front"),
        }
    }

    #[track_caller]
    pub fn front_mut(&mut self) -> &mut T {
        match self.data.first_mut() {
            Some(item) => item,
            None => empty_access("front_mut"),
        }
    }

    /// Last element.
    ///
    /// # Panics
    /// Panics if `N == 0`.
    #[track_caller]
    pub fn back(&self) -> &T {
        match self.data.last() {
            Some(item) => item,
            None => empty_access("back"),
        }
    }

    #[track_caller]
    pub fn back_mut(&mut self) -> &mut T {
        match self.data.last_mut() {
            Some(item) => item,
            None => empty_access("back_mut"),
        }
    }

    // --- Modifiers ---

    /// Exchanges the contents of two arrays element by element.
    ///
    /// This shadows the slice method of the same name; use
    /// `as_mut_slice().swap(a, b)` to swap two positions.
    pub fn swap(&mut self, other: &mut Self) {
        self.data.swap_with_slice(&mut other.data);
    }
}

impl<T: Clone, const N: usize> FixedArray<T, N> {
    /// An array of `N` clones of `value`.
    pub fn filled(value: &T) -> Self {
        Self {
            data: core::array::from_fn(|_| value.clone()),
        }
    }

    /// Assigns a clone of `value` to every slot.
    ///
    /// This shadows `<[T]>::fill`, which takes the value by move.
    pub fn fill(&mut self, value: &T) {
        for slot in &mut self.data {
            slot.clone_from(value);
        }
    }
}

impl<T: Copy, const N: usize> FixedArray<T, N> {
    /// An array of `N` copies of `value`, written by repeated doubling.
    pub fn splat(value: T) -> Self {
        let mut slots = [MaybeUninit::<T>::uninit(); N];
        if let Some(first) = slots.first_mut() {
            first.write(value);
            double_fill(&mut slots);
        }
        // SAFETY: `double_fill` initialised every slot from slot 0.
        Self {
            data: slots.map(|slot| unsafe { slot.assume_init() }),
        }
    }

    /// Overwrites every slot with `value` by repeated doubling.
    pub fn fill_copy(&mut self, value: T) {
        if let Some(first) = self.data.first_mut() {
            *first = value;
            double_fill(&mut self.data);
        }
    }
}

/// Copies slot 0 across the whole slice, doubling the filled prefix each pass.
fn double_fill<U: Copy>(slots: &mut [U]) {
    let n = slots.len();
    let mut done = 1;
    while done < n {
        let step = done.min(n - done);
        slots.copy_within(0..step, done);
        done += step;
    }
}

#[cold]
#[track_caller]
fn empty_access(op: &str) -> ! {
    panic!("{op}() called on an empty FixedArray");
}

// --- Trait impls ---

impl<T: Default, const N: usize> Default for FixedArray<T, N> {
    fn default() -> Self {
        Self {
            data: core::array::from_fn(|_| T::default()),
        }
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedArray<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.data, f)
    }
}

impl<T, const N: usize> Deref for FixedArray<T, N> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T, const N: usize> DerefMut for FixedArray<T, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<T, I: SliceIndex<[T]>, const N: usize> Index<I> for FixedArray<T, N> {
    type Output = I::Output;
    #[inline(always)]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>, const N: usize> IndexMut<I> for FixedArray<T, N> {
    #[inline(always)]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, const N: usize> AsRef<[T]> for FixedArray<T, N> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T, const N: usize> AsMut<[T]> for FixedArray<T, N> {
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T, const N: usize> From<[T; N]> for FixedArray<T, N> {
    fn from(data: [T; N]) -> Self {
        Self { data }
    }
}

impl<T, const N: usize> From<FixedArray<T, N>> for [T; N] {
    fn from(array: FixedArray<T, N>) -> Self {
        array.data
    }
}

impl<T, const N: usize> From<FixedArray<T, N>> for DynArray<T> {
    fn from(array: FixedArray<T, N>) -> Self {
        DynArray::from(array.data)
    }
}

impl<T, const N: usize> AnyArray<T> for FixedArray<T, N> {
    fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: PartialEq, const N: usize> FixedArray<T, N> {
    pub fn eq_any<V: AnyArray<T> + ?Sized>(&self, other: &V) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Ord, const N: usize> FixedArray<T, N> {
    pub fn cmp_any<V: AnyArray<T> + ?Sized>(&self, other: &V) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

// --- Iteration ---

impl<T, const N: usize> IntoIterator for FixedArray<T, N> {
    type Item = T;
    type IntoIter = core::array::IntoIter<T, N>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedArray<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut FixedArray<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

/// Creates a [`FixedArray`] from exactly `N` positional values, or from
/// `value; N` by cloning.
///
/// ```rust
/// use basic_containers::fixed_array;
///
/// let a = fixed_array![5, 6, 7];
/// assert_eq!(a.size(), 3);
///
/// let b = fixed_array![String::from("hi"); 2];
/// assert_eq!(b[1], "hi");
/// ```
#[macro_export]
macro_rules! fixed_array {
    ($elem:expr; $n:expr) => {
        $crate::FixedArray::<_, { $n }>::filled(&$elem)
    };
    ($($x:expr),* $(,)?) => {
        $crate::FixedArray::new([$($x),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_fixed_array_filled_and_access() {
        let arr = FixedArray::<i32, 5>::filled(&7);
        assert_eq!(arr.size(), 5);
        for i in 0..arr.size() {
            assert_eq!(arr[i], 7);
            assert_eq!(arr.at(i), Ok(&7));
        }
    }

    #[test]
    fn test_fixed_array_positional_construction() {
        let arr = fixed_array![1, 2, 3];
        assert_eq!(arr.size(), 3);
        assert_eq!(FixedArray::<i32, 3>::SIZE, 3);
        assert_eq!(arr[0], 1);
        assert_eq!(arr[1], 2);
        assert_eq!(arr[2], 3);
        assert_eq!(arr.into_inner(), [1, 2, 3]);
    }

    #[test]
    fn test_fixed_array_at_out_of_range() {
        let mut arr = FixedArray::<i32, 3>::splat(0);
        assert_eq!(arr.at(3), Err(OutOfRange { index: 3, len: 3 }));
        assert_eq!(arr.at(100).unwrap_err().index, 100);
        assert!(arr.at_mut(3).is_err());
        *arr.at_mut(2).unwrap() = 9;
        assert_eq!(arr, fixed_array![0, 0, 9]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_fixed_array_index_out_of_range_panics() {
        let arr = fixed_array![1, 2, 3];
        let i = arr.size();
        let _value = arr[i];
    }

    #[test]
    fn test_fixed_array_fill_paths() {
        let mut arr: FixedArray<i32, 4> = FixedArray::default();
        arr.fill_copy(42);
        assert!(arr.iter().all(|&x| x == 42));

        let mut odd = FixedArray::<u8, 7>::splat(1);
        assert_eq!(odd.data(), &[1; 7]);
        odd.fill_copy(3);
        assert_eq!(odd.into_inner(), [3; 7]);

        let empty = FixedArray::<u64, 0>::splat(5);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_fixed_array_default_and_fill_strings() {
        let mut arr: FixedArray<String, 3> = FixedArray::default();
        assert_eq!(arr.size(), 3);
        for s in &arr {
            assert_eq!(s, "");
        }
        arr.fill(&String::from("hello"));
        for i in 0..arr.size() {
            assert_eq!(arr[i], "hello");
        }
    }

    #[test]
    fn test_fixed_array_swap_and_comparison() {
        let mut a = fixed_array![1, 2, 3];
        let mut b = fixed_array![4, 5, 6];
        a.swap(&mut b);
        assert_eq!(a[0], 4);
        assert_eq!(b[2], 3);
        assert!(a > b);
        assert!(!(a < b));
        assert!(a >= b);
        assert!(b < a);
        assert!(b <= a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fixed_array_lexicographic_order() {
        let a = fixed_array![1, 2, 3];
        let b = fixed_array![1, 2, 4];
        assert!(a < b);
        assert_eq!(a.cmp(&b), Ordering::Less);

        let c = fixed_array![1, 2, 3];
        assert!(!(a < c));
        assert!(!(a > c));
        assert_eq!(a, c);
    }

    #[test]
    fn test_fixed_array_filled_with_vectors_and_swap() {
        let mut arr = FixedArray::<Vec<i32>, 2>::filled(&vec![1, 2, 3]);
        for v in &arr {
            assert_eq!(v.len(), 3);
            assert_eq!(v[0], 1);
        }
        let mut other = FixedArray::<Vec<i32>, 2>::filled(&Vec::new());
        arr.swap(&mut other);
        assert_eq!(other[0].len(), 3);
        assert!(arr[0].is_empty());
    }

    #[test]
    fn test_fixed_array_nested() {
        let inner = FixedArray::<i32, 5>::splat(8);
        let arr = FixedArray::<FixedArray<i32, 5>, 5>::splat(inner);
        for row in &arr {
            assert!(row.iter().all(|&x| x == 8));
        }
    }

    #[test]
    fn test_fixed_array_front_back_data() {
        let mut arr = fixed_array![5, 6, 7];
        assert_eq!(arr.iter().next(), Some(&5));
        assert_eq!(arr.iter().next_back(), Some(&7));
        assert_eq!(*arr.front(), 5);
        assert_eq!(*arr.back(), 7);
        // SAFETY: index 1 is in bounds.
        assert_eq!(unsafe { *arr.as_ptr().add(1) }, 6);
        *arr.front_mut() = 50;
        *arr.back_mut() = 70;
        assert_eq!(arr.data(), &[50, 6, 70]);
    }

    #[test]
    #[should_panic(expected = "back() called on an empty FixedArray")]
    fn test_fixed_array_back_on_empty_panics() {
        let arr: FixedArray<i32, 0> = FixedArray::new([]);
        arr.back();
    }

    #[test]
    fn test_fixed_array_const_construction() {
        const ARR: FixedArray<i32, 3> = FixedArray::new([1, 2, 3]);
        const FIRST: i32 = ARR.data()[0];
        const LEN: usize = ARR.size();
        assert_eq!(FIRST, 1);
        assert_eq!(LEN, 3);
        assert_eq!(ARR.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_fixed_array_iteration_and_conversion() {
        let mut arr = fixed_array![1, 2, 3];
        for x in &mut arr {
            *x *= 2;
        }
        let collected: Vec<i32> = arr.into_iter().collect();
        assert_eq!(collected, vec![2, 4, 6]);

        let dyn_arr: DynArray<i32> = arr.into();
        assert_eq!(dyn_arr, [2, 4, 6]);
        assert!(arr.eq_any(&dyn_arr));
        assert_eq!(arr.cmp_any(&vec![2, 4, 7]), Ordering::Less);
    }

    #[test]
    fn test_fixed_array_filled_drops_every_clone() {
        let drops = Rc::new(Cell::new(0));
        struct Noisy(Rc<Cell<usize>>);
        impl Clone for Noisy {
            fn clone(&self) -> Self {
                Noisy(self.0.clone())
            }
        }
        impl Drop for Noisy {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }
        {
            let seed = Noisy(drops.clone());
            let _arr = FixedArray::<Noisy, 4>::filled(&seed);
        }
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn test_fixed_array_macro_repeat() {
        let arr = fixed_array![String::from("x"); 3];
        assert_eq!(arr.size(), 3);
        assert!(arr.iter().all(|s| s == "x"));
    }
}
