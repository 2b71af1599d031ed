//! Single-owner heap pointer with a pluggable deleter.
//!
//! [`UniquePtr`] is nullable, unlike `Box`, and disposes of its pointee through a
//! [`Deleter`] instead of always dropping a `Box`. Ownership transfer is an ordinary
//! Rust move; `mem::take` moves the pointer out and leaves a null one behind.

use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};

/// Disposes of an object owned by a [`UniquePtr`].
///
/// Any `FnMut(NonNull<T>)` closure is a deleter.
pub trait Deleter<T> {
    /// Called exactly once for every non-null pointer a `UniquePtr` gives up.
    fn delete(&mut self, ptr: NonNull<T>);
}

/// The default deleter: reconstitutes the `Box` the pointer came from and drops it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DefaultDelete;

impl<T> Deleter<T> for DefaultDelete {
    fn delete(&mut self, ptr: NonNull<T>) {
        // SAFETY: a `UniquePtr` with this deleter only holds pointers obtained from
        // `Box::into_raw`, as required by its constructors.
        drop(unsafe { Box::from_raw(ptr.as_ptr()) });
    }
}

impl<T, F> Deleter<T> for F
where
    F: FnMut(NonNull<T>),
{
    fn delete(&mut self, ptr: NonNull<T>) {
        self(ptr)
    }
}

/// An owning, nullable pointer to a single `T`.
///
/// # Examples
/// ```rust
/// use basic_containers::UniquePtr;
///
/// let mut p = UniquePtr::new(41);
/// *p += 1;
/// assert_eq!(*p, 42);
///
/// let q = std::mem::take(&mut p);
/// assert!(p.is_null());
/// assert_eq!(q.as_ref(), Some(&42));
/// ```
pub struct UniquePtr<T, D: Deleter<T> = DefaultDelete> {
    ptr: Option<NonNull<T>>,
    deleter: D,
    _owns: PhantomData<T>,
}

// SAFETY: the pointee is uniquely owned, as with `Box<T>`.
unsafe impl<T: Send, D: Deleter<T> + Send> Send for UniquePtr<T, D> {}
// SAFETY: shared access only hands out `&T` and `&D`.
unsafe impl<T: Sync, D: Deleter<T> + Sync> Sync for UniquePtr<T, D> {}

impl<T> UniquePtr<T> {
    /// Moves `value` to the heap and takes ownership of it.
    pub fn new(value: T) -> Self {
        Self::from(Box::new(value))
    }

    /// Converts back into a `Box`, or `None` if null.
    pub fn into_box(mut self) -> Option<Box<T>> {
        let raw = self.release();
        // SAFETY: with `DefaultDelete` the pointer came from `Box::into_raw`, and
        // `release` has given up ownership of it.
        (!raw.is_null()).then(|| unsafe { Box::from_raw(raw) })
    }
}

impl<T, D: Deleter<T> + Default> UniquePtr<T, D> {
    /// A pointer that owns nothing.
    pub fn null() -> Self {
        Self::from_parts(None, D::default())
    }

    /// Takes ownership of `ptr`; a null `ptr` gives a null `UniquePtr`.
    ///
    /// # Safety
    /// `ptr` must be null or valid for the deleter `D` to dispose of, and must not be
    /// owned by anything else.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self::from_parts(NonNull::new(ptr), D::default())
    }
}

impl<T, D: Deleter<T>> UniquePtr<T, D> {
    fn from_parts(ptr: Option<NonNull<T>>, deleter: D) -> Self {
        Self {
            ptr,
            deleter,
            _owns: PhantomData,
        }
    }

    /// Takes ownership of `ptr`, to be disposed of by `deleter`.
    ///
    /// # Safety
    /// Same as [`from_raw`](Self::from_raw), for the given `deleter`.
    pub unsafe fn from_raw_with_deleter(ptr: *mut T, deleter: D) -> Self {
        Self::from_parts(NonNull::new(ptr), deleter)
    }

    /// Boxes `value` and hands it to `deleter`, which then receives a pointer
    /// obtained from `Box::into_raw`.
    pub fn with_deleter(value: T, deleter: D) -> Self {
        let raw = Box::into_raw(Box::new(value));
        // SAFETY: `Box::into_raw` never returns null.
        Self::from_parts(Some(unsafe { NonNull::new_unchecked(raw) }), deleter)
    }

    /// The held pointer, or null. Ownership is kept.
    #[inline]
    pub fn get(&self) -> *mut T {
        self.ptr.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    pub fn as_ref(&self) -> Option<&T> {
        // SAFETY: a held pointer is valid and uniquely owned.
        self.ptr.map(|p| unsafe { &*p.as_ptr() })
    }

    pub fn as_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as above, and `self` is borrowed mutably.
        self.ptr.map(|p| unsafe { &mut *p.as_ptr() })
    }

    pub fn get_deleter(&self) -> &D {
        &self.deleter
    }

    pub fn get_deleter_mut(&mut self) -> &mut D {
        &mut self.deleter
    }

    /// Gives up ownership without running the deleter and becomes null.
    ///
    /// The caller is now responsible for the returned pointer.
    #[must_use = "the released pointer is leaked unless it is disposed of"]
    pub fn release(&mut self) -> *mut T {
        self.ptr.take().map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// Disposes of the held object, if any, and becomes null.
    pub fn reset(&mut self) {
        if let Some(old) = self.ptr.take() {
            self.deleter.delete(old);
        }
    }

    /// Adopts `ptr`, disposing of the previously held object.
    ///
    /// Passing the pointer already held does nothing; the deleter is not run.
    ///
    /// # Safety
    /// Same as [`from_raw`](Self::from_raw).
    pub unsafe fn reset_to(&mut self, ptr: *mut T) {
        let new = NonNull::new(ptr);
        if new == self.ptr {
            return;
        }
        if let Some(old) = mem::replace(&mut self.ptr, new) {
            self.deleter.delete(old);
        }
    }
}

#[cold]
#[track_caller]
fn null_deref() -> ! {
    panic!("dereferenced a null UniquePtr");
}

impl<T, D: Deleter<T>> Drop for UniquePtr<T, D> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T, D: Deleter<T> + Default> Default for UniquePtr<T, D> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T, D: Deleter<T>> Deref for UniquePtr<T, D> {
    type Target = T;

    /// # Panics
    /// Panics if the pointer is null.
    #[track_caller]
    fn deref(&self) -> &T {
        match self.as_ref() {
            Some(value) => value,
            None => null_deref(),
        }
    }
}

impl<T, D: Deleter<T>> DerefMut for UniquePtr<T, D> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.as_mut() {
            Some(value) => value,
            None => null_deref(),
        }
    }
}

impl<T> From<Box<T>> for UniquePtr<T> {
    fn from(value: Box<T>) -> Self {
        let raw = Box::into_raw(value);
        // SAFETY: `Box::into_raw` never returns null.
        Self::from_parts(Some(unsafe { NonNull::new_unchecked(raw) }), DefaultDelete)
    }
}

impl<T: fmt::Debug, D: Deleter<T>> fmt::Debug for UniquePtr<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ref() {
            Some(value) => f.debug_tuple("UniquePtr").field(value).finish(),
            None => f.write_str("UniquePtr(null)"),
        }
    }
}

impl<T, D: Deleter<T>> fmt::Pointer for UniquePtr<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.get(), f)
    }
}
