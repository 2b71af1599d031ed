//! Uninitialised slot storage for [`DynArray`](super::DynArray).
//!
//! [`RawBuf`] owns an allocation sized in elements and nothing else: it never
//! constructs, reads, or drops a `T`. Dropping it returns the memory to the global
//! allocator, which is what lets the growth paths in `dyn_array` build a new buffer,
//! relocate into it, and simply let the old `RawBuf` go out of scope.

use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use std::alloc::{self, Layout};

use crate::error::AllocError;

/// An owned, uninitialised block of `cap` slots of `T`.
///
/// A zero-byte layout (either `cap == 0` or a zero-sized `T`) is never passed to the
/// allocator; the pointer is dangling but well aligned, and `cap` is still reported
/// so that zero-sized element types follow the same growth arithmetic.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuf<T> {
    /// The unallocated state: capacity zero, no memory owned.
    pub(crate) const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates exactly `cap` uninitialised slots.
    pub(crate) fn try_allocate(cap: usize) -> Result<Self, AllocError> {
        let layout = Layout::array::<T>(cap).map_err(|_| AllocError::CapacityOverflow)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                _marker: PhantomData,
            });
        }
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => Ok(Self {
                ptr,
                cap,
                _marker: PhantomData,
            }),
            None => Err(AllocError::Exhausted { layout }),
        }
    }

    /// Like [`try_allocate`](Self::try_allocate) but panics on overflow and aborts
    /// through `handle_alloc_error` on exhaustion.
    #[track_caller]
    pub(crate) fn allocate(cap: usize) -> Self {
        match Self::try_allocate(cap) {
            Ok(buf) => buf,
            Err(err) => err.raise(),
        }
    }

    #[inline(always)]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    fn owns_memory(&self) -> bool {
        self.cap != 0 && mem::size_of::<T>() != 0
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.owns_memory() {
            // SAFETY: the same layout was accepted by `Layout::array` when this
            // buffer was allocated, so it is valid and non-zero.
            unsafe {
                let layout = Layout::from_size_align_unchecked(
                    mem::size_of::<T>() * self.cap,
                    mem::align_of::<T>(),
                );
                alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
            }
        }
    }
}
