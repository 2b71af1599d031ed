//! Growable contiguous array that manages its own heap buffer.
//!
//! [`DynArray`] keeps allocation and element lifetime apart: a `RawBuf` owns `capacity`
//! uninitialised slots, and the array tracks how many of them (`len`) hold live values.
//! Every growth path allocates the new buffer *before* touching an element and then
//! relocates the live values with a bitwise copy, so running out of memory never
//! leaves the array half-moved. Because it `Deref`s to `[T]`, all slice methods
//! (`iter`, `iter().rev()`, `sort`, `binary_search`, ...) are available directly.
//!
//! # Growth policy
//! Appending to or inserting into a full array reallocates to
//! `max(capacity * GROWTH_FACTOR, required)`, so a sequence of `n` appends performs
//! `O(log n)` reallocations. Capacity never shrinks except through
//! [`shrink_to_fit`](DynArray::shrink_to_fit) or [`take`](DynArray::take).
//!
//! # Index validity
//! Mutating operations that return a position return a plain `usize` into the
//! (possibly new) buffer. Any reference into the array is invalidated by a mutation;
//! the borrow checker enforces this statically.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::mem::{self, ManuallyDrop};
use core::ops::{Bound, Deref, DerefMut, Index, IndexMut, RangeBounds};
use core::ptr;
use core::slice::{self, SliceIndex};

use tracing::{debug, trace};

use super::raw_buf::RawBuf;
use crate::any_array::AnyArray;
use crate::error::{AllocError, OutOfRange};

/// A heap-allocated, growable array with explicit capacity control.
///
/// # Behavior
/// * **Default capacity:** [`new`](Self::new) allocates exactly one slot, so the growth
///   arithmetic never has to special-case an empty buffer.
/// * **Clone keeps headroom:** a clone gets a buffer as large as the source's capacity,
///   not just its length.
/// * **Unallocated state:** [`take`](Self::take) moves the contents out in `O(1)` and
///   leaves the source empty with capacity zero. The next append allocates one slot.
/// * **Panic safety:** a panicking `Clone`, `Default` or `Drop` of an element never
///   leaks or double-drops; see the individual operations for what state is kept.
///
/// # Examples
/// ```rust
/// use basic_containers::dyn_array;
///
/// let mut v = dyn_array![1, 3];
/// let at = v.insert(1, 2);
/// assert_eq!(v[at], 2);
/// assert_eq!(v, [1, 2, 3]);
///
/// v.erase(0);
/// assert_eq!(v.at(5).unwrap_err().len, 2);
/// ```
pub struct DynArray<T> {
    buf: RawBuf<T>,
    len: usize,
}

// SAFETY: `DynArray<T>` owns its `T`s exactly like `Vec<T>` does.
unsafe impl<T: Send> Send for DynArray<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for DynArray<T> {}

impl<T> DynArray<T> {
    /// Capacity allocated by [`new`](Self::new).
    pub const DEFAULT_CAPACITY: usize = 1;
    /// Multiplier applied to the capacity when an append or insert finds it full.
    pub const GROWTH_FACTOR: usize = 2;

    /// Creates an empty array with room for [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY)
    /// elements.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty array with exactly `capacity` allocated slots.
    ///
    /// # Panics
    /// Panics if the byte size overflows `isize::MAX`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuf::allocate(capacity),
            len: 0,
        }
    }

    const fn unallocated() -> Self {
        Self {
            buf: RawBuf::dangling(),
            len: 0,
        }
    }

    /// Allocates `capacity` slots and constructs `count` elements with `make`.
    ///
    /// If `make` panics, the elements built so far are dropped and the buffer freed.
    fn build_with<F>(capacity: usize, count: usize, mut make: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        debug_assert!(count <= capacity);
        let mut out = Self::with_capacity(capacity);
        for i in 0..count {
            let value = make(i);
            // SAFETY: `i < count <= capacity` and slot `i` is not yet initialised.
            unsafe { out.buf.ptr().add(i).write(value) };
            out.len = i + 1;
        }
        out
    }

    /// Moves the contents out in constant time, leaving `self` empty and unallocated.
    ///
    /// The returned value owns the original buffer. `self` reports `len() == 0` and
    /// `capacity() == 0` and stays fully usable.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::unallocated())
    }

    // --- Inspection ---

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Same as [`len`](Self::len).
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots, live or not.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialised.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first `len` slots are initialised and uniquely borrowed.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    // --- Element access ---

    /// Bounds-checked access.
    ///
    /// Returns [`OutOfRange`] when `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        OutOfRange::check(index, self.len)?;
        // SAFETY: `index < len`.
        Ok(unsafe { &*self.buf.ptr().add(index) })
    }

    /// Bounds-checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        OutOfRange::check(index, self.len)?;
        // SAFETY: `index < len`.
        Ok(unsafe { &mut *self.buf.ptr().add(index) })
    }

    /// First element.
    ///
    /// # Panics
    /// Panics if the array is empty. Use `first()` for a non-panicking variant.
    #[track_caller]
    pub fn front(&self) -> &T {
        match self.as_slice().first() {
            Some(item) => item,
            None => empty_access("front"),
        }
    }

    #[track_caller]
    pub fn front_mut(&mut self) -> &mut T {
        match self.as_mut_slice().first_mut() {
            Some(item) => item,
            None => empty_access("front_mut"),
        }
    }

    /// Last element.
    ///
    /// # Panics
    /// Panics if the array is empty. Use `last()` for a non-panicking variant.
    #[track_caller]
    pub fn back(&self) -> &T {
        match self.as_slice().last() {
            Some(item) => item,
            None => empty_access("back"),
        }
    }

    #[track_caller]
    pub fn back_mut(&mut self) -> &mut T {
        match self.as_mut_slice().last_mut() {
            Some(item) => item,
            None => empty_access("back_mut"),
        }
    }

    // --- Capacity ---

    fn try_buffer(capacity: usize) -> Result<RawBuf<T>, AllocError> {
        RawBuf::try_allocate(capacity).inspect_err(|err| {
            debug!(capacity, error = %err, "dyn array allocation failed");
        })
    }

    /// Allocates a buffer for at least `required` slots following the growth policy.
    fn try_grow_buffer(&self, required: usize) -> Result<RawBuf<T>, AllocError> {
        let doubled = self.capacity().saturating_mul(Self::GROWTH_FACTOR);
        Self::try_buffer(doubled.max(required))
    }

    /// Relocates every live element into `new_buf`, leaving `gap` uninitialised slots
    /// at `index`, then frees the old buffer. `len` is not changed.
    ///
    /// # Safety
    /// `index <= len` and `new_buf.capacity() >= len + gap`. The slots in the gap that
    /// the caller will count as live must be initialised before `len` is raised.
    unsafe fn adopt_buffer(&mut self, new_buf: RawBuf<T>, index: usize, gap: usize) {
        trace!(
            from = self.capacity(),
            to = new_buf.capacity(),
            len = self.len,
            "relocating dyn array buffer"
        );
        let src = self.buf.ptr();
        let dst = new_buf.ptr();
        // SAFETY: distinct allocations; `[0, len)` of `src` is live and is moved
        // bitwise. The old `RawBuf` releases its memory without dropping anything.
        unsafe {
            ptr::copy_nonoverlapping(src, dst, index);
            ptr::copy_nonoverlapping(src.add(index), dst.add(index + gap), self.len - index);
        }
        self.buf = new_buf;
    }

    fn try_relocate(&mut self, capacity: usize) -> Result<(), AllocError> {
        debug_assert!(capacity >= self.len);
        let new_buf = Self::try_buffer(capacity)?;
        // SAFETY: `capacity >= len`, no gap.
        unsafe { self.adopt_buffer(new_buf, self.len, 0) };
        Ok(())
    }

    /// Ensures the total capacity is at least `capacity`.
    ///
    /// Unlike `Vec::reserve`, the argument is the *total* slot count, not an additional
    /// count. When growth is needed the new buffer holds exactly `capacity` slots.
    /// References into the array are invalidated.
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts if the allocator fails.
    pub fn reserve(&mut self, capacity: usize) {
        if let Err(err) = self.try_reserve(capacity) {
            err.raise();
        }
    }

    /// Fallible [`reserve`](Self::reserve). On error the array is unchanged.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), AllocError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.try_relocate(capacity)
    }

    /// Makes room for `additional` more elements, growing geometrically.
    fn reserve_for(&mut self, additional: usize) {
        if additional <= self.capacity() - self.len {
            return;
        }
        let Some(required) = self.len.checked_add(additional) else {
            AllocError::CapacityOverflow.raise()
        };
        match self.try_grow_buffer(required) {
            // SAFETY: the new buffer holds at least `len` slots.
            Ok(new_buf) => unsafe { self.adopt_buffer(new_buf, self.len, 0) },
            Err(err) => err.raise(),
        }
    }

    /// Reallocates to exactly `len()` slots when there is spare capacity.
    pub fn shrink_to_fit(&mut self) {
        if self.len < self.capacity() {
            if let Err(err) = self.try_relocate(self.len) {
                err.raise();
            }
        }
    }

    /// Resizes to `new_len`, producing new elements with `f`.
    ///
    /// Grows to exactly `new_len` slots first if the capacity is too small.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len);
        while self.len < new_len {
            let value = f();
            // SAFETY: `len < new_len <= capacity`.
            unsafe { self.buf.ptr().add(self.len).write(value) };
            self.len += 1;
        }
    }

    /// Drops every element past `new_len`. Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        // SAFETY: `[new_len, len)` is live. `len` is lowered first so that a
        // panicking destructor cannot cause a second drop of the tail.
        unsafe {
            let tail =
                ptr::slice_from_raw_parts_mut(self.buf.ptr().add(new_len), self.len - new_len);
            self.len = new_len;
            ptr::drop_in_place(tail);
        }
    }

    /// Drops all elements. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Exchanges the buffers of two arrays without touching any element.
    ///
    /// This shadows the slice method of the same name; use
    /// `as_mut_slice().swap(a, b)` to swap two positions.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    // --- Insertion ---

    /// Inserts `value` at `index`, shifting everything after it up by one.
    ///
    /// With spare capacity no allocation happens. Otherwise the buffer grows to
    /// `max(2 * capacity, 1)` and the prefix, the new value and the suffix are laid
    /// out directly in the new buffer. Returns `index`, the position of the new
    /// element.
    ///
    /// # Panics
    /// Panics if `index > len()`.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        let len = self.len;
        if index > len {
            insert_fail(index, len);
        }
        if len < self.capacity() {
            // SAFETY: `index <= len < capacity`; the shifted range stays in bounds.
            unsafe {
                let slot = self.buf.ptr().add(index);
                ptr::copy(slot, slot.add(1), len - index);
                slot.write(value);
            }
        } else {
            let new_buf = match self.try_grow_buffer(len + 1) {
                Ok(buf) => buf,
                Err(err) => err.raise(),
            };
            // SAFETY: the new buffer holds `len + 1` slots; the gap is filled below
            // before `len` is raised.
            unsafe {
                new_buf.ptr().add(index).write(value);
                self.adopt_buffer(new_buf, index, 1);
            }
        }
        self.len = len + 1;
        index
    }

    /// Removes and returns the element at `index`, closing the gap.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            remove_fail(index, len);
        }
        // SAFETY: `index < len`; the value is read out before its slot is overwritten.
        unsafe {
            let slot = self.buf.ptr().add(index);
            let value = slot.read();
            ptr::copy(slot.add(1), slot, len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// Drops the element at `index` and shifts the rest down.
    ///
    /// Returns `index`, which now addresses the element that followed the removed
    /// one (or `len()` if the last element was removed).
    #[track_caller]
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Drops the elements in `range` and shifts the tail down over them.
    ///
    /// Returns the start of the range, which now addresses the first surviving element
    /// after it. An empty range is a no-op. If an element's destructor panics, the
    /// remaining elements of the range are still dropped and the gap is still closed.
    ///
    /// # Panics
    /// Panics if the range is decreasing or extends past `len()`.
    #[track_caller]
    pub fn erase_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = self.bounds(range);
        if start == end {
            return start;
        }
        let base = self.buf.ptr();
        let old_len = self.len;
        let _closer = GapCloser {
            len: &mut self.len,
            base,
            start,
            end,
            old_len,
        };
        // SAFETY: `[start, end)` is live; `_closer` shifts the tail down afterwards.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), end - start)) };
        start
    }

    #[track_caller]
    fn bounds<R>(&self, range: R) -> (usize, usize)
    where
        R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len,
        };
        if start > end {
            panic!("range start (is {start}) should be <= range end (is {end})");
        }
        if end > self.len {
            panic!("range end (is {end}) should be <= len (is {})", self.len);
        }
        (start, end)
    }

    /// Removes and returns the last element, or `None` if empty.
    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: slot `len` was live and is no longer counted.
            Some(unsafe { self.buf.ptr().add(self.len).read() })
        }
    }

    /// Drops the last element. Does nothing on an empty array.
    pub fn pop_back(&mut self) {
        drop(self.pop());
    }

    // --- Appending ---

    #[inline(always)]
    pub fn push_back(&mut self, value: T) {
        self.emplace_back(value);
    }

    /// Appends `value` and returns a reference to it in its final slot.
    #[inline]
    pub fn emplace_back(&mut self, value: T) -> &mut T {
        if self.len == self.capacity() {
            self.grow_one();
        }
        // SAFETY: `len < capacity` after growth.
        unsafe { self.write_back(value) }
    }

    /// Makes room first, then constructs the element with `f` directly before
    /// storing it.
    pub fn emplace_back_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        if self.len == self.capacity() {
            self.grow_one();
        }
        let value = f();
        // SAFETY: `len < capacity`; `f` cannot reach `self`.
        unsafe { self.write_back(value) }
    }

    /// Fallible [`push_back`](Self::push_back). On error the array is unchanged and
    /// `value` is dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<(), AllocError> {
        if self.len == self.capacity() {
            self.try_grow_one()?;
        }
        // SAFETY: `len < capacity`.
        unsafe { self.write_back(value) };
        Ok(())
    }

    /// # Safety
    /// `len < capacity`.
    #[inline(always)]
    unsafe fn write_back(&mut self, value: T) -> &mut T {
        // SAFETY: guaranteed by the caller.
        unsafe {
            let slot = self.buf.ptr().add(self.len);
            slot.write(value);
            self.len += 1;
            &mut *slot
        }
    }

    #[cold]
    #[inline(never)]
    fn grow_one(&mut self) {
        if let Err(err) = self.try_grow_one() {
            err.raise();
        }
    }

    fn try_grow_one(&mut self) -> Result<(), AllocError> {
        let required = self.len.checked_add(1).ok_or(AllocError::CapacityOverflow)?;
        let new_buf = self.try_grow_buffer(required)?;
        // SAFETY: the new buffer holds at least `len + 1` slots.
        unsafe { self.adopt_buffer(new_buf, self.len, 0) };
        Ok(())
    }

    /// Converts into a `std::vec::Vec`, moving every element.
    pub fn into_vec(self) -> std::vec::Vec<T> {
        self.into_iter().collect()
    }
}

impl<T: Default> DynArray<T> {
    /// Creates an array of `n` default values with capacity exactly `n`.
    pub fn with_size(n: usize) -> Self {
        Self::build_with(n, n, |_| T::default())
    }

    /// Resizes to `new_len`, filling new slots with `T::default()`.
    pub fn resize(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T: Clone> DynArray<T> {
    /// Creates an array of `n` clones of `value` with capacity exactly `n`.
    pub fn with_size_value(n: usize, value: T) -> Self {
        Self::build_with(n, n, |_| value.clone())
    }

    /// Creates an array holding clones of `items`, with capacity exactly `items.len()`.
    pub fn from_slice(items: &[T]) -> Self {
        Self::build_with(items.len(), items.len(), |i| items[i].clone())
    }

    /// Resizes to `new_len`, filling new slots with clones of `value`.
    pub fn resize_value(&mut self, new_len: usize, value: T) {
        self.resize_with(new_len, || value.clone());
    }

    /// Inserts clones of `items` at `index`, shifting the tail up by `items.len()`.
    ///
    /// If the elements fit in the spare capacity, the tail is shifted and the clones
    /// are written into the gap; should a clone panic, the clones already written
    /// are dropped and the tail is moved back, restoring the original sequence.
    /// Otherwise a buffer of `max(2 * capacity, len + items.len())` slots is allocated,
    /// the clones are written into it first, and only then are the existing elements
    /// relocated, so a panicking clone leaves the array untouched.
    ///
    /// Returns `index`, the position of the first inserted element. An empty slice is
    /// a no-op.
    ///
    /// # Panics
    /// Panics if `index > len()`.
    #[track_caller]
    pub fn insert_slice(&mut self, index: usize, items: &[T]) -> usize {
        let len = self.len;
        if index > len {
            insert_fail(index, len);
        }
        let count = items.len();
        if count == 0 {
            return index;
        }

        if count <= self.capacity() - len {
            let base = self.buf.ptr();
            // SAFETY: `len + count <= capacity`; the tail moves into spare slots and
            // the guard owns the gap until every clone has been written.
            unsafe {
                ptr::copy(base.add(index), base.add(index + count), len - index);
                let mut fill = GapFill {
                    gap: base.add(index),
                    count,
                    filled: 0,
                    tail: len - index,
                };
                for item in items {
                    let value = item.clone();
                    fill.gap.add(fill.filled).write(value);
                    fill.filled += 1;
                }
                mem::forget(fill);
            }
        } else {
            let Some(required) = len.checked_add(count) else {
                AllocError::CapacityOverflow.raise()
            };
            let new_buf = match self.try_grow_buffer(required) {
                Ok(buf) => buf,
                Err(err) => err.raise(),
            };
            // SAFETY: the new buffer holds `len + count` slots. The clones go into
            // the gap before anything is relocated; on panic `fill` drops them and
            // `new_buf` is freed, leaving `self` as it was.
            unsafe {
                let mut fill = PartialInit {
                    base: new_buf.ptr().add(index),
                    filled: 0,
                };
                for item in items {
                    let value = item.clone();
                    fill.base.add(fill.filled).write(value);
                    fill.filled += 1;
                }
                mem::forget(fill);
                self.adopt_buffer(new_buf, index, count);
            }
        }
        self.len = len + count;
        index
    }

    /// Appends clones of `items`.
    pub fn extend_from_slice(&mut self, items: &[T]) {
        self.insert_slice(self.len, items);
    }
}

// --- Interop ---

impl<T> DynArray<T> {
    pub fn extend_from_any<V: AnyArray<T> + ?Sized>(&mut self, other: &V)
    where
        T: Clone,
    {
        self.extend_from_slice(other.as_slice());
    }

    pub fn eq_any<V: AnyArray<T> + ?Sized>(&self, other: &V) -> bool
    where
        T: PartialEq,
    {
        self.as_slice() == other.as_slice()
    }

    pub fn cmp_any<V: AnyArray<T> + ?Sized>(&self, other: &V) -> Ordering
    where
        T: Ord,
    {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T> AnyArray<T> for DynArray<T> {
    fn as_slice(&self) -> &[T] {
        self.as_slice()
    }
}

// --- Panic guards ---

/// Owns clones written into the gap opened by `insert_slice`. Dropped only on unwind:
/// drops the written clones and moves the tail back down. The array length is not
/// raised until the gap is full, so it still describes the restored sequence.
struct GapFill<T> {
    gap: *mut T,
    count: usize,
    filled: usize,
    tail: usize,
}

impl<T> Drop for GapFill<T> {
    fn drop(&mut self) {
        // SAFETY: `[gap, gap + filled)` holds clones; the tail sits at `gap + count`.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.gap, self.filled));
            ptr::copy(self.gap.add(self.count), self.gap, self.tail);
        }
    }
}

/// Drops the first `filled` slots starting at `base` on unwind.
struct PartialInit<T> {
    base: *mut T,
    filled: usize,
}

impl<T> Drop for PartialInit<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `filled` slots were initialised.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.base, self.filled)) };
    }
}

/// Shifts the tail `[end, old_len)` down to `start` and fixes the length, whether the
/// drop of `[start, end)` finished or unwound.
struct GapCloser<'a, T> {
    len: &'a mut usize,
    base: *mut T,
    start: usize,
    end: usize,
    old_len: usize,
}

impl<T> Drop for GapCloser<'_, T> {
    fn drop(&mut self) {
        // SAFETY: `[end, old_len)` is live and moves into the dropped range.
        unsafe {
            ptr::copy(
                self.base.add(self.end),
                self.base.add(self.start),
                self.old_len - self.end,
            );
        }
        *self.len = self.old_len - (self.end - self.start);
    }
}

#[cold]
#[track_caller]
fn insert_fail(index: usize, len: usize) -> ! {
    panic!("insertion index (is {index}) should be <= len (is {len})");
}

#[cold]
#[track_caller]
fn remove_fail(index: usize, len: usize) -> ! {
    panic!("removal index (is {index}) should be < len (is {len})");
}

#[cold]
#[track_caller]
fn empty_access(op: &str) -> ! {
    panic!("{op}() called on an empty DynArray");
}

// --- Trait impls ---

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        // SAFETY: the first `len` slots are live; `buf` frees the memory afterwards.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len)) };
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// Clones into a buffer with the same capacity as `self`.
    fn clone(&self) -> Self {
        let items = self.as_slice();
        Self::build_with(self.capacity(), self.len, |i| items[i].clone())
    }

    /// Copy-and-swap: if cloning `source` panics, `self` is left unchanged.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for DynArray<T> {
    type Output = I::Output;
    #[inline(always)]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for DynArray<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> std::borrow::Borrow<[T]> for DynArray<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> std::borrow::BorrowMut<[T]> for DynArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: PartialEq<U>, U> PartialEq<DynArray<U>> for DynArray<T> {
    fn eq(&self, other: &DynArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: PartialEq<U>, U> PartialEq<[U]> for DynArray<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for DynArray<T> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for DynArray<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U> PartialEq<std::vec::Vec<U>> for DynArray<T> {
    fn eq(&self, other: &std::vec::Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for DynArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for DynArray<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for DynArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve_for(iter.size_hint().0);
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    /// Allocates exactly the iterator's length when its size hint is exact, like
    /// [`from_slice`](DynArray::from_slice); an exactly empty iterator therefore gives
    /// capacity 0. Otherwise starts from at least
    /// [`DEFAULT_CAPACITY`](DynArray::DEFAULT_CAPACITY) and grows.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let capacity = match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => lower,
            (lower, _) => lower.max(Self::DEFAULT_CAPACITY),
        };
        let mut out = Self::with_capacity(capacity);
        out.extend(iter);
        out
    }
}

impl<T: Clone> From<&[T]> for DynArray<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    fn from(items: [T; N]) -> Self {
        let mut out = Self::with_capacity(N);
        let items = ManuallyDrop::new(items);
        // SAFETY: `N` slots are available; ownership moves bitwise out of `items`.
        unsafe { ptr::copy_nonoverlapping(items.as_ptr(), out.buf.ptr(), N) };
        out.len = N;
        out
    }
}

impl<T> From<std::vec::Vec<T>> for DynArray<T> {
    fn from(mut items: std::vec::Vec<T>) -> Self {
        let count = items.len();
        let mut out = Self::with_capacity(count);
        // SAFETY: `count` slots are available; `set_len(0)` hands ownership over.
        unsafe {
            ptr::copy_nonoverlapping(items.as_ptr(), out.buf.ptr(), count);
            items.set_len(0);
        }
        out.len = count;
        out
    }
}

impl<T> From<DynArray<T>> for std::vec::Vec<T> {
    fn from(items: DynArray<T>) -> Self {
        items.into_vec()
    }
}

// --- Iteration ---

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

/// Owning iterator over the elements of a [`DynArray`].
///
/// Elements not yielded are dropped together with the iterator.
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    start: usize,
    end: usize,
}

// SAFETY: same ownership as `DynArray<T>`.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` is live.
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.start), self.end - self.start) }
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut this = ManuallyDrop::new(self);
        let buf = mem::replace(&mut this.buf, RawBuf::dangling());
        IntoIter {
            buf,
            start: 0,
            end: this.len,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: slot `start` is live and leaves the live range.
        let value = unsafe { self.buf.ptr().add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slot `end` was live and leaves the live range.
        Some(unsafe { self.buf.ptr().add(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: `[start, end)` is live.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.ptr().add(self.start),
                self.end - self.start,
            ));
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

/// Creates a [`DynArray`] from a list of elements or from `value; count`, like `vec!`.
///
/// ```rust
/// use basic_containers::dyn_array;
///
/// let a = dyn_array![1, 2, 3];
/// assert_eq!(a.capacity(), 3);
///
/// let b = dyn_array!["x"; 2];
/// assert_eq!(b, ["x", "x"]);
///
/// let c: basic_containers::DynArray<u8> = dyn_array![];
/// assert_eq!(c.capacity(), 1);
/// ```
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynArray::with_size_value($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynArray::from([$($x),+])
    };
}
