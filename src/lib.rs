//! # Basic Containers
//!
//! Three foundational containers built directly on the global allocator:
//!
//! * [`DynArray`]: a growable array with explicit capacity control, geometric growth
//!   and bounds-checked access.
//! * [`FixedArray`]: a wrapper over `[T; N]` with checked access, bulk fill and
//!   lexicographic ordering.
//! * [`UniquePtr`]: a nullable single-owner pointer with a pluggable [`Deleter`].
//!
//! ## Key Features
//!
//! * **Capacity Semantics:** `DynArray::new()` allocates one slot, growth doubles, and
//!   `reserve(n)` takes a *total* capacity. `take()` leaves an unallocated array behind.
//! * **Strong Guarantee on Reallocation:** the new buffer is allocated before any element
//!   is touched, and relocation is a bitwise move, so a failed allocation leaves the
//!   array unchanged.
//! * **Panic Safety:** panicking `Clone`/`Default`/`Drop` implementations never leak or
//!   double-drop elements.
//! * **Interoperability:** both array types implement [`AnyArray`], so they compare
//!   against `Vec`, slices and arrays without conversion.
//!
//! ## Cargo Features
//!
//! | Feature | Default | Enables |
//! |---|---|---|
//! | `fixed-array` | yes | [`FixedArray`] and `fixed_array!` |
//! | `unique-ptr` | yes | [`UniquePtr`], [`Deleter`], [`DefaultDelete`] |
//!
//! ## Logging
//!
//! Buffer relocations are reported through [`tracing`] at `TRACE` level and failed
//! allocations at `DEBUG` level. No subscriber is installed by this crate.
//!
//! ## Examples
//!
//! ### DynArray
//!
//! ```rust
//! use basic_containers::{DynArray, dyn_array};
//!
//! let mut v: DynArray<i32> = DynArray::new();
//! assert_eq!(v.capacity(), 1);
//!
//! for i in 0..5 {
//!     v.push_back(i);
//! }
//! assert_eq!(v.capacity(), 8);
//!
//! v.erase_range(1..3);
//! assert_eq!(v, [0, 3, 4]);
//! assert!(v.at(3).is_err());
//!
//! let moved = v.take();
//! assert_eq!(v.capacity(), 0);
//! assert_eq!(moved, dyn_array![0, 3, 4]);
//! ```
//!
//! ### FixedArray
//!
//! ```rust
//! use basic_containers::{FixedArray, fixed_array};
//!
//! let mut a: FixedArray<u8, 16> = FixedArray::default();
//! a.fill_copy(0xff);
//! assert!(a.iter().all(|&b| b == 0xff));
//! assert!(fixed_array![1, 2, 3] < fixed_array![1, 2, 4]);
//! ```
//!
//! ### UniquePtr
//!
//! ```rust
//! use basic_containers::UniquePtr;
//! use std::ptr::NonNull;
//!
//! let mut deleted = 0;
//! {
//!     let p = UniquePtr::with_deleter(String::from("owned"), |ptr: NonNull<String>| {
//!         deleted += 1;
//!         drop(unsafe { Box::from_raw(ptr.as_ptr()) });
//!     });
//!     assert_eq!(p.len(), 5);
//! }
//! assert_eq!(deleted, 1);
//! ```

// --- Module Declarations ---

pub mod any_array;
pub mod error;
pub mod vecs;

#[cfg(feature = "fixed-array")]
pub mod arrays;
#[cfg(feature = "unique-ptr")]
pub mod pointers;

// --- Re-exports ---

pub use any_array::AnyArray;
pub use error::{AllocError, OutOfRange};
pub use vecs::{DynArray, IntoIter};

#[cfg(feature = "fixed-array")]
pub use arrays::FixedArray;
#[cfg(feature = "unique-ptr")]
pub use pointers::{DefaultDelete, Deleter, UniquePtr};
