//! Error types shared by the containers.
//!
//! Checked element access reports [`OutOfRange`]. Fallible capacity operations
//! (`try_reserve`, `try_push_back`) report [`AllocError`]; their infallible
//! counterparts panic or abort through [`AllocError::raise`] instead.

use std::alloc::{Layout, handle_alloc_error};

use thiserror::Error;

/// An index was not less than the length of the container it was applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("index {index} is out of range for length {len}")]
pub struct OutOfRange {
    /// The rejected index.
    pub index: usize,
    /// The container length at the time of the access.
    pub len: usize,
}

impl OutOfRange {
    #[inline]
    pub(crate) fn check(index: usize, len: usize) -> Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(Self { index, len })
        }
    }
}

/// A buffer could not be obtained.
///
/// The container that reported it is left exactly as it was before the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AllocError {
    /// The requested slot count does not fit in `isize::MAX` bytes.
    #[error("capacity overflow")]
    CapacityOverflow,
    /// The global allocator returned null.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    Exhausted {
        /// Layout that was passed to the allocator.
        layout: Layout,
    },
}

impl AllocError {
    /// Turns the error into the behaviour of an infallible std collection:
    /// a panic on overflow, [`handle_alloc_error`] on exhaustion.
    #[cold]
    #[track_caller]
    pub(crate) fn raise(self) -> ! {
        match self {
            Self::CapacityOverflow => panic!("capacity overflow"),
            Self::Exhausted { layout } => handle_alloc_error(layout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_out_of_range_check() {
        assert_eq!(OutOfRange::check(0, 1), Ok(()));
        assert_eq!(
            OutOfRange::check(3, 3),
            Err(OutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = OutOfRange { index: 7, len: 2 };
        assert_eq!(err.to_string(), "index 7 is out of range for length 2");

        let layout = Layout::array::<u64>(4).unwrap();
        let err = AllocError::Exhausted { layout };
        assert_eq!(err.to_string(), "memory allocation of 32 bytes failed");
        assert_eq!(AllocError::CapacityOverflow.to_string(), "capacity overflow");
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_error_raise_overflow_panics() {
        AllocError::CapacityOverflow.raise();
    }
}
