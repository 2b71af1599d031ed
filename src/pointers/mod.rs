pub mod unique_ptr;

pub use unique_ptr::{DefaultDelete, Deleter, UniquePtr};
