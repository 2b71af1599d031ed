pub mod dyn_array;
mod raw_buf;

pub use dyn_array::{DynArray, IntoIter};
