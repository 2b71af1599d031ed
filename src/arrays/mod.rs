pub mod fixed_array;

pub use fixed_array::FixedArray;
