// Purpose: fixed-capacity, allocation-free storage used by the voice manager

pub mod overflow;

pub use overflow::{Entry, OverflowStore};
