//! Helpers shared by the OOXML writers.

pub mod id;
pub mod xml;

pub use id::IdAllocator;
