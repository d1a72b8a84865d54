//! Instance store implementations
//!
//! Concrete implementations of the InstanceStore port.

mod file;
mod memory;

pub use file::FileInstanceStore;
pub use memory::MemoryInstanceStore;
