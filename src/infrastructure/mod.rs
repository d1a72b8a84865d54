//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `storage/` - Instance store implementations (File, Memory)
//! - `confirm/` - Confirmer implementations (Line, Terminal)
//! - `template/` - Manifest template loader and local executor

pub mod confirm;
pub mod storage;
pub mod template;

// Re-export for convenience
pub use confirm::{LineConfirmer, TerminalConfirmer};
pub use storage::{FileInstanceStore, MemoryInstanceStore};
pub use template::{LocalTopology, ManifestLoader};
