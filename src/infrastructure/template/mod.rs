//! Template adapter
//!
//! Manifest loader plus the local executor behind the template ports.

mod executor;
mod manifest;

pub use executor::{node_key, LocalTopology, NodeRecord, NodeState};
pub use manifest::{ManifestAst, ManifestLoader, ManifestTemplate};
