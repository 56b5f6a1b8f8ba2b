//! Artifact export adapters.

mod local;
mod memory;

pub use local::LocalExporter;
pub use memory::MemoryExporter;
