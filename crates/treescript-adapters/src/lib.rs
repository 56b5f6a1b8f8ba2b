//! Infrastructure adapters for treescript.
//!
//! This crate implements the ports defined in
//! `treescript_core::application::ports`. All filesystem I/O lives here.

pub mod export;
pub mod ingestion;

// Re-export commonly used adapters
pub use export::{LocalExporter, MemoryExporter};
pub use ingestion::LocalSnapshotSource;
