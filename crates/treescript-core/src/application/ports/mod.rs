//! Application ports (traits) for external dependencies.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `SnapshotSource`: directory tree ingestion
//!   - `ArtifactSink`: artifact export
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ArtifactSink, ExportOptions, SnapshotSource};

#[cfg(test)]
pub use output::{MockArtifactSink, MockSnapshotSource};
