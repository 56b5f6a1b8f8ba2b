//! Directory ingestion adapters.

mod local;
pub mod rules;

pub use local::LocalSnapshotSource;
