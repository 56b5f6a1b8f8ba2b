//! Application layer for treescript.
//!
//! This layer contains:
//! - **Services**: script assembly, README synthesis, and the generation façade
//! - **Ports**: snapshot ingestion and artifact export traits
//! - **Errors**: Application-specific error types
//!
//! Statement syntax and escaping rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    COMPLETION_MESSAGE, DialectOutcome, GenerationService, ReadmeSynthesizer, ScriptAssembler,
};

pub use ports::{ArtifactSink, ExportOptions, SnapshotSource};

pub use error::ApplicationError;
