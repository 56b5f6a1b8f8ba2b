//! Application services - orchestrate use cases.
//!
//! The assembler and README synthesizer are pure; `GenerationService` wires
//! them together and drives the ports.

pub mod generation_service;
pub mod readme_synthesizer;
pub mod script_assembler;

pub use generation_service::{DialectOutcome, GenerationService};
pub use readme_synthesizer::ReadmeSynthesizer;
pub use script_assembler::{COMPLETION_MESSAGE, ScriptAssembler};
