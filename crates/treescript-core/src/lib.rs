//! treescript core - script synthesis engine.
//!
//! Turns a snapshot of a directory tree into scripts that recreate it, in
//! nine dialects, plus a companion README. Follows a hexagonal (ports and
//! adapters) layout.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         treescript-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationService, ScriptAssembler,   │
//! │   ReadmeSynthesizer)                    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (SnapshotSource, ArtifactSink)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    treescript-adapters (Infrastructure) │
//! │  (LocalSnapshotSource, LocalExporter)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (FormatRegistry, ScriptSyntax, encoding)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use treescript_core::prelude::*;
//!
//! let snapshot = FileSystemSnapshot::new("/work/demo")
//!     .with_directory("src")
//!     .with_file(FileEntry::with_content("src/main.sh", "echo hi\n"));
//!
//! let settings = GenerationSettings::builder()
//!     .dialect(DialectId::Bash)
//!     .include_content(true)
//!     .build()
//!     .unwrap();
//!
//! let artifacts = GenerationService::default()
//!     .generate(&snapshot, &settings)
//!     .unwrap();
//! assert_eq!(artifacts[0].file_name(), "scaffold.sh");
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, DialectOutcome, GenerationService, ReadmeSynthesizer, ScriptAssembler,
        ports::{ArtifactSink, ExportOptions, SnapshotSource},
    };
    pub use crate::domain::{
        ArtifactRole, DialectDescriptor, DialectId, DirectoryEntry, DomainError, FileEntry,
        FileSystemSnapshot, FormatRegistry, GeneratedArtifact, GenerationSettings, PlatformScope,
    };
    pub use crate::error::{TreescriptError, TreescriptResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
