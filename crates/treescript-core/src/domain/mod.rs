// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for treescript.
//!
//! Pure script synthesis logic: no I/O, no logging, no clocks except where a
//! caller passes one in. Filesystem access lives behind the ports defined in
//! the application layer.
//!
//! ## Layout
//!
//! - `value_objects`: dialect ids, platform scopes, small enums
//! - `entities`: snapshot, settings, generated artifacts
//! - `syntax`: one statement-building strategy per dialect family
//! - `encoding`: escape helpers and the content encoder entry points
//! - `registry`: static dialect table and scope filtering
//! - `paths`: separator rewriting per dialect
pub mod encoding;
pub mod entities;
pub mod error;
pub mod paths;
pub mod registry;
pub mod syntax;
pub mod value_objects;

mod validation;

pub use entities::{
    DirectoryEntry, FileEntry, FileSystemSnapshot, GeneratedArtifact, GenerationSettings,
    GenerationSettingsBuilder,
    settings::{DEFAULT_SCRIPT_NAME, DEFAULT_SUPPORTED_FILE_TYPES},
};

pub use encoding::{encode_empty_file, encode_file_write};
pub use error::{DomainError, ErrorCategory};
pub use paths::normalize;
pub use registry::{DialectDescriptor, FormatRegistry};
pub use syntax::ScriptSyntax;
pub use validation::DomainValidator;

pub use value_objects::{ArtifactRole, DialectId, LineEnding, PathStyle, PlatformScope};

#[cfg(test)]
mod tests {
    use super::*;

    const TRICKY: &str = "quote ' double \" back ` dollar $HOME pct % caret ^ amp & pipe | \
                          lt < gt > paren ( ) bang ! backslash \\ tab \t\nsecond line\n";

    // ========================================================================
    // Encoder entry points
    // ========================================================================

    #[test]
    fn every_dialect_encodes_tricky_content() {
        for id in DialectId::ALL {
            let path = normalize("dir/file.txt", id);
            let lines = encode_file_write(&path, TRICKY, id).unwrap();
            assert!(!lines.is_empty(), "{id}");
            assert!(
                lines.iter().any(|l| l.contains("file.txt")),
                "{id}: target path missing"
            );
        }
    }

    #[test]
    fn every_dialect_rejects_nul() {
        for id in DialectId::ALL {
            assert!(encode_file_write("a", "\0", id).is_err(), "{id}");
        }
    }

    #[test]
    fn empty_file_statement_names_the_path() {
        for id in DialectId::ALL {
            let path = normalize("a/b.txt", id);
            let line = encode_empty_file(&path, id);
            assert!(line.contains("b.txt"), "{id}: {line}");
            assert!(!line.contains('\n'), "{id}: single line expected");
        }
    }

    // ========================================================================
    // Registry + normalizer agreement
    // ========================================================================

    #[test]
    fn windows_native_dialects_are_windows_only() {
        for d in FormatRegistry::builtin().all() {
            if d.path_style == PathStyle::Windows {
                assert_eq!(d.platforms, &[PlatformScope::Windows], "{}", d.id);
            }
        }
    }

    #[test]
    fn shebangs_only_on_non_windows_dialects() {
        for d in FormatRegistry::builtin().all() {
            if d.shebang.is_some() {
                assert!(
                    d.platforms.iter().any(|p| p.honours_shebang()),
                    "{} has a shebang nobody will read",
                    d.id
                );
            }
        }
    }

    #[test]
    fn extensions_are_unique() {
        let mut exts: Vec<_> = FormatRegistry::builtin().all().map(|d| d.extension).collect();
        exts.sort_unstable();
        exts.dedup();
        assert_eq!(exts.len(), DialectId::ALL.len());
    }
}
