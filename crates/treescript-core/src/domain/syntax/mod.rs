//! Statement builders, one strategy per dialect family.
//!
//! A [`ScriptSyntax`] knows how to spell the four statements a scaffold
//! script needs. It receives paths already normalized for its dialect and
//! takes care of quoting them. Content escaping goes through the helpers in
//! [`crate::domain::encoding`].
//!
//! Strategies are unit structs referenced from the static registry table, so
//! dispatch is a vtable call and there is no string switch anywhere.

use std::fmt;

mod interpreted;
mod posix;
mod windows;

pub use interpreted::{NodeSyntax, PerlSyntax, PythonSyntax, RubySyntax};
pub use posix::{FishSyntax, HeredocSyntax};
pub use windows::{BatchSyntax, PowerShellSyntax};

pub trait ScriptSyntax: fmt::Debug + Send + Sync {
    /// Idempotent "make this directory (and parents)".
    fn create_directory(&self, path: &str) -> String;

    /// Create an empty file.
    fn create_empty_file(&self, path: &str) -> String;

    /// Write `content` byte-for-byte to `path`.
    ///
    /// Callers reject content the dialect cannot carry (NUL bytes) before
    /// reaching this point.
    fn write_content(&self, path: &str, content: &str) -> Vec<String>;

    /// Print a success message.
    fn completion(&self, message: &str) -> String;
}
