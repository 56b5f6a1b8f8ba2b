//! Dialect registry.
//!
//! Every dialect is described exactly once by a static [`DialectDescriptor`].
//! Lookup by [`DialectId`] is an exhaustive `match`, so a new variant without
//! a descriptor fails to compile rather than failing at runtime.
//!
//! # Adding a New Dialect
//!
//! 1. Add a variant to `DialectId` in `value_objects.rs`
//! 2. Add a `DialectDescriptor` static below and its arm in [`descriptor`]
//! 3. Implement `ScriptSyntax` for it in `syntax/` if no existing strategy fits

use crate::domain::{
    error::DomainError,
    syntax::{
        BatchSyntax, FishSyntax, HeredocSyntax, NodeSyntax, PerlSyntax, PowerShellSyntax,
        PythonSyntax, RubySyntax, ScriptSyntax,
    },
    value_objects::{DialectId, LineEnding, PathStyle, PlatformScope},
};

const UNIX: &[PlatformScope] = &[PlatformScope::Macos, PlatformScope::Linux];
const WINDOWS: &[PlatformScope] = &[PlatformScope::Windows];
const EVERYWHERE: &[PlatformScope] = &PlatformScope::ALL;

// ── Descriptor ───────────────────────────────────────────────────────────────

/// Everything the assembler and README synthesizer need to know about one
/// dialect.
#[derive(Debug)]
pub struct DialectDescriptor {
    pub id: DialectId,

    /// Human-facing name, e.g. "PowerShell".
    pub display_name: &'static str,

    /// Script file extension including the dot.
    pub extension: &'static str,

    /// Line comment token.
    pub comment: &'static str,

    /// Emitted only when the platform scope honours shebangs.
    pub shebang: Option<&'static str>,

    /// Lines emitted once after the shebang.
    pub prelude: &'static [&'static str],

    pub line_ending: LineEnding,

    pub path_style: PathStyle,

    /// Platform scopes this dialect is offered for.
    pub platforms: &'static [PlatformScope],

    /// README "Prerequisites" bullet.
    pub prerequisite: &'static str,

    /// README code fence language.
    pub run_fence: &'static str,

    /// README run commands; `{script}` is replaced by the script file name.
    pub run_commands: &'static [&'static str],

    pub syntax: &'static dyn ScriptSyntax,
}

impl DialectDescriptor {
    pub fn is_offered_for(&self, scope: PlatformScope) -> bool {
        self.platforms.contains(&scope)
    }

    /// Comment line, with line breaks in `text` flattened so they cannot end
    /// the comment early.
    pub fn comment_line(&self, text: &str) -> String {
        if text.is_empty() {
            return self.comment.to_string();
        }
        let text = text.replace(['\r', '\n'], " ");
        format!("{} {}", self.comment, text)
    }
}

// ── Table ────────────────────────────────────────────────────────────────────

pub static POWERSHELL: DialectDescriptor = DialectDescriptor {
    id: DialectId::PowerShell,
    display_name: "PowerShell",
    extension: ".ps1",
    comment: "#",
    shebang: None,
    prelude: &[],
    line_ending: LineEnding::Lf,
    path_style: PathStyle::Windows,
    platforms: WINDOWS,
    prerequisite: "PowerShell 7 or newer (`pwsh`)",
    run_fence: "powershell",
    run_commands: &["pwsh -ExecutionPolicy Bypass -File {script}"],
    syntax: &PowerShellSyntax,
};

pub static BASH: DialectDescriptor = DialectDescriptor {
    id: DialectId::Bash,
    display_name: "Bash",
    extension: ".sh",
    comment: "#",
    shebang: Some("#!/bin/bash"),
    prelude: &[],
    line_ending: LineEnding::Lf,
    path_style: PathStyle::Posix,
    platforms: UNIX,
    prerequisite: "bash 4 or newer",
    run_fence: "bash",
    run_commands: &["chmod +x {script}", "./{script}"],
    syntax: &HeredocSyntax,
};

pub static FISH: DialectDescriptor = DialectDescriptor {
    id: DialectId::Fish,
    display_name: "Fish",
    extension: ".fish",
    comment: "#",
    shebang: Some("#!/usr/bin/env fish"),
    prelude: &[],
    line_ending: LineEnding::Lf,
    path_style: PathStyle::Posix,
    platforms: UNIX,
    prerequisite: "fish shell 3 or newer",
    run_fence: "fish",
    run_commands: &["chmod +x {script}", "./{script}"],
    syntax: &FishSyntax,
};

pub static ZSH: DialectDescriptor = DialectDescriptor {
    id: DialectId::Zsh,
    display_name: "Zsh",
    extension: ".zsh",
    comment: "#",
    shebang: Some("#!/bin/zsh"),
    prelude: &[],
    line_ending: LineEnding::Lf,
    path_style: PathStyle::Posix,
    platforms: UNIX,
    prerequisite: "zsh 5 or newer",
    run_fence: "zsh",
    run_commands: &["chmod +x {script}", "./{script}"],
    syntax: &HeredocSyntax,
};

pub static BATCH: DialectDescriptor = DialectDescriptor {
    id: DialectId::Batch,
    display_name: "Batch",
    extension: ".bat",
    comment: "REM",
    shebang: None,
    prelude: &["@echo off"],
    line_ending: LineEnding::CrLf,
    path_style: PathStyle::Windows,
    platforms: WINDOWS,
    prerequisite: "Windows Command Prompt (cmd.exe)",
    run_fence: "cmd",
    run_commands: &["{script}"],
    syntax: &BatchSyntax,
};

pub static PYTHON: DialectDescriptor = DialectDescriptor {
    id: DialectId::Python,
    display_name: "Python",
    extension: ".py",
    comment: "#",
    shebang: Some("#!/usr/bin/env python3"),
    prelude: &["import os"],
    line_ending: LineEnding::Lf,
    path_style: PathStyle::Posix,
    platforms: EVERYWHERE,
    prerequisite: "Python 3.6 or newer",
    run_fence: "bash",
    run_commands: &["python3 {script}"],
    syntax: &PythonSyntax,
};

pub static NODEJS: DialectDescriptor = DialectDescriptor {
    id: DialectId::NodeJs,
    display_name: "Node.js",
    extension: ".js",
    comment: "//",
    shebang: Some("#!/usr/bin/env node"),
    prelude: &["const fs = require('fs');"],
    line_ending: LineEnding::Lf,
    path_style: PathStyle::Posix,
    platforms: EVERYWHERE,
    prerequisite: "Node.js 12 or newer",
    run_fence: "bash",
    run_commands: &["node {script}"],
    syntax: &NodeSyntax,
};

pub static RUBY: DialectDescriptor = DialectDescriptor {
    id: DialectId::Ruby,
    display_name: "Ruby",
    extension: ".rb",
    comment: "#",
    shebang: Some("#!/usr/bin/env ruby"),
    prelude: &["require 'fileutils'"],
    line_ending: LineEnding::Lf,
    path_style: PathStyle::Posix,
    platforms: EVERYWHERE,
    prerequisite: "Ruby 2.5 or newer",
    run_fence: "bash",
    run_commands: &["ruby {script}"],
    syntax: &RubySyntax,
};

pub static PERL: DialectDescriptor = DialectDescriptor {
    id: DialectId::Perl,
    display_name: "Perl",
    extension: ".pl",
    comment: "#",
    shebang: Some("#!/usr/bin/env perl"),
    prelude: &[
        "use strict;",
        "use warnings;",
        "use File::Path qw(make_path);",
    ],
    line_ending: LineEnding::Lf,
    path_style: PathStyle::Posix,
    platforms: EVERYWHERE,
    prerequisite: "Perl 5.10 or newer",
    run_fence: "bash",
    run_commands: &["perl {script}"],
    syntax: &PerlSyntax,
};

/// Descriptor for `id`. Total over `DialectId`.
pub fn descriptor(id: DialectId) -> &'static DialectDescriptor {
    match id {
        DialectId::PowerShell => &POWERSHELL,
        DialectId::Bash => &BASH,
        DialectId::Fish => &FISH,
        DialectId::Zsh => &ZSH,
        DialectId::Batch => &BATCH,
        DialectId::Python => &PYTHON,
        DialectId::NodeJs => &NODEJS,
        DialectId::Ruby => &RUBY,
        DialectId::Perl => &PERL,
    }
}

// ── FormatRegistry ───────────────────────────────────────────────────────────

/// Read-only view over the descriptor table, handed to the assembler.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatRegistry;

static BUILTIN: FormatRegistry = FormatRegistry;

impl FormatRegistry {
    pub fn builtin() -> &'static FormatRegistry {
        &BUILTIN
    }

    pub fn descriptor(&self, id: DialectId) -> &'static DialectDescriptor {
        descriptor(id)
    }

    /// Resolve a dialect by name or alias.
    pub fn resolve(&self, name: &str) -> Result<&'static DialectDescriptor, DomainError> {
        let id: DialectId = name.parse()?;
        Ok(descriptor(id))
    }

    /// Resolve `id`, failing when it is not offered for `scope`.
    pub fn resolve_for(
        &self,
        id: DialectId,
        scope: PlatformScope,
    ) -> Result<&'static DialectDescriptor, DomainError> {
        let descriptor = descriptor(id);
        if descriptor.is_offered_for(scope) {
            Ok(descriptor)
        } else {
            Err(DomainError::UnsupportedDialect {
                dialect: id.as_str().to_string(),
                reason: format!("not offered for platform scope '{scope}'"),
            })
        }
    }

    /// Dialects offered for `scope`, in registry order.
    pub fn supported_dialects(&self, scope: PlatformScope) -> Vec<DialectId> {
        self.all()
            .filter(|d| d.is_offered_for(scope))
            .map(|d| d.id)
            .collect()
    }

    /// Every descriptor, in registry order.
    pub fn all(&self) -> impl Iterator<Item = &'static DialectDescriptor> {
        DialectId::ALL.into_iter().map(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_scope() {
        assert_eq!(
            FormatRegistry.supported_dialects(PlatformScope::Windows),
            vec![
                DialectId::PowerShell,
                DialectId::Batch,
                DialectId::Python,
                DialectId::NodeJs,
                DialectId::Ruby,
                DialectId::Perl,
            ]
        );
    }

    #[test]
    fn unix_scopes_match() {
        let linux = FormatRegistry.supported_dialects(PlatformScope::Linux);
        assert_eq!(linux, FormatRegistry.supported_dialects(PlatformScope::Macos));
        assert_eq!(&linux[..3], &[DialectId::Bash, DialectId::Fish, DialectId::Zsh]);
        assert_eq!(linux.len(), 7);
    }

    #[test]
    fn cross_platform_offers_interpreters_only() {
        assert_eq!(
            FormatRegistry.supported_dialects(PlatformScope::CrossPlatform),
            vec![
                DialectId::Python,
                DialectId::NodeJs,
                DialectId::Ruby,
                DialectId::Perl,
            ]
        );
    }

    #[test]
    fn resolve_for_rejects_foreign_scope() {
        let err = FormatRegistry
            .resolve_for(DialectId::Bash, PlatformScope::Windows)
            .unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedDialect { .. }));
        assert!(FormatRegistry
            .resolve_for(DialectId::Batch, PlatformScope::Windows)
            .is_ok());
    }

    #[test]
    fn resolve_accepts_aliases_and_rejects_unknown() {
        assert_eq!(FormatRegistry.resolve("ps1").unwrap().id, DialectId::PowerShell);
        assert!(FormatRegistry.resolve("tcsh").is_err());
    }

    #[test]
    fn all_is_in_registry_order_and_consistent() {
        let ids: Vec<_> = FormatRegistry.all().map(|d| d.id).collect();
        assert_eq!(ids, DialectId::ALL.to_vec());
        for id in DialectId::ALL {
            assert_eq!(descriptor(id).id, id);
        }
    }

    #[test]
    fn only_batch_uses_crlf() {
        for d in FormatRegistry.all() {
            let expected = if d.id == DialectId::Batch {
                LineEnding::CrLf
            } else {
                LineEnding::Lf
            };
            assert_eq!(d.line_ending, expected, "{}", d.id);
        }
    }

    #[test]
    fn comment_lines_cannot_break_out() {
        assert_eq!(BATCH.comment_line("a\nb"), "REM a b");
        assert_eq!(NODEJS.comment_line(""), "//");
    }

    #[test]
    fn non_system_interpreters_are_found_through_env() {
        assert_eq!(FISH.shebang, Some("#!/usr/bin/env fish"));
        for d in [&PYTHON, &NODEJS, &RUBY, &PERL] {
            assert!(d.shebang.is_some_and(|s| s.starts_with("#!/usr/bin/env ")), "{}", d.id);
        }
    }

    #[test]
    fn powershell_targets_pwsh() {
        assert!(POWERSHELL.prerequisite.contains("PowerShell 7"));
        assert!(POWERSHELL.run_commands[0].starts_with("pwsh "));
    }
}
