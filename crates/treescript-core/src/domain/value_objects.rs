//! Domain value objects: DialectId, PlatformScope, ArtifactRole, PathStyle,
//! LineEnding.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO syntax logic. Everything a dialect knows about emitting
//! statements lives in `syntax/`, and which dialect is offered where lives in
//! `registry.rs`. This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a `DialectDescriptor` entry in `registry.rs`
//! 4. Done, nothing else changes

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── DialectId ────────────────────────────────────────────────────────────────

/// A target scripting dialect for generated scaffold scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectId {
    PowerShell,
    Bash,
    Fish,
    Zsh,
    Batch,
    Python,
    NodeJs,
    Ruby,
    Perl,
}

impl DialectId {
    /// Every dialect, in registry order.
    pub const ALL: [DialectId; 9] = [
        Self::PowerShell,
        Self::Bash,
        Self::Fish,
        Self::Zsh,
        Self::Batch,
        Self::Python,
        Self::NodeJs,
        Self::Ruby,
        Self::Perl,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PowerShell => "powershell",
            Self::Bash => "bash",
            Self::Fish => "fish",
            Self::Zsh => "zsh",
            Self::Batch => "batch",
            Self::Python => "python",
            Self::NodeJs => "nodejs",
            Self::Ruby => "ruby",
            Self::Perl => "perl",
        }
    }
}

impl fmt::Display for DialectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "powershell" | "pwsh" | "ps1" | "ps" => Ok(Self::PowerShell),
            "bash" | "sh" => Ok(Self::Bash),
            "fish" => Ok(Self::Fish),
            "zsh" => Ok(Self::Zsh),
            "batch" | "bat" | "cmd" => Ok(Self::Batch),
            "python" | "py" | "python3" => Ok(Self::Python),
            "nodejs" | "node" | "js" | "javascript" => Ok(Self::NodeJs),
            "ruby" | "rb" => Ok(Self::Ruby),
            "perl" | "pl" => Ok(Self::Perl),
            other => Err(DomainError::UnsupportedDialect {
                dialect: other.to_string(),
                reason: "unknown dialect".into(),
            }),
        }
    }
}

// ── PlatformScope ────────────────────────────────────────────────────────────

/// Coarse grouping of target machines, used to filter valid dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformScope {
    Windows,
    Macos,
    #[default]
    Linux,
    CrossPlatform,
}

impl PlatformScope {
    pub const ALL: [PlatformScope; 4] = [
        Self::Windows,
        Self::Macos,
        Self::Linux,
        Self::CrossPlatform,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Macos => "macos",
            Self::Linux => "linux",
            Self::CrossPlatform => "cross-platform",
        }
    }

    /// Human-facing label used in banners and READMEs.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Macos => "macOS",
            Self::Linux => "Linux",
            Self::CrossPlatform => "Cross-platform",
        }
    }

    /// Shebang lines mean nothing to the Windows loader.
    pub const fn honours_shebang(&self) -> bool {
        !matches!(self, Self::Windows)
    }
}

impl fmt::Display for PlatformScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(Self::Windows),
            "macos" | "mac" | "darwin" | "osx" => Ok(Self::Macos),
            "linux" => Ok(Self::Linux),
            "cross-platform" | "cross" | "crossplatform" | "any" => Ok(Self::CrossPlatform),
            other => Err(DomainError::InvalidSettings(format!(
                "unknown platform scope: {other}"
            ))),
        }
    }
}

// ── ArtifactRole ─────────────────────────────────────────────────────────────

/// What a generated artifact is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactRole {
    Script,
    Readme,
}

impl ArtifactRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Readme => "readme",
        }
    }
}

impl fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── PathStyle / LineEnding ───────────────────────────────────────────────────

/// Path separator convention of a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStyle {
    /// Forward slash, identical to the snapshot's canonical form.
    Posix,
    /// Backslash, for Windows-native interpreters.
    Windows,
}

impl PathStyle {
    pub const fn separator(&self) -> char {
        match self {
            Self::Posix => '/',
            Self::Windows => '\\',
        }
    }
}

/// Line terminator used when joining emitted statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_parses_aliases() {
        assert_eq!(DialectId::from_str("sh").unwrap(), DialectId::Bash);
        assert_eq!(DialectId::from_str("PWSH").unwrap(), DialectId::PowerShell);
        assert_eq!(DialectId::from_str("cmd").unwrap(), DialectId::Batch);
        assert_eq!(DialectId::from_str("node").unwrap(), DialectId::NodeJs);
        assert_eq!(DialectId::from_str(" py ").unwrap(), DialectId::Python);
    }

    #[test]
    fn unknown_dialect_is_unsupported() {
        let err = DialectId::from_str("cobol").unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedDialect { .. }));
    }

    #[test]
    fn dialect_display_round_trips() {
        for id in DialectId::ALL {
            assert_eq!(DialectId::from_str(id.as_str()).unwrap(), id);
        }
    }

    #[test]
    fn platform_parses_and_labels() {
        let scope = PlatformScope::from_str("cross-platform").unwrap();
        assert_eq!(scope, PlatformScope::CrossPlatform);
        assert_eq!(scope.label(), "Cross-platform");
        assert_eq!(PlatformScope::from_str("mac").unwrap().label(), "macOS");
        assert!(PlatformScope::from_str("beos").is_err());
    }

    #[test]
    fn only_windows_ignores_shebang() {
        assert!(!PlatformScope::Windows.honours_shebang());
        assert!(PlatformScope::Linux.honours_shebang());
        assert!(PlatformScope::CrossPlatform.honours_shebang());
    }

    #[test]
    fn serde_uses_kebab_case_for_scope() {
        let json = serde_json::to_string(&PlatformScope::CrossPlatform).unwrap();
        assert_eq!(json, "\"cross-platform\"");
    }
}
