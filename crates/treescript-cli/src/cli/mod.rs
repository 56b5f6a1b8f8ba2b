//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use treescript_core::domain::{DialectId, PlatformScope};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "treescript",
    bin_name = "treescript",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Turn a directory tree into a runnable scaffold script",
    long_about = "treescript scans a directory and writes a script that recreates \
                  its structure (and optionally its text content) in PowerShell, \
                  bash, fish, zsh, batch, Python, Node.js, Ruby or Perl.",
    after_help = "EXAMPLES:\n\
        \x20 treescript generate ./my-app --dialect zsh --platform macos\n\
        \x20 treescript generate ./my-app --include-content --output ./scripts\n\
        \x20 treescript generate ./my-app --all --platform windows --output ./scripts\n\
        \x20 treescript dialects --platform cross-platform",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a scaffold script from a directory.
    #[command(
        visible_alias = "gen",
        about = "Generate a scaffold script from a directory",
        after_help = "EXAMPLES:\n\
            \x20 treescript generate .                              # bash script on stdout\n\
            \x20 treescript generate . -d powershell -p windows -o out\n\
            \x20 treescript generate . --all -p linux -o out --force\n\
            \x20 treescript generate . --directories-only --dry-run"
    )]
    Generate(GenerateArgs),

    /// List the script dialects treescript can emit.
    #[command(
        visible_alias = "ls",
        about = "List available dialects",
        after_help = "EXAMPLES:\n\
            \x20 treescript dialects\n\
            \x20 treescript dialects --platform windows\n\
            \x20 treescript dialects --format json"
    )]
    Dialects(DialectsArgs),

    /// Initialise a treescript configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 treescript init           # user config directory\n\
            \x20 treescript init --local   # .treescript.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 treescript completions bash > ~/.local/share/bash-completion/completions/treescript\n\
            \x20 treescript completions zsh  > ~/.zfunc/_treescript\n\
            \x20 treescript completions fish > ~/.config/fish/completions/treescript.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the treescript configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 treescript config get defaults.dialect\n\
            \x20 treescript config list\n\
            \x20 treescript config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `treescript generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory to scan.
    #[arg(value_name = "DIR", help = "Directory to scan")]
    pub dir: PathBuf,

    /// Script dialect.
    #[arg(
        short = 'd',
        long = "dialect",
        value_name = "DIALECT",
        value_enum,
        conflicts_with = "all",
        help = "Script dialect (default from config)"
    )]
    pub dialect: Option<Dialect>,

    /// Target platform scope.
    #[arg(
        short = 'p',
        long = "platform",
        value_name = "PLATFORM",
        value_enum,
        help = "Target platform (default from config)"
    )]
    pub platform: Option<Platform>,

    /// Embed text file content in the script.
    #[arg(long = "include-content", help = "Embed text file content")]
    pub include_content: bool,

    /// Leave files empty even when the config embeds content.
    #[arg(
        long = "no-content",
        conflicts_with = "include_content",
        help = "Create files empty, overriding the config"
    )]
    pub no_content: bool,

    /// Only recreate directories.
    #[arg(long = "directories-only", help = "Only create directories")]
    pub directories_only: bool,

    /// Omit section comments.
    #[arg(long = "no-comments", help = "Omit section comments")]
    pub no_comments: bool,

    /// Base name of the generated script.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Script base name (letters, digits, '-' and '_')"
    )]
    pub name: Option<String>,

    /// Do not write a README next to the script.
    #[arg(long = "no-readme", help = "Skip the README")]
    pub no_readme: bool,

    /// Template variable, stored but never interpolated.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        value_parser = parse_key_val,
        help = "Template variable (repeatable)"
    )]
    pub vars: Vec<(String, String)>,

    /// Override the ingestion extension allowlist.
    #[arg(
        short = 't',
        long = "types",
        value_name = "EXT",
        value_delimiter = ',',
        help = "Extensions to keep, e.g. sh,py,md"
    )]
    pub file_types: Vec<String>,

    /// Write artifacts here instead of printing the script.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: script on stdout)"
    )]
    pub output: Option<PathBuf>,

    /// One script per dialect offered for the platform.
    #[arg(
        long = "all",
        requires = "output",
        help = "Generate every dialect for the platform"
    )]
    pub all: bool,

    /// Overwrite existing output files.
    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,

    /// Skip the overwrite confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Never prompt")]
    pub yes: bool,

    /// Scan and summarise without writing anything.
    #[arg(long = "dry-run", help = "Show what would be generated")]
    pub dry_run: bool,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

// ── dialects ──────────────────────────────────────────────────────────────────

/// Arguments for `treescript dialects`.
#[derive(Debug, Args)]
pub struct DialectsArgs {
    /// Only dialects offered for this platform.
    #[arg(
        short = 'p',
        long = "platform",
        value_enum,
        help = "Filter by platform"
    )]
    pub platform: Option<Platform>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `dialects` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One identifier per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `treescript init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.treescript.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `treescript completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `treescript config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.dialect`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Script dialects accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Dialect {
    #[value(alias = "pwsh")]
    PowerShell,
    #[value(alias = "sh")]
    Bash,
    Fish,
    Zsh,
    #[value(alias = "bat", alias = "cmd")]
    Batch,
    #[value(alias = "py")]
    Python,
    #[value(alias = "node")]
    NodeJs,
    #[value(alias = "rb")]
    Ruby,
    #[value(alias = "pl")]
    Perl,
}

impl From<Dialect> for DialectId {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::PowerShell => DialectId::PowerShell,
            Dialect::Bash => DialectId::Bash,
            Dialect::Fish => DialectId::Fish,
            Dialect::Zsh => DialectId::Zsh,
            Dialect::Batch => DialectId::Batch,
            Dialect::Python => DialectId::Python,
            Dialect::NodeJs => DialectId::NodeJs,
            Dialect::Ruby => DialectId::Ruby,
            Dialect::Perl => DialectId::Perl,
        }
    }
}

/// Platform scopes accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Platform {
    #[value(alias = "win")]
    Windows,
    #[value(alias = "mac")]
    Macos,
    Linux,
    #[value(alias = "cross")]
    CrossPlatform,
}

impl From<Platform> for PlatformScope {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Windows => PlatformScope::Windows,
            Platform::Macos => PlatformScope::Macos,
            Platform::Linux => PlatformScope::Linux,
            Platform::CrossPlatform => PlatformScope::CrossPlatform,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
