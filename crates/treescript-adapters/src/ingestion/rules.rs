//! What ingestion keeps, skips, and reads.
//!
//! Plain lookup tables plus the predicates built on them. Extensions are
//! lower-case with their leading dot, as produced by
//! `treescript_core::domain::entities::snapshot::extension_of`.

use treescript_core::domain::{GenerationSettings, entities::snapshot::extension_of};

/// Directories never descended into. Any other dot-directory is skipped too.
pub const SKIP_DIRECTORIES: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    "dist",
    "build",
    "out",
    "target",
    "__pycache__",
    ".pytest_cache",
    ".vscode",
    ".idea",
    "coverage",
    ".nyc_output",
    "vendor",
    "bower_components",
];

/// OS litter that is never a project file.
pub const SKIP_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

pub const BINARY_EXTENSIONS: &[&str] = &[
    ".exe", ".dll", ".so", ".dylib", ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".ico", ".mp3",
    ".mp4", ".avi", ".mov", ".wmv", ".zip", ".tar", ".gz", ".rar", ".7z", ".pdf", ".doc",
    ".docx", ".xls", ".xlsx", ".class", ".jar", ".war",
];

/// Files whose content may be embedded.
pub const TEXT_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".vue", ".svelte", ".py", ".rb", ".php", ".java", ".kt",
    ".swift", ".go", ".rs", ".cpp", ".c", ".h", ".hpp", ".cs", ".vb", ".fs", ".clj", ".scala",
    ".html", ".htm", ".css", ".scss", ".sass", ".less", ".json", ".xml", ".yaml", ".yml",
    ".toml", ".md", ".txt", ".rst", ".adoc", ".sql", ".graphql", ".gql", ".sh", ".bash", ".zsh",
    ".fish", ".ps1", ".bat", ".cmd", ".pl", ".mjs", ".gitignore", ".gitattributes",
    ".editorconfig", ".env",
];

/// Kept regardless of the extension allowlist.
pub const IMPORTANT_FILES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "tsconfig.json",
    "jsconfig.json",
    "webpack.config.js",
    "vite.config.js",
    "babel.config.js",
    ".babelrc",
    "eslint.config.js",
    ".eslintrc",
    ".eslintrc.json",
    ".prettierrc",
    ".prettierrc.json",
    "tailwind.config.js",
    "postcss.config.js",
    "Dockerfile",
    "docker-compose.yml",
    "Gemfile",
    "requirements.txt",
    "Cargo.toml",
    "go.mod",
    "pom.xml",
    "README.md",
    "LICENSE",
    ".gitignore",
    ".env.example",
];

pub fn should_skip_directory(name: &str) -> bool {
    SKIP_DIRECTORIES.contains(&name) || name.starts_with('.')
}

/// Names that no generated script can spell on a single line.
pub fn has_line_break(name: &str) -> bool {
    name.contains(['\n', '\r'])
}

pub fn is_binary(name: &str) -> bool {
    BINARY_EXTENSIONS.contains(&extension_of(name).as_str())
}

pub fn is_text_extension(extension: &str) -> bool {
    TEXT_EXTENSIONS.contains(&extension)
}

pub fn is_important(name: &str) -> bool {
    IMPORTANT_FILES.contains(&name)
}

/// Whether a file named `name` belongs in the snapshot.
///
/// With `directories_only` every non-binary file is kept so the counts stay
/// honest; otherwise a non-empty allowlist restricts by extension.
pub fn should_include_file(name: &str, settings: &GenerationSettings) -> bool {
    if SKIP_FILES.contains(&name) || is_binary(name) {
        return false;
    }
    if settings.directories_only || settings.supported_file_types.is_empty() {
        return true;
    }

    let extension = extension_of(name);
    let allowed = settings
        .supported_file_types
        .iter()
        .any(|allowed| normalize_allowlist_entry(allowed) == extension);
    allowed || is_important(name)
}

/// `SH`, `sh` and `.sh` all mean `.sh`.
fn normalize_allowlist_entry(entry: &str) -> String {
    let entry = entry.trim().to_ascii_lowercase();
    if entry.starts_with('.') {
        entry
    } else {
        format!(".{entry}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_breaks_in_names_are_detected() {
        assert!(has_line_break("a\nb.txt"));
        assert!(has_line_break("a\r"));
        assert!(!has_line_break("notes:2024.txt"));
    }

    #[test]
    fn skips_vcs_and_dot_directories() {
        assert!(should_skip_directory("node_modules"));
        assert!(should_skip_directory(".cache"));
        assert!(!should_skip_directory("src"));
    }

    #[test]
    fn binaries_are_never_included() {
        let settings = GenerationSettings {
            directories_only: true,
            ..Default::default()
        };
        assert!(!should_include_file("logo.PNG", &settings));
        assert!(should_include_file("notes.txt", &settings));
    }

    #[test]
    fn allowlist_filters_by_extension() {
        let settings = GenerationSettings::default();
        assert!(should_include_file("run.sh", &settings));
        assert!(!should_include_file("notes.txt", &settings));
        assert!(should_include_file("Cargo.toml", &settings));
        assert!(!should_include_file(".DS_Store", &settings));
    }

    #[test]
    fn allowlist_entries_are_normalized() {
        let settings = GenerationSettings {
            supported_file_types: vec!["TXT".into(), " md ".into()],
            ..Default::default()
        };
        assert!(should_include_file("a.txt", &settings));
        assert!(should_include_file("b.MD", &settings));
        assert!(!should_include_file("c.rs", &settings));
    }

    #[test]
    fn dotfiles_count_as_text() {
        assert!(is_text_extension(&extension_of(".gitignore")));
        assert!(!is_text_extension(&extension_of("image.png")));
    }
}
