//! Companion README for a generated script.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::{FileSystemSnapshot, FormatRegistry, GeneratedArtifact, GenerationSettings};

/// Artifact name of every README.
pub const README_NAME: &str = "README";

#[derive(Debug, Clone, Copy)]
pub struct ReadmeSynthesizer {
    registry: &'static FormatRegistry,
}

impl Default for ReadmeSynthesizer {
    fn default() -> Self {
        Self::new(FormatRegistry::builtin())
    }
}

impl ReadmeSynthesizer {
    pub fn new(registry: &'static FormatRegistry) -> Self {
        Self { registry }
    }

    pub fn synthesize(
        &self,
        snapshot: &FileSystemSnapshot,
        settings: &GenerationSettings,
    ) -> GeneratedArtifact {
        self.synthesize_at(snapshot, settings, Utc::now())
    }

    pub fn synthesize_at(
        &self,
        snapshot: &FileSystemSnapshot,
        settings: &GenerationSettings,
        generated_at: DateTime<Utc>,
    ) -> GeneratedArtifact {
        let descriptor = self.registry.descriptor(settings.dialect);
        let script_file = format!("{}{}", settings.script_name, descriptor.extension);
        let yes_no = |flag: bool| if flag { "Yes" } else { "No" };

        let mut lines: Vec<String> = vec![
            "# Scaffold Script".into(),
            String::new(),
            "This directory contains a scaffold script generated by treescript.".into(),
            String::new(),
            "## Project Information".into(),
            String::new(),
            format!("- **Source Directory:** `{}`", snapshot.root().display()),
            format!("- **Target Platform:** {}", settings.platform.label()),
            format!(
                "- **Script Format:** {} (`{}`)",
                descriptor.display_name, script_file
            ),
            format!(
                "- **Generated:** {}",
                generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
            String::new(),
            "## Structure Summary".into(),
            String::new(),
            format!("- **Directories:** {}", snapshot.directory_count()),
            format!("- **Files:** {}", snapshot.file_count()),
            format!("- **Total Size:** {}", format_size(snapshot.total_size())),
            format!(
                "- **Include Content:** {}",
                yes_no(settings.include_content && !settings.directories_only)
            ),
            String::new(),
            "## Usage".into(),
            String::new(),
            "### Prerequisites".into(),
            String::new(),
            format!("- {}", descriptor.prerequisite),
            String::new(),
            "### Execution".into(),
            String::new(),
            format!("```{}", descriptor.run_fence),
        ];
        lines.extend(
            descriptor
                .run_commands
                .iter()
                .map(|cmd| cmd.replace("{script}", &script_file)),
        );
        lines.push("```".into());
        lines.push(String::new());

        lines.push("## Directory Structure".into());
        lines.push(String::new());
        lines.push("```".into());
        lines.extend(render_tree(snapshot));
        lines.push("```".into());
        lines.push(String::new());
        lines.push("---".into());
        lines.push("*Generated by treescript*".into());

        GeneratedArtifact::readme(README_NAME, lines.join("\n"))
    }
}

/// `0 B`, `512 B`, `1.5 KB`, `2 MB`: 1024-based, one decimal, trailing `.0`
/// dropped.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[unit])
    } else {
        format!("{:.1} {}", rounded, UNITS[unit])
    }
}

// ── Tree rendering ───────────────────────────────────────────────────────────

/// Directory or file; files simply never get children.
#[derive(Debug, Default)]
struct TreeNode {
    children: BTreeMap<String, TreeNode>,
    is_file: bool,
}

impl TreeNode {
    /// Walk (and create) the directory chain for `segments`.
    fn descend<'a, I>(&mut self, segments: I) -> &mut TreeNode
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = self;
        for segment in segments {
            current = current.children.entry(segment.to_string()).or_default();
            current.is_file = false;
        }
        current
    }
}

/// ASCII tree lines for the snapshot, directories marked with a trailing `/`.
pub fn render_tree(snapshot: &FileSystemSnapshot) -> Vec<String> {
    let mut root = TreeNode::default();

    for dir in snapshot.directories() {
        root.descend(dir.relative_path.split('/'));
    }
    for file in snapshot.files() {
        let parent = root.descend(file.parent_path.split('/').filter(|s| !s.is_empty()));
        parent
            .children
            .entry(file.name.clone())
            .or_insert_with(|| TreeNode {
                is_file: true,
                ..Default::default()
            });
    }

    let mut out = Vec::new();
    render_dir(&root, "", &mut out);
    out
}

fn render_dir(dir: &TreeNode, prefix: &str, out: &mut Vec<String>) {
    let last = dir.children.len().saturating_sub(1);
    for (index, (name, node)) in dir.children.iter().enumerate() {
        let is_last = index == last;
        let connector = if is_last { "└── " } else { "├── " };
        if node.is_file {
            out.push(format!("{prefix}{connector}{name}"));
            continue;
        }
        out.push(format!("{prefix}{connector}{name}/"));
        let continuation = if is_last { "    " } else { "│   " };
        render_dir(node, &format!("{prefix}{continuation}"), out);
    }
}
