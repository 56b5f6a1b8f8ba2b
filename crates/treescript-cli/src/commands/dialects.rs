//! Implementation of the `treescript dialects` command.

use serde::Serialize;

use treescript_core::domain::{DialectDescriptor, FormatRegistry, PlatformScope};

use crate::{
    cli::{DialectsArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

/// Serialisable view of one registry entry.
#[derive(Debug, Serialize)]
struct DialectRow {
    id: &'static str,
    name: &'static str,
    extension: &'static str,
    shebang: Option<&'static str>,
    line_ending: &'static str,
    platforms: Vec<&'static str>,
}

impl From<&'static DialectDescriptor> for DialectRow {
    fn from(d: &'static DialectDescriptor) -> Self {
        Self {
            id: d.id.as_str(),
            name: d.display_name,
            extension: d.extension,
            shebang: d.shebang,
            line_ending: d.line_ending.as_str(),
            platforms: d.platforms.iter().map(PlatformScope::as_str).collect(),
        }
    }
}

pub fn execute(args: DialectsArgs, output: OutputManager) -> CliResult<()> {
    let rows = rows(FormatRegistry::builtin(), args.platform.map(PlatformScope::from));

    match args.format {
        ListFormat::Table => {
            let title = match args.platform {
                Some(p) => format!("Dialects for {}:", PlatformScope::from(p).label()),
                None => "Available Dialects:".to_string(),
            };
            output.header(&title)?;
            output.print(&format!(
                "  {:<12} {:<12} {:<6} {:<18} {}",
                "ID", "NAME", "EXT", "SHEBANG", "PLATFORMS"
            ))?;
            for row in &rows {
                output.print(&format!(
                    "  {:<12} {:<12} {:<6} {:<18} {}",
                    row.id,
                    row.name,
                    row.extension,
                    row.shebang.unwrap_or("-"),
                    row.platforms.join(", ")
                ))?;
            }
        }
        ListFormat::List => {
            // Bypasses quiet mode: the list is the output.
            let ids: Vec<&str> = rows.iter().map(|r| r.id).collect();
            output.raw(&format!("{}\n", ids.join("\n")))?;
        }
        ListFormat::Json => output.json(&rows)?,
    }

    Ok(())
}

/// Registry order, optionally filtered to one platform scope.
fn rows(registry: &FormatRegistry, platform: Option<PlatformScope>) -> Vec<DialectRow> {
    registry
        .all()
        .filter(|d| platform.is_none_or(|p| d.is_offered_for(p)))
        .map(DialectRow::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(platform: Option<PlatformScope>) -> Vec<&'static str> {
        rows(FormatRegistry::builtin(), platform)
            .into_iter()
            .map(|r| r.id)
            .collect()
    }

    #[test]
    fn unfiltered_lists_all_nine() {
        assert_eq!(ids(None).len(), 9);
    }

    #[test]
    fn windows_filter() {
        assert_eq!(
            ids(Some(PlatformScope::Windows)),
            vec!["powershell", "batch", "python", "nodejs", "ruby", "perl"]
        );
    }

    #[test]
    fn rows_carry_shebang_and_extension() {
        let all = rows(FormatRegistry::builtin(), Some(PlatformScope::Linux));
        let bash = all.iter().find(|r| r.id == "bash").unwrap();
        assert_eq!(bash.extension, ".sh");
        assert_eq!(bash.shebang, Some("#!/bin/bash"));
    }
}
