use crate::domain::encoding::{
    escape_batch, escape_powershell_single, quote_batch, quote_powershell,
};

use super::ScriptSyntax;

// ── cmd.exe ──────────────────────────────────────────────────────────────────

/// Batch files: no multi-line literals, so content is appended one line at a
/// time after truncating the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSyntax;

impl ScriptSyntax for BatchSyntax {
    fn create_directory(&self, path: &str) -> String {
        let target = quote_batch(path);
        format!("if not exist {target} mkdir {target}")
    }

    fn create_empty_file(&self, path: &str) -> String {
        format!("type nul > {}", quote_batch(path))
    }

    fn write_content(&self, path: &str, content: &str) -> Vec<String> {
        let target = quote_batch(path);
        let body = content.strip_suffix('\n').unwrap_or(content);

        let mut lines = Vec::with_capacity(body.matches('\n').count() + 2);
        lines.push(format!("type nul > {target}"));
        for line in body.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            // `echo(` prints an empty line for empty input instead of
            // "ECHO is off."
            lines.push(format!(">>{target} echo({}", escape_batch(line)));
        }
        lines
    }

    fn completion(&self, message: &str) -> String {
        format!("echo {}", escape_batch(message))
    }
}

// ── PowerShell ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct PowerShellSyntax;

impl ScriptSyntax for PowerShellSyntax {
    fn create_directory(&self, path: &str) -> String {
        format!(
            "New-Item -ItemType Directory -Force -Path {} | Out-Null",
            quote_powershell(path)
        )
    }

    fn create_empty_file(&self, path: &str) -> String {
        format!(
            "New-Item -ItemType File -Force -Path {} | Out-Null",
            quote_powershell(path)
        )
    }

    /// .NET resolves relative paths against the process directory, not the
    /// PowerShell location, so the path is resolved first. The explicit
    /// encoding keeps the output free of a BOM.
    fn write_content(&self, path: &str, content: &str) -> Vec<String> {
        vec![format!(
            "[IO.File]::WriteAllText($ExecutionContext.SessionState.Path.GetUnresolvedProviderPathFromPSPath({}), '{}', [Text.UTF8Encoding]::new($false))",
            quote_powershell(path),
            escape_powershell_single(content)
        )]
    }

    fn completion(&self, message: &str) -> String {
        format!("Write-Host {}", quote_powershell(message))
    }
}
