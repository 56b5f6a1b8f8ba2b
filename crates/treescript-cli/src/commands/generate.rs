//! Implementation of the `treescript generate` command.
//!
//! Responsibility: merge CLI flags with config into `GenerationSettings`,
//! drive the generation service through the local adapters, and report what
//! was written. No script synthesis happens here.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info, instrument};

use treescript_adapters::{LocalExporter, LocalSnapshotSource};
use treescript_core::{
    application::{
        GenerationService,
        ports::{ArtifactSink, ExportOptions, SnapshotSource},
        services::readme_synthesizer::{README_NAME, format_size},
    },
    domain::{DialectId, FileSystemSnapshot, FormatRegistry, GenerationSettings, PlatformScope},
    error::TreescriptError,
};

use crate::{
    cli::{GenerateArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `treescript generate` command.
///
/// Dispatch sequence:
/// 1. Merge flags and config into validated settings
/// 2. `--all`: one snapshot, every dialect for the platform
/// 3. `--dry-run`: scan and summarise only
/// 4. No `--output`: print the script to stdout
/// 5. Otherwise ingest, generate and export through the service
#[instrument(skip_all, fields(dir = %args.dir.display()))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = GenerationService::default();
    let settings = build_settings(&args, &config, service.registry())?;

    debug!(
        dialect = %settings.dialect,
        platform = %settings.platform,
        include_content = settings.include_content,
        directories_only = settings.directories_only,
        "Settings resolved"
    );

    if args.all {
        return generate_all(&args, &settings, &service, &global, &output);
    }

    service
        .registry()
        .resolve_for(settings.dialect, settings.platform)
        .map_err(TreescriptError::from)?;

    let source = LocalSnapshotSource::new();

    if args.dry_run {
        let snapshot = source.snapshot(&args.dir, &settings)?;
        let planned = planned_files(&settings, &[settings.dialect], service.registry());
        return dry_run(&snapshot, &settings, &[settings.dialect], &planned, &args, &output);
    }

    let Some(out_dir) = args.output.as_deref() else {
        // stdout mode: the script only.
        let settings = GenerationSettings {
            include_readme: false,
            ..settings
        };
        let snapshot = source.snapshot(&args.dir, &settings)?;
        let artifacts = service.generate(&snapshot, &settings)?;
        for artifact in &artifacts {
            output.raw(artifact.content())?;
        }
        return Ok(());
    };

    let planned = planned_files(&settings, &[settings.dialect], service.registry());
    let overwrite = resolve_overwrite(&args, &global, &output, out_dir, &planned)?;

    info!(output = %out_dir.display(), "Scaffold started");
    let written = service.scaffold(
        &args.dir,
        &settings,
        &source,
        &LocalExporter::new(out_dir),
        &ExportOptions { overwrite },
    )?;

    report(&output, &written, &[])
}

/// `--all`: fan one snapshot out to every dialect offered for the platform.
fn generate_all(
    args: &GenerateArgs,
    settings: &GenerationSettings,
    service: &GenerationService,
    global: &GlobalArgs,
    output: &OutputManager,
) -> CliResult<()> {
    let out_dir = args.output.as_deref().ok_or_else(|| CliError::InvalidInput {
        message: "--all writes one file per dialect and needs --output".into(),
        source: None,
    })?;

    let snapshot = LocalSnapshotSource::new().snapshot(&args.dir, settings)?;
    let dialects = service.registry().supported_dialects(settings.platform);
    let planned = planned_files(settings, &dialects, service.registry());

    if args.dry_run {
        return dry_run(&snapshot, settings, &dialects, &planned, args, output);
    }

    let overwrite = resolve_overwrite(args, global, output, out_dir, &planned)?;

    let spinner = output.spinner(&format!("Generating {} dialects...", dialects.len()));
    let outcomes = service.generate_all(&snapshot, settings);
    spinner.finish_and_clear();

    let total = outcomes.len();
    let mut artifacts = Vec::with_capacity(total + 1);
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(artifact) => artifacts.push(artifact),
            Err(e) => failures.push(Failure {
                dialect: outcome.dialect.to_string(),
                error: e.to_string(),
            }),
        }
    }

    if settings.include_readme && !artifacts.is_empty() {
        artifacts.push(service.readme(&snapshot, settings));
    }

    let written = if artifacts.is_empty() {
        Vec::new()
    } else {
        LocalExporter::new(out_dir)
            .export(&artifacts, &ExportOptions { overwrite })
            .with_cli_context(|| "exporting artifacts")?
    };

    report(output, &written, &failures)?;

    if failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::PartialFailure {
            failed: failures.len(),
            total,
        })
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Flags first, then config. An omitted dialect or platform adapts to the
/// one given explicitly so `-p windows` alone does not fail on bash.
fn build_settings(
    args: &GenerateArgs,
    config: &AppConfig,
    registry: &FormatRegistry,
) -> CliResult<GenerationSettings> {
    let (dialect, platform) = resolve_target(
        args.dialect.map(DialectId::from),
        args.platform.map(PlatformScope::from),
        config,
        registry,
    )?;

    let file_types = if args.file_types.is_empty() {
        config.ingestion.supported_file_types.clone()
    } else {
        args.file_types.clone()
    };

    let mut builder = GenerationSettings::builder()
        .dialect(dialect)
        .platform(platform)
        .include_content(
            !args.no_content && (args.include_content || config.defaults.include_content),
        )
        .directories_only(args.directories_only)
        .add_comments(!args.no_comments && config.defaults.add_comments)
        .include_readme(!args.no_readme && config.defaults.include_readme)
        .script_name(
            args.name
                .clone()
                .unwrap_or_else(|| config.defaults.script_name.clone()),
        )
        .supported_file_types(file_types);

    for (key, value) in &args.vars {
        builder = builder.variable(key, value);
    }

    builder
        .build()
        .map_err(|e| CliError::Core(TreescriptError::from(e)))
}

fn resolve_target(
    dialect: Option<DialectId>,
    platform: Option<PlatformScope>,
    config: &AppConfig,
    registry: &FormatRegistry,
) -> CliResult<(DialectId, PlatformScope)> {
    let configured_dialect = || {
        DialectId::from_str(&config.defaults.dialect).map_err(|e| CliError::ConfigError {
            message: format!("defaults.dialect: {e}"),
            source: Some(Box::new(e)),
        })
    };
    let configured_platform = || {
        PlatformScope::from_str(&config.defaults.platform).map_err(|e| CliError::ConfigError {
            message: format!("defaults.platform: {e}"),
            source: Some(Box::new(e)),
        })
    };
    let offered = |d: DialectId, p: PlatformScope| registry.descriptor(d).is_offered_for(p);

    match (dialect, platform) {
        // Both explicit: incompatibility is reported by the registry later.
        (Some(d), Some(p)) => Ok((d, p)),
        (Some(d), None) => {
            let p = configured_platform()?;
            if offered(d, p) {
                return Ok((d, p));
            }
            let fallback = PlatformScope::ALL
                .into_iter()
                .find(|scope| offered(d, *scope))
                .unwrap_or(p);
            Ok((d, fallback))
        }
        (None, Some(p)) => {
            let d = configured_dialect()?;
            if offered(d, p) {
                return Ok((d, p));
            }
            let fallback = registry
                .supported_dialects(p)
                .first()
                .copied()
                .unwrap_or(d);
            Ok((fallback, p))
        }
        (None, None) => Ok((configured_dialect()?, configured_platform()?)),
    }
}

/// File names the run would create in the output directory.
fn planned_files(
    settings: &GenerationSettings,
    dialects: &[DialectId],
    registry: &FormatRegistry,
) -> Vec<String> {
    let mut files: Vec<String> = dialects
        .iter()
        .map(|d| format!("{}{}", settings.script_name, registry.descriptor(*d).extension))
        .collect();
    if settings.include_readme {
        files.push(format!("{README_NAME}.md"));
    }
    files
}

// ── Overwrite handling ────────────────────────────────────────────────────────

/// `--force` wins; otherwise an interactive session is asked once when a
/// planned file already exists. A refusal cancels the run.
fn resolve_overwrite(
    args: &GenerateArgs,
    global: &GlobalArgs,
    output: &OutputManager,
    out_dir: &Path,
    planned: &[String],
) -> CliResult<bool> {
    if args.force {
        return Ok(true);
    }

    let existing: Vec<PathBuf> = planned
        .iter()
        .map(|name| out_dir.join(name))
        .filter(|path| path.exists())
        .collect();

    if existing.is_empty() || args.yes || global.quiet || !output.is_interactive() {
        // The exporter reports the conflict if there is one.
        return Ok(false);
    }

    if confirm_overwrite(&existing)? {
        Ok(true)
    } else {
        Err(CliError::Cancelled)
    }
}

#[cfg(feature = "interactive")]
fn confirm_overwrite(existing: &[PathBuf]) -> CliResult<bool> {
    let listing = existing
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    dialoguer::Confirm::new()
        .with_prompt(format!("These files already exist:\n{listing}\nOverwrite them?"))
        .default(false)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: format!("confirmation prompt failed: {e}"),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm_overwrite(_existing: &[PathBuf]) -> CliResult<bool> {
    Ok(false)
}

// ── Reporting ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Failure {
    dialect: String,
    error: String,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    written: Vec<String>,
    failed: &'a [Failure],
}

fn report(output: &OutputManager, written: &[PathBuf], failures: &[Failure]) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(&Report {
            written: written.iter().map(|p| p.display().to_string()).collect(),
            failed: failures,
        })?;
        return Ok(());
    }

    for failure in failures {
        output.error(&format!("{}: {}", failure.dialect, failure.error))?;
    }
    for path in written {
        output.success(&format!("Wrote {}", path.display()))?;
    }
    info!(written = written.len(), failed = failures.len(), "Generate finished");
    Ok(())
}

#[derive(Debug, Serialize)]
struct DryRun<'a> {
    source: String,
    platform: &'a str,
    dialects: Vec<&'static str>,
    directories: usize,
    files: usize,
    total_size: u64,
    destination: String,
    would_write: &'a [String],
}

fn dry_run(
    snapshot: &FileSystemSnapshot,
    settings: &GenerationSettings,
    dialects: &[DialectId],
    planned: &[String],
    args: &GenerateArgs,
    output: &OutputManager,
) -> CliResult<()> {
    let destination = args
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".into());
    let summary = DryRun {
        source: snapshot.root().display().to_string(),
        platform: settings.platform.as_str(),
        dialects: dialects.iter().map(DialectId::as_str).collect(),
        directories: snapshot.directory_count(),
        files: snapshot.file_count(),
        total_size: snapshot.total_size(),
        destination,
        would_write: planned,
    };

    if output.format() == OutputFormat::Json {
        output.json(&summary)?;
        return Ok(());
    }

    output.info("Dry run: nothing will be written")?;
    output.print(&format!("  Source:      {}", summary.source))?;
    output.print(&format!("  Platform:    {}", settings.platform.label()))?;
    output.print(&format!("  Dialects:    {}", summary.dialects.join(", ")))?;
    output.print(&format!("  Directories: {}", summary.directories))?;
    output.print(&format!("  Files:       {}", summary.files))?;
    output.print(&format!("  Total size:  {}", format_size(summary.total_size)))?;
    output.print(&format!("  Destination: {}", summary.destination))?;
    if args.output.is_some() {
        for name in planned {
            output.print(&format!("    {name}"))?;
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(extra: &[&str]) -> GenerateArgs {
        let mut argv = vec!["treescript", "generate", "."];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Generate(args) => args,
            other => panic!("expected Generate, got {other:?}"),
        }
    }

    fn settings(extra: &[&str]) -> GenerationSettings {
        build_settings(&parse(extra), &AppConfig::default(), FormatRegistry::builtin()).unwrap()
    }

    #[test]
    fn defaults_come_from_config() {
        let s = settings(&[]);
        assert_eq!(s.dialect, DialectId::Bash);
        assert_eq!(s.platform, PlatformScope::Linux);
        assert!(s.add_comments);
        assert!(s.include_readme);
        assert_eq!(s.script_name, "scaffold");
    }

    #[test]
    fn flags_override_config() {
        let s = settings(&[
            "--no-comments",
            "--no-readme",
            "--include-content",
            "-n",
            "setup",
            "--var",
            "team=core",
        ]);
        assert!(!s.add_comments);
        assert!(!s.include_readme);
        assert!(s.include_content);
        assert_eq!(s.script_name, "setup");
        assert_eq!(s.template_variables.get("team").map(String::as_str), Some("core"));
    }

    #[test]
    fn platform_alone_picks_an_offered_dialect() {
        let s = settings(&["-p", "windows"]);
        assert_eq!(s.platform, PlatformScope::Windows);
        assert_eq!(s.dialect, DialectId::PowerShell);
    }

    #[test]
    fn dialect_alone_picks_an_offering_platform() {
        let s = settings(&["-d", "batch"]);
        assert_eq!(s.dialect, DialectId::Batch);
        assert_eq!(s.platform, PlatformScope::Windows);

        let s = settings(&["-d", "python"]);
        assert_eq!(s.platform, PlatformScope::Linux);
    }

    #[test]
    fn explicit_mismatch_is_kept_for_the_registry_to_reject() {
        let s = settings(&["-d", "bash", "-p", "windows"]);
        assert!(
            FormatRegistry::builtin()
                .resolve_for(s.dialect, s.platform)
                .is_err()
        );
    }

    #[test]
    fn bad_config_dialect_is_a_config_error() {
        let mut config = AppConfig::default();
        config.defaults.dialect = "cobol".into();
        let err = build_settings(&parse(&[]), &config, FormatRegistry::builtin()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn no_content_overrides_config() {
        let mut config = AppConfig::default();
        config.defaults.include_content = true;
        let with = |extra: &[&str]| {
            build_settings(&parse(extra), &config, FormatRegistry::builtin())
                .unwrap()
                .include_content
        };
        assert!(with(&[]));
        assert!(!with(&["--no-content"]));
    }

    #[test]
    fn invalid_name_is_a_user_error() {
        let err = build_settings(
            &parse(&["-n", "bad name"]),
            &AppConfig::default(),
            FormatRegistry::builtin(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn types_flag_replaces_allowlist() {
        let s = settings(&["-t", "md,txt"]);
        assert_eq!(s.supported_file_types, vec!["md", "txt"]);
    }

    #[test]
    fn planned_files_cover_every_dialect_and_readme() {
        let s = settings(&["-p", "cross-platform"]);
        let registry = FormatRegistry::builtin();
        let dialects = registry.supported_dialects(s.platform);
        assert_eq!(
            planned_files(&s, &dialects, registry),
            vec![
                "scaffold.py",
                "scaffold.js",
                "scaffold.rb",
                "scaffold.pl",
                "README.md"
            ]
        );
    }
}
