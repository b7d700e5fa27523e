//! Implementation of the `apiscaff create` command.
//!
//! Responsibility: translate CLI arguments and configuration into a
//! [`ScaffoldRequest`], run the core scaffold service over real adapters, and
//! display the summary.

use std::path::PathBuf;

use serde_json::json;
use tracing::{debug, info, instrument};

use apiscaff_adapters::{
    GlobFileMatcher, LocalFilesystem, ProcessEngine, SpecFileParser, XmlDocumentParser,
};
use apiscaff_core::{
    application::{AccessoriesAssembler, OutputDirs, RunSummary, ScaffoldRequest, ScaffoldService},
    domain::{GlobQuery, RuntimeEdition, ScaffolderContext, SpecSource},
    error::ScaffError,
};

use crate::{
    cli::CreateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `apiscaff create` command.
///
/// Dispatch sequence:
/// 1. Validate the coordinate flags and runtime edition
/// 2. Assemble the scaffolding configuration
/// 3. Build the request from flags, configuration and defaults
/// 4. Run the scaffold service and report what was written
#[instrument(skip_all, fields(base = %args.base_dir.display()))]
pub fn execute(args: CreateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Input validation happens before anything touches the repository.
    let coordinate = super::coordinate(&args.gav)?;
    let edition: RuntimeEdition = args
        .runtime_edition
        .parse()
        .map_err(ScaffError::from)?;

    // 2. Scaffolding configuration
    let filesystem = LocalFilesystem::new();
    let defaults = config.accessories.to_accessories().map_err(CliError::config)?;
    let accessories = AccessoriesAssembler::new(defaults)
        .assemble(&filesystem, args.scaffolding_config.as_deref())?;

    // 3. Engine and request
    let program = args
        .engine
        .clone()
        .or_else(|| config.engine.program.clone())
        .ok_or(CliError::EngineNotConfigured)?;
    let engine_args = if args.engine_args.is_empty() {
        config.engine.args.clone()
    } else {
        args.engine_args.clone()
    };
    debug!(program = %program.display(), args = ?engine_args, "Engine selected");

    let base = args.base_dir.as_path();
    let extract_to = args
        .extract_to
        .clone()
        .or_else(|| config.repository.extract_dir.as_ref().map(|p| base.join(p)));

    let request = ScaffoldRequest {
        source: SpecSource::select(coordinate, spec_query(&args)),
        existing_documents: documents_query(&args),
        domain: args.domain_dir.clone().map(GlobQuery::domain_descriptors),
        accessories,
        context: ScaffolderContext::new(edition, args.min_runtime_version.clone()),
        output: output_dirs(&args, &config),
    };

    let service = ScaffoldService::new(
        Box::new(filesystem),
        Box::new(GlobFileMatcher::new()),
        super::resolver(super::archive_mode(extract_to)),
        Box::new(SpecFileParser::new()),
        Box::new(XmlDocumentParser::new()),
        Box::new(ProcessEngine::new(program).with_args(engine_args)),
    );

    // 4. Run
    if !output.is_json() {
        output.header(&format!("Scaffolding from {}", request.source))?;
    }
    let summary = service.scaffold(&request)?;
    info!(
        specifications = summary.specifications,
        written = summary.written.len(),
        "Create finished"
    );

    report(&summary, &output)
}

fn spec_query(args: &CreateArgs) -> GlobQuery {
    let root = args.spec_dir.clone().unwrap_or_else(|| args.base_dir.clone());
    with_patterns(GlobQuery::spec_files(root), &args.spec_includes, &args.spec_excludes)
}

fn documents_query(args: &CreateArgs) -> GlobQuery {
    let root = args.docs_dir.clone().unwrap_or_else(|| args.base_dir.clone());
    with_patterns(
        GlobQuery::config_documents(root),
        &args.docs_includes,
        &args.docs_excludes,
    )
}

/// Explicit includes replace the defaults; excludes are always applied.
fn with_patterns(query: GlobQuery, includes: &[String], excludes: &[String]) -> GlobQuery {
    let query = if includes.is_empty() {
        query
    } else {
        query.with_includes(includes.iter().cloned())
    };
    query.with_excludes(excludes.iter().cloned())
}

/// Flags win over configuration; configured paths are relative to the base.
fn output_dirs(args: &CreateArgs, config: &AppConfig) -> OutputDirs {
    let base = args.base_dir.as_path();
    let defaults = OutputDirs::under(base);
    let pick = |flag: &Option<PathBuf>, configured: &Option<PathBuf>, default: PathBuf| {
        flag.clone()
            .or_else(|| configured.as_ref().map(|p| base.join(p)))
            .unwrap_or(default)
    };

    OutputDirs {
        configs: pick(&args.config_output, &config.paths.config_output, defaults.configs),
        resources: pick(
            &args.resources_output,
            &config.paths.resources_output,
            defaults.resources,
        ),
    }
}

fn report(summary: &RunSummary, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&json!({
            "specifications": summary.specifications,
            "skipped": summary.skipped,
            "written": summary.written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        }))?;
        return Ok(());
    }

    if summary.skipped > 0 {
        output.warning(&format!(
            "Skipped {} specification(s) that could not be parsed",
            summary.skipped
        ))?;
    }
    if summary.specifications == 0 {
        output.warning("No API specification found, nothing was generated")?;
        return Ok(());
    }

    for path in &summary.written {
        output.print(&format!("  {}", path.display()))?;
    }
    output.success(&format!(
        "Scaffolded {} API specification(s), {} file(s) written",
        summary.specifications,
        summary.written.len()
    ))?;
    Ok(())
}
