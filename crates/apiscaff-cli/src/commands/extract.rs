//! Implementation of the `apiscaff extract` command.

use serde_json::json;
use tracing::{info, instrument};

use apiscaff_adapters::ZipArchiveLocator;
use apiscaff_core::application::ports::ArchiveLocator;

use crate::{cli::ExtractArgs, error::CliResult, output::OutputManager};

/// Unpack every entry of an archive into the output directory.
#[instrument(skip_all, fields(archive = %args.archive.display()))]
pub fn execute(args: ExtractArgs, output: OutputManager) -> CliResult<()> {
    let written = ZipArchiveLocator::new().extract_all(&args.archive, &args.output)?;
    info!(files = written.len(), "Extract finished");

    if output.is_json() {
        output.json(&json!({
            "files": written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        }))?;
        return Ok(());
    }

    for path in &written {
        output.print(&format!("  {}", path.display()))?;
    }
    output.success(&format!(
        "Extracted {} file(s) into {}",
        written.len(),
        args.output.display()
    ))?;
    Ok(())
}
