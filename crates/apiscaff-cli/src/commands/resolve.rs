//! Implementation of the `apiscaff resolve` command.

use serde_json::json;
use tracing::instrument;

use apiscaff_core::domain::ManifestLookup;

use crate::{
    cli::ResolveArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Resolve a descriptor or GAV and print where its API document lives.
///
/// An archive without a usable API document is reported, not treated as a
/// failure.
#[instrument(skip_all)]
pub fn execute(args: ResolveArgs, output: OutputManager) -> CliResult<()> {
    let resolver = super::resolver(super::archive_mode(args.extract_to.clone()));

    let lookup = match &args.descriptor {
        Some(descriptor) => resolver.locate_descriptor(descriptor)?,
        None => {
            let coordinate = super::coordinate(&args.gav)?.ok_or_else(|| CliError::InvalidInput {
                message: "give a descriptor or --group-id, --artifact-id and --api-version".into(),
            })?;
            resolver.locate(&coordinate)?
        }
    };

    if output.is_json() {
        output.json(&match &lookup {
            ManifestLookup::Found(reference) => json!({
                "found": true,
                "reference": reference.uri(),
            }),
            ManifestLookup::Absent(reason) => json!({
                "found": false,
                "reason": reason.to_string(),
                "corrupt": reason.is_corrupt(),
            }),
        })?;
        return Ok(());
    }

    match lookup {
        ManifestLookup::Found(reference) => {
            output.print(&reference.uri())?;
        }
        ManifestLookup::Absent(reason) => {
            output.warning(&format!("No API document located: {reason}"))?;
        }
    }
    Ok(())
}
