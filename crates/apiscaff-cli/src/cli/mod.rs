//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "apiscaff",
    bin_name = "apiscaff",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold integration flows from API specifications",
    long_about = "apiscaff discovers API specifications (local files or a packaged API \
                  resolved from a repository), hands each one to a generation engine and \
                  writes the configuration and resource documents it produces.",
    after_help = "EXAMPLES:\n\
        \x20 apiscaff create --engine ./scaffolder\n\
        \x20 apiscaff create --group-id com.acme --artifact-id orders --api-version 1.0.0\n\
        \x20 apiscaff resolve resource::com.acme:orders:1.0.0:fat-raml:zip\n\
        \x20 apiscaff extract orders-1.0.0-fat-raml.zip -o target/api",
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
    /// Run a full scaffold.
    #[command(
        visible_alias = "c",
        about = "Generate flows for every discovered API specification",
        after_help = "EXAMPLES:\n\
            \x20 apiscaff create\n\
            \x20 apiscaff create --base-dir ./orders-app --domain-dir ./domain\n\
            \x20 apiscaff create --spec-include 'specs/**/*.raml' --spec-exclude 'specs/drafts/**'\n\
            \x20 apiscaff create --scaffolding-config scaffolding.json --runtime-edition CE"
    )]
    Create(CreateArgs),

    /// Resolve a packaged API.
    #[command(
        visible_alias = "r",
        about = "Resolve a coordinate and print the API document it packages",
        after_help = "EXAMPLES:\n\
            \x20 apiscaff resolve resource::com.acme:orders:1.0.0:fat-raml:zip\n\
            \x20 apiscaff resolve --group-id com.acme --artifact-id orders --api-version 1.0.0\n\
            \x20 apiscaff resolve --group-id com.acme --artifact-id orders --api-version 1.0.0 --extract-to target/api"
    )]
    Resolve(ResolveArgs),

    /// Unpack an archive.
    #[command(
        visible_alias = "x",
        about = "Extract an API archive, renaming the API description to api.raml",
        after_help = "EXAMPLES:\n\
            \x20 apiscaff extract orders-1.0.0-fat-raml.zip\n\
            \x20 apiscaff extract orders-1.0.0-fat-raml.zip --output target/api"
    )]
    Extract(ExtractArgs),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Discrete group/artifact/version of a packaged API.
///
/// All three or none: a partial set is rejected before anything is resolved.
#[derive(Debug, Clone, Default, Args)]
pub struct GavArgs {
    /// Group of the packaged API.
    #[arg(long = "group-id", value_name = "GROUP")]
    pub group_id: Option<String>,

    /// Artifact of the packaged API.
    #[arg(long = "artifact-id", value_name = "ARTIFACT")]
    pub artifact_id: Option<String>,

    /// Version of the packaged API.
    #[arg(long = "api-version", value_name = "VERSION")]
    pub version: Option<String>,
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `apiscaff create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Project directory every default below is relative to.
    #[arg(
        short = 'C',
        long = "base-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Project base directory"
    )]
    pub base_dir: PathBuf,

    /// Root the spec patterns are evaluated under (default: base dir).
    #[arg(long = "spec-dir", value_name = "DIR")]
    pub spec_dir: Option<PathBuf>,

    /// Spec include pattern; repeatable.
    #[arg(long = "spec-include", value_name = "GLOB")]
    pub spec_includes: Vec<String>,

    /// Spec exclude pattern; repeatable.
    #[arg(long = "spec-exclude", value_name = "GLOB")]
    pub spec_excludes: Vec<String>,

    /// Root the existing-document patterns are evaluated under (default: base dir).
    #[arg(long = "docs-dir", value_name = "DIR")]
    pub docs_dir: Option<PathBuf>,

    /// Existing-document include pattern; repeatable.
    #[arg(long = "docs-include", value_name = "GLOB")]
    pub docs_includes: Vec<String>,

    /// Existing-document exclude pattern; repeatable.
    #[arg(long = "docs-exclude", value_name = "GLOB")]
    pub docs_excludes: Vec<String>,

    /// Directory holding the domain descriptor.
    #[arg(long = "domain-dir", value_name = "DIR")]
    pub domain_dir: Option<PathBuf>,

    /// Where generated configuration documents go.
    #[arg(long = "config-output", value_name = "DIR")]
    pub config_output: Option<PathBuf>,

    /// Where generated resource documents go.
    #[arg(long = "resources-output", value_name = "DIR")]
    pub resources_output: Option<PathBuf>,

    /// Scaffolding configuration (JSON) merged over the defaults.
    #[arg(long = "scaffolding-config", value_name = "FILE")]
    pub scaffolding_config: Option<PathBuf>,

    /// Runtime edition: EE or CE.
    #[arg(long = "runtime-edition", value_name = "EDITION", default_value = "EE")]
    pub runtime_edition: String,

    /// Minimum runtime version the generated flows target.
    #[arg(long = "min-runtime-version", value_name = "VERSION")]
    pub min_runtime_version: Option<String>,

    #[command(flatten)]
    pub gav: GavArgs,

    /// Unpack the resolved archive here instead of reading it in place.
    #[arg(long = "extract-to", value_name = "DIR")]
    pub extract_to: Option<PathBuf>,

    /// Generation engine executable (overrides `engine.program`).
    #[arg(long = "engine", value_name = "PROGRAM")]
    pub engine: Option<PathBuf>,

    /// Argument passed to the engine; repeatable (overrides `engine.args`).
    #[arg(long = "engine-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub engine_args: Vec<String>,
}

// ── resolve ───────────────────────────────────────────────────────────────────

/// Arguments for `apiscaff resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Full descriptor, e.g. `resource::com.acme:orders:1.0.0:fat-raml:zip`.
    #[arg(
        value_name = "DESCRIPTOR",
        conflicts_with_all = ["group_id", "artifact_id", "version"],
        required_unless_present_any = ["group_id", "artifact_id", "version"]
    )]
    pub descriptor: Option<String>,

    #[command(flatten)]
    pub gav: GavArgs,

    /// Unpack the archive here instead of reading it in place.
    #[arg(long = "extract-to", value_name = "DIR")]
    pub extract_to: Option<PathBuf>,
}

// ── extract ───────────────────────────────────────────────────────────────────

/// Arguments for `apiscaff extract`.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Zip archive to unpack.
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Destination directory.
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn create_defaults() {
        let cli = Cli::parse_from(["apiscaff", "create"]);
        let Commands::Create(args) = cli.command else {
            panic!("expected Create command");
        };
        assert_eq!(args.base_dir, PathBuf::from("."));
        assert_eq!(args.runtime_edition, "EE");
        assert!(args.spec_includes.is_empty());
        assert!(args.gav.group_id.is_none());
    }

    #[test]
    fn repeatable_patterns_and_engine_args() {
        let cli = Cli::parse_from([
            "apiscaff",
            "create",
            "--spec-include",
            "a/**/*.raml",
            "--spec-include",
            "b/*.yml",
            "--engine-arg",
            "--strict",
            "--engine-arg",
            "-q",
        ]);
        let Commands::Create(args) = cli.command else {
            panic!("expected Create command");
        };
        assert_eq!(args.spec_includes, ["a/**/*.raml", "b/*.yml"]);
        assert_eq!(args.engine_args, ["--strict", "-q"]);
    }

    #[test]
    fn resolve_takes_descriptor_or_gav() {
        assert!(Cli::try_parse_from(["apiscaff", "resolve", "resource::g:a:1:c:zip"]).is_ok());
        assert!(
            Cli::try_parse_from(["apiscaff", "resolve", "--group-id", "g", "--artifact-id", "a"])
                .is_ok()
        );
        assert!(Cli::try_parse_from(["apiscaff", "resolve"]).is_err());
        assert!(
            Cli::try_parse_from(["apiscaff", "resolve", "resource::g:a:1:c:zip", "--group-id", "g"])
                .is_err()
        );
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["apiscaff", "--quiet", "--verbose", "extract", "a.zip"]);
        assert!(result.is_err());
    }
}
