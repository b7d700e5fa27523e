//! Generation engine run as an external process.
//!
//! The request is written to the process's stdin as one JSON document:
//!
//! ```json
//! { "context": {...}, "apiLocation": "file:///...", "configuration": {...} }
//! ```
//!
//! The process answers on stdout:
//!
//! ```json
//! { "success": true, "configs": [{"name": "api.xml", "content": "..."}], "resources": [], "errors": [] }
//! ```
//!
//! `content` is either a string or, for binary resources, an array of bytes.
//! Stderr is forwarded to the log at debug level.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use apiscaff_core::{
    application::{ApplicationError, ports::GenerationEngine},
    domain::{GeneratedArtifact, ScaffolderContext, ScaffoldingConfiguration, ScaffoldingResult},
    error::ScaffResult,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EngineRequest<'a> {
    context: &'a ScaffolderContext,
    api_location: String,
    configuration: &'a ScaffoldingConfiguration,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EngineResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    configs: Vec<EngineArtifact>,
    #[serde(default)]
    resources: Vec<EngineArtifact>,
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EngineArtifact {
    #[serde(default)]
    name: String,
    content: ArtifactContent,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArtifactContent {
    Text(String),
    Bytes(Vec<u8>),
}

impl From<ArtifactContent> for Vec<u8> {
    fn from(content: ArtifactContent) -> Self {
        match content {
            ArtifactContent::Text(text) => text.into_bytes(),
            ArtifactContent::Bytes(bytes) => bytes,
        }
    }
}

fn default_success() -> bool {
    true
}

impl From<EngineResponse> for ScaffoldingResult {
    fn from(response: EngineResponse) -> Self {
        let convert = |artifacts: Vec<EngineArtifact>| -> Vec<GeneratedArtifact> {
            artifacts
                .into_iter()
                .map(|a| GeneratedArtifact::new(a.name, a.content))
                .collect()
        };
        if response.success {
            ScaffoldingResult::success(convert(response.configs), convert(response.resources))
        } else {
            ScaffoldingResult::failure(response.errors)
        }
    }
}

/// [`GenerationEngine`] that runs an external program once per configuration.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &std::path::Path {
        &self.program
    }
}

impl GenerationEngine for ProcessEngine {
    #[instrument(skip_all, fields(program = %self.program.display(), api = %configuration.api().name()))]
    fn run(
        &self,
        context: &ScaffolderContext,
        configuration: &ScaffoldingConfiguration,
    ) -> ScaffResult<ScaffoldingResult> {
        let api = configuration.api().name().to_string();
        let failed = |reason: String| ApplicationError::GenerationFailed {
            api: api.clone(),
            reason,
        };

        let request = serde_json::to_vec(&EngineRequest {
            context,
            api_location: configuration.api().reference().uri(),
            configuration,
        })
        .map_err(|e| failed(format!("could not encode request: {e}")))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("could not start {}: {e}", self.program.display())))?;

        // stdin is fed from its own thread while stdout and stderr drain.
        let stdin = child.stdin.take();
        let output = std::thread::scope(|scope| {
            let writer = scope.spawn(move || -> std::io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(&request)?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            let written = writer.join().unwrap_or_else(|_| {
                Err(std::io::Error::other("stdin writer panicked"))
            });
            (output, written)
        });
        let (output, written) = output;
        let output = output.map_err(|e| failed(e.to_string()))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            debug!(target: "apiscaff::engine", "{line}");
        }

        if !output.status.success() {
            let detail = stderr.trim();
            return Err(failed(if detail.is_empty() {
                format!("engine exited with {}", output.status)
            } else {
                format!("engine exited with {}: {detail}", output.status)
            })
            .into());
        }
        if let Err(e) = written {
            // A broken pipe only matters when the engine also failed.
            debug!(error = %e, "Engine closed stdin early");
        }

        let response: EngineResponse = serde_json::from_slice(&output.stdout)
            .map_err(|e| failed(format!("invalid engine response: {e}")))?;
        Ok(response.into())
    }
}
