//! HTTP transport for remote repositories.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Connection timeout per remote. Body transfer has no deadline.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// One artifact download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    /// Bearer token sent as `Authorization`.
    pub token: Option<String>,
}

/// Errors arising from artifact downloads.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("download failed for {url}: {reason}")]
    Http { url: String, reason: String },

    /// HTTP 404.
    #[error("artifact not found: {url}")]
    NotFound { url: String },

    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches artifacts over HTTP. Mocked in tests.
#[cfg_attr(test, mockall::automock)]
pub trait HttpTransport: Send + Sync {
    /// Download `request.url` into `dest`.
    fn fetch(&self, request: &DownloadRequest, dest: &Path) -> Result<(), TransportError>;
}

/// [`HttpTransport`] using a shared `ureq` agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl HttpTransport for UreqTransport {
    fn fetch(&self, request: &DownloadRequest, dest: &Path) -> Result<(), TransportError> {
        let mut call = http_agent().get(&request.url);
        if let Some(token) = &request.token {
            call = call.header("Authorization", format!("Bearer {token}"));
        }
        let response = call.call().map_err(|e| map_ureq_error(&request.url, &e))?;

        let mut file = std::fs::File::create(dest)?;
        std::io::copy(&mut response.into_body().as_reader(), &mut file)?;
        Ok(())
    }
}

fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_connect(Some(CONNECT_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

fn map_ureq_error(url: &str, err: &ureq::Error) -> TransportError {
    match err {
        ureq::Error::StatusCode(404) => TransportError::NotFound {
            url: url.to_owned(),
        },
        other => TransportError::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
