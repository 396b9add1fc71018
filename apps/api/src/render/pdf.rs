//! HTML-to-PDF conversion via an external `wkhtmltopdf` binary.
//!
//! The conversion runs once per download request with no timeout; a hung
//! converter hangs the request. A missing binary or nonzero exit fails the
//! request outright — PDF export has no fallback.

use std::process::Stdio;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to run converter: {0}")]
    Io(#[from] std::io::Error),

    #[error("converter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// An HTML-to-PDF conversion facility.
///
/// Carried in `AppState` as `Arc<dyn PdfConverter>`.
#[async_trait]
pub trait PdfConverter: Send + Sync {
    async fn convert(&self, html: &str) -> Result<Bytes, PdfError>;
}

/// Production converter: pipes HTML to `wkhtmltopdf - -` and collects the PDF
/// bytes from stdout.
#[derive(Clone)]
pub struct WkhtmltopdfConverter {
    bin: String,
}

impl WkhtmltopdfConverter {
    pub fn new(bin: String) -> Self {
        Self { bin }
    }
}

#[async_trait]
impl PdfConverter for WkhtmltopdfConverter {
    async fn convert(&self, html: &str) -> Result<Bytes, PdfError> {
        let mut child = Command::new(&self.bin)
            .args(["--quiet", "--encoding", "utf-8", "-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // stdin is piped above, so take() cannot fail. A converter that exits
        // before draining stdin breaks the pipe; the exit status decides.
        if let Some(mut stdin) = child.stdin.take() {
            let _ = stdin.write_all(html.as_bytes()).await;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(PdfError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        debug!("converted {} bytes of HTML to PDF", html.len());
        Ok(Bytes::from(output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_an_io_error() {
        let converter =
            WkhtmltopdfConverter::new("definitely-not-a-real-pdf-binary".to_string());
        let result = converter.convert("<html></html>").await;
        assert!(matches!(result, Err(PdfError::Io(_))));
    }

    #[tokio::test]
    async fn test_nonzero_exit_surfaces_stderr() {
        // `false` ignores stdin and exits 1 with empty output on any platform
        // this test suite runs on.
        let converter = WkhtmltopdfConverter::new("false".to_string());
        match converter.convert("<html></html>").await {
            Err(PdfError::Failed { status, .. }) => assert!(status.contains('1')),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
