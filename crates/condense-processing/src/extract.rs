//! PDF text extraction stage.
//!
//! Fetches the stored PDF over HTTP, writes the bytes to a uniquely-named
//! transient file, runs the extraction library against it, and removes the
//! transient file on every exit path.

use std::path::Path;
use std::time::Duration;

use tempfile::Builder;
use thiserror::Error;
use tokio::task;

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Blank-line separator between pages in the extracted text.
const PAGE_SEPARATOR: &str = "\n\n";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to fetch PDF: {0}")]
    Fetch(String),

    #[error("No text could be extracted from the PDF")]
    NoText,

    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// PDF text extractor.
#[derive(Clone)]
pub struct PdfTextExtractor {
    client: reqwest::Client,
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfTextExtractor {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Fetch a PDF by URL and extract its text.
    ///
    /// Fails with [`ExtractError::Fetch`] on transport errors or any
    /// non-success HTTP status.
    pub async fn extract_from_url(&self, file_url: &str) -> Result<String, ExtractError> {
        let response = self
            .client
            .get(file_url)
            .send()
            .await
            .map_err(|e| ExtractError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ExtractError::Fetch(format!(
                "fetch returned status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExtractError::Fetch(e.to_string()))?;

        tracing::debug!(size_bytes = bytes.len(), url = %file_url, "PDF fetched");

        // PDF parsing is CPU bound; keep it off the async runtime.
        task::spawn_blocking(move || extract_from_bytes(&bytes))
            .await
            .map_err(|e| ExtractError::Parse(format!("extraction task failed: {}", e)))?
    }
}

/// Extract text from in-memory PDF bytes via a transient file.
pub fn extract_from_bytes(data: &[u8]) -> Result<String, ExtractError> {
    let pages = with_transient_pdf(data, |path| {
        pdf_extract::extract_text_by_pages(path).map_err(|e| ExtractError::Parse(e.to_string()))
    })??;

    let text = join_pages(pages)?;
    tracing::debug!(text_len = text.len(), "PDF text extracted");
    Ok(text)
}

/// Run `f` against a uniquely-named transient copy of `data`.
///
/// The transient file is removed on both the success and failure path;
/// uniqueness comes from the tempfile name so concurrent extractions never
/// collide.
pub fn with_transient_pdf<T>(
    data: &[u8],
    f: impl FnOnce(&Path) -> T,
) -> Result<T, ExtractError> {
    use std::io::Write;

    let mut file = Builder::new().prefix("condense-").suffix(".pdf").tempfile()?;
    file.write_all(data)?;
    file.flush()?;

    let result = f(file.path());

    // Explicit removal; Drop would also delete it if `f` unwinds.
    file.close()?;

    Ok(result)
}

/// Join per-page text with blank lines.
///
/// Pages are trimmed first; zero pages or all-empty pages fail with
/// [`ExtractError::NoText`]. Empty middle pages still participate in the
/// join rule, matching the page-wise separator contract.
pub fn join_pages(pages: Vec<String>) -> Result<String, ExtractError> {
    let trimmed: Vec<&str> = pages.iter().map(|p| p.trim()).collect();

    if trimmed.iter().all(|p| p.is_empty()) {
        return Err(ExtractError::NoText);
    }

    Ok(trimmed.join(PAGE_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_join_pages_trims_and_joins() {
        let pages = vec![
            "  First page.  ".to_string(),
            "Second page.\n".to_string(),
        ];
        assert_eq!(join_pages(pages).unwrap(), "First page.\n\nSecond page.");
    }

    #[test]
    fn test_join_pages_zero_pages_is_no_text() {
        assert!(matches!(join_pages(vec![]), Err(ExtractError::NoText)));
    }

    #[test]
    fn test_join_pages_all_blank_is_no_text() {
        let pages = vec!["   ".to_string(), "\n\t".to_string()];
        assert!(matches!(join_pages(pages), Err(ExtractError::NoText)));
    }

    #[test]
    fn test_join_pages_keeps_empty_middle_page_separator() {
        let pages = vec!["a".to_string(), "  ".to_string(), "b".to_string()];
        assert_eq!(join_pages(pages).unwrap(), "a\n\n\n\nb");
    }

    #[test]
    fn test_transient_file_removed_on_success() {
        let mut seen: Option<PathBuf> = None;
        let value = with_transient_pdf(b"%PDF-1.4", |path| {
            seen = Some(path.to_path_buf());
            assert!(path.exists());
            42
        })
        .unwrap();

        assert_eq!(value, 42);
        assert!(!seen.unwrap().exists());
    }

    #[test]
    fn test_transient_file_removed_on_failure() {
        let mut seen: Option<PathBuf> = None;
        let result: Result<Result<(), String>, _> = with_transient_pdf(b"garbage", |path| {
            seen = Some(path.to_path_buf());
            Err("parser blew up".to_string())
        });

        assert!(result.unwrap().is_err());
        assert!(!seen.unwrap().exists());
    }

    #[test]
    fn test_extract_from_bytes_rejects_garbage() {
        let err = extract_from_bytes(b"definitely not a pdf").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::Parse(_) | ExtractError::NoText
        ));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_fails() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut sock, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = sock.read(&mut buf).await;
                let _ = sock
                    .write_all(
                        b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                    )
                    .await;
            }
        });

        let extractor = PdfTextExtractor::new();
        let err = extractor
            .extract_from_url(&format!("http://{}/missing.pdf", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_fails() {
        let extractor = PdfTextExtractor::new();
        let err = extractor
            .extract_from_url("http://127.0.0.1:1/never.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Fetch(_)));
    }
}
