use std::path::PathBuf;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::COOKIE;

use crate::api::map_reqwest_error;
use crate::filename::download_filename;
use crate::persist::AtomicFileWriter;
use crate::{ApiError, DownloadError, DownloadedFile};

#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub dir: PathBuf,
    pub max_bytes: u64,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Stored cookie text; downloads are session-authenticated like every
    /// other request.
    pub cookie_text: Option<String>,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./downloads"),
            max_bytes: 64 * 1024 * 1024,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            cookie_text: None,
        }
    }
}

/// Saves the file behind a download-type task: streams the content URL with
/// a byte cap and writes it atomically under a deterministic filename.
#[derive(Debug, Clone)]
pub struct FileDownloader {
    settings: DownloadSettings,
}

impl FileDownloader {
    pub fn new(settings: DownloadSettings) -> Self {
        Self { settings }
    }

    pub async fn download(
        &self,
        base_url: &str,
        content_url: &str,
    ) -> Result<DownloadedFile, DownloadError> {
        let url = resolve_url(base_url, content_url)?;

        let client = reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let mut request = client.get(url.clone());
        if let Some(cookie_text) = self.settings.cookie_text.as_deref() {
            request = request.header(COOKIE, cookie_text);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()).into());
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(DownloadError::TooLarge {
                    max_bytes: self.settings.max_bytes,
                    actual: Some(content_len),
                });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| DownloadError::Fetch(map_reqwest_error(err)))?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(DownloadError::TooLarge {
                    max_bytes: self.settings.max_bytes,
                    actual: Some(next_len),
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        let filename = download_filename(&url);
        let writer = AtomicFileWriter::new(self.settings.dir.clone());
        let path = writer
            .write_bytes(&filename, &bytes)
            .map_err(|err| DownloadError::Persist(err.to_string()))?;

        Ok(DownloadedFile {
            path,
            byte_len: bytes.len() as u64,
        })
    }
}

/// Absolute content URLs pass through; server-relative ones (`/media/...`)
/// resolve against the API base, the way a browser would.
fn resolve_url(base_url: &str, content_url: &str) -> Result<reqwest::Url, DownloadError> {
    if let Ok(absolute) = reqwest::Url::parse(content_url) {
        return Ok(absolute);
    }
    let base = reqwest::Url::parse(base_url)
        .map_err(|err| DownloadError::Fetch(ApiError::InvalidUrl(err.to_string())))?;
    base.join(content_url)
        .map_err(|err| DownloadError::Fetch(ApiError::InvalidUrl(err.to_string())))
}
