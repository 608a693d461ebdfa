//! Download API.

use std::path::Path;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tokio::io::AsyncWriteExt;

use crate::client::{Pan115Client, Service};
use crate::error::{ApiError, Error, Result};
use crate::query::QueryParams;
use crate::types::{DownloadInfo, DownloadedFile};
use crate::wire::RawDownloadInfo;

/// Download API client.
pub struct DownloadApi {
    client: Pan115Client,
}

impl DownloadApi {
    pub(crate) fn new(client: Pan115Client) -> Self {
        Self { client }
    }

    /// Resolve a pick code to a download URL.
    ///
    /// The URL is bound to the user agent that requested it, so pass the
    /// same one to whatever fetches the file.
    pub async fn info(&self, pick_code: &str, user_agent: Option<&str>) -> Result<DownloadInfo> {
        let pick_code = pick_code.trim();
        if pick_code.is_empty() {
            return Err(Error::validation("pick_code", "pick code is required"));
        }

        let mut params = QueryParams::new();
        params.insert("pickcode".to_string(), pick_code.to_string());

        let raw: RawDownloadInfo = self
            .client
            .get(Service::WebApi, "files/download", &params, agent_header(user_agent)?)
            .await?;
        let mut info = DownloadInfo::try_from(raw)?;
        if info.pick_code.is_empty() {
            info.pick_code = pick_code.to_string();
        }
        Ok(info)
    }

    /// Download a file to `local_path`.
    ///
    /// The local file is only created once the file server has answered
    /// with a success status.
    pub async fn download_to(
        &self,
        pick_code: &str,
        local_path: &Path,
        user_agent: Option<&str>,
    ) -> Result<DownloadedFile> {
        if local_path.as_os_str().is_empty() {
            return Err(Error::validation("local_path", "local path is required"));
        }

        let info = self.info(pick_code, user_agent).await?;
        tracing::debug!(file = %info.file_name, size = info.size, "downloading");

        let mut response = self.client.fetch(&info.url, agent_header(user_agent)?).await?;

        let display_path = local_path.display().to_string();
        let local_err = |source| Error::LocalFile {
            path: display_path.clone(),
            source,
        };

        let mut file = tokio::fs::File::create(local_path)
            .await
            .map_err(local_err)?;
        let mut written: i64 = 0;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ApiError::Transport(Box::new(e)))?
        {
            file.write_all(&chunk).await.map_err(local_err)?;
            written += chunk.len() as i64;
        }
        file.flush().await.map_err(local_err)?;

        tracing::info!(file = %info.file_name, path = %display_path, bytes = written, "download complete");
        Ok(DownloadedFile {
            file_name: info.file_name,
            local_path: display_path,
            size: written,
        })
    }
}

/// Headers carrying an optional user agent override.
fn agent_header(user_agent: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(agent) = user_agent.map(str::trim).filter(|a| !a.is_empty()) {
        let value = HeaderValue::from_str(agent)
            .map_err(|_| Error::Config("Invalid user agent".to_string()))?;
        headers.insert(USER_AGENT, value);
    }
    Ok(headers)
}
