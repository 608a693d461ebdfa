//! Offline download API.

use reqwest::header::HeaderMap;

use super::files::{indexed_fields, require_ids};
use crate::client::{Pan115Client, Service};
use crate::error::{Error, Result};
use crate::query::{compose, QueryOption, QueryParams};
use crate::types::{AddedTasks, ClearFlag, OfflineTaskPage};
use crate::wire::{Envelope, RawAddTasks, RawOfflineTaskList};

/// Defaults for the task list.
const TASK_LIST_DEFAULTS: &[(&str, &str)] = &[("page", "1")];

/// Compose the parameters for one task list page; non-positive pages mean the first.
pub fn task_list_params(page: i64) -> QueryParams {
    compose(TASK_LIST_DEFAULTS, &[QueryOption::Page(page)])
}

/// Offline download API client.
pub struct OfflineApi {
    client: Pan115Client,
}

impl OfflineApi {
    pub(crate) fn new(client: Pan115Client) -> Self {
        Self { client }
    }

    /// List one page of offline tasks.
    pub async fn list(&self, page: i64) -> Result<OfflineTaskPage> {
        let raw: RawOfflineTaskList = self
            .client
            .get(
                Service::Offline,
                "task_lists",
                &task_list_params(page),
                HeaderMap::new(),
            )
            .await?;
        Ok(OfflineTaskPage::try_from(raw)?)
    }

    /// Submit http(s), ed2k or magnet URIs for download into `save_dir_id`.
    pub async fn add_uris(&self, uris: &[String], save_dir_id: &str) -> Result<AddedTasks> {
        if uris.is_empty() || uris.iter().any(|u| u.trim().is_empty()) {
            return Err(Error::validation("uris", "at least one non-empty URI is required"));
        }
        let uris: Vec<String> = uris.iter().map(|u| u.trim().to_string()).collect();
        let mut form = indexed_fields("url", &uris);
        let save_dir = match save_dir_id.trim() {
            "" => "0",
            id => id,
        };
        form.push(("wp_path_id".to_string(), save_dir.to_string()));

        let raw: RawAddTasks = self
            .client
            .post_form(Service::Offline, "add_task_urls", &form)
            .await?;
        Ok(AddedTasks::try_from(raw)?)
    }

    /// Delete tasks by info hash, optionally with their downloaded files.
    pub async fn delete(&self, hashes: &[String], delete_files: bool) -> Result<()> {
        require_ids("hashes", hashes)?;
        let mut form = indexed_fields("hash", hashes);
        form.push((
            "flag".to_string(),
            if delete_files { "1" } else { "0" }.to_string(),
        ));
        let _: Envelope = self
            .client
            .post_form(Service::Offline, "task_del", &form)
            .await?;
        Ok(())
    }

    /// Clear tasks in bulk.
    pub async fn clear(&self, flag: ClearFlag) -> Result<()> {
        let form = vec![("flag".to_string(), flag.code().to_string())];
        let _: Envelope = self
            .client
            .post_form(Service::Offline, "task_clear", &form)
            .await?;
        Ok(())
    }
}
