//! Files API.

use reqwest::header::HeaderMap;

use crate::client::{Pan115Client, Service};
use crate::error::{Error, Result};
use crate::query::{compose, QueryOption, QueryParams};
use crate::types::{CreatedDir, FileStat, Listing};
use crate::wire::{Envelope, RawCreatedDir, RawFileList, RawFileStat};

/// Defaults for `GET /files`.
const LIST_DEFAULTS: &[(&str, &str)] = &[
    ("aid", "1"),
    ("cid", "0"),
    ("o", "user_ptime"),
    ("asc", "0"),
    ("offset", "0"),
    ("show_dir", "1"),
    ("limit", LIST_PAGE_SIZE_STR),
    ("snap", "0"),
    ("natsort", "1"),
    ("record_open_time", "1"),
    ("fc_mix", "0"),
];

/// Page size used when walking a whole directory.
pub const LIST_PAGE_SIZE: i64 = 1000;
const LIST_PAGE_SIZE_STR: &str = "1000";

/// Query parameters for listing a directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    /// Directory to list; empty means the root.
    pub dir_id: String,
    /// Offset into the directory.
    pub offset: i64,
    /// Page size; non-positive uses the default page.
    pub limit: i64,
    /// Sort field (`user_ptime`, `file_name`, `file_size`, ...).
    pub order: String,
    /// Sort direction.
    pub asc: Option<bool>,
}

impl ListQuery {
    pub fn new(dir_id: impl Into<String>) -> Self {
        Self {
            dir_id: dir_id.into(),
            ..Default::default()
        }
    }

    /// The full, ordered option list.
    pub fn options(&self) -> Vec<QueryOption> {
        vec![
            QueryOption::Cid(self.dir_id.clone()),
            QueryOption::Offset(self.offset),
            QueryOption::Limit(self.limit),
            QueryOption::Order(self.order.clone()),
            QueryOption::Asc(self.asc),
        ]
    }
}

/// Compose the parameters for one listing call.
pub fn list_params(query: &ListQuery) -> QueryParams {
    compose(LIST_DEFAULTS, &query.options())
}

/// Indexed form fields, `name[0]=a&name[1]=b`.
pub(crate) fn indexed_fields(name: &str, values: &[String]) -> Vec<(String, String)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("{name}[{i}]"), v.clone()))
        .collect()
}

pub(crate) fn require_ids(field: &'static str, ids: &[String]) -> Result<()> {
    if ids.is_empty() || ids.iter().any(|id| id.trim().is_empty()) {
        return Err(Error::validation(field, "at least one non-empty ID is required"));
    }
    Ok(())
}

/// Files API client.
pub struct FilesApi {
    client: Pan115Client,
}

impl FilesApi {
    pub(crate) fn new(client: Pan115Client) -> Self {
        Self { client }
    }

    /// List one page of a directory.
    pub async fn list(&self, query: &ListQuery) -> Result<Listing> {
        let raw: RawFileList = self
            .client
            .get(Service::WebApi, "files", &list_params(query), HeaderMap::new())
            .await?;
        Ok(Listing::try_from(raw)?)
    }

    /// List a whole directory, page by page.
    pub async fn list_all(&self, dir_id: &str) -> Result<Listing> {
        let mut query = ListQuery::new(dir_id);
        query.limit = LIST_PAGE_SIZE;

        let mut listing = self.list(&query).await?;
        loop {
            let fetched = listing.files.len() as i64;
            if fetched >= listing.count {
                break;
            }
            query.offset = fetched;
            let page = self.list(&query).await?;
            let short = (page.files.len() as i64) < LIST_PAGE_SIZE;
            listing.files.extend(page.files);
            if short {
                break;
            }
        }

        listing.offset = 0;
        listing.page_size = listing.files.len() as i64;
        Ok(listing)
    }

    /// Get details of a file or directory.
    pub async fn stat(&self, file_id: &str) -> Result<FileStat> {
        if file_id.trim().is_empty() {
            return Err(Error::validation("file_id", "must not be empty"));
        }
        let params = QueryParams::from([("cid".to_string(), file_id.trim().to_string())]);
        let raw: RawFileStat = self
            .client
            .get(Service::WebApi, "category/get", &params, HeaderMap::new())
            .await?;
        Ok(FileStat::try_from(raw)?)
    }

    /// Create a directory.
    pub async fn mkdir(&self, parent_id: &str, name: &str) -> Result<CreatedDir> {
        if name.trim().is_empty() {
            return Err(Error::validation("name", "must not be empty"));
        }
        let parent = match parent_id.trim() {
            "" => "0",
            id => id,
        };
        let form = vec![
            ("pid".to_string(), parent.to_string()),
            ("cname".to_string(), name.trim().to_string()),
        ];
        let raw: RawCreatedDir = self
            .client
            .post_form(Service::WebApi, "files/add", &form)
            .await?;
        Ok(CreatedDir::try_from(raw)?)
    }

    /// Move files to the recycle bin.
    pub async fn delete(&self, file_ids: &[String]) -> Result<()> {
        require_ids("file_ids", file_ids)?;
        let form = indexed_fields("fid", file_ids);
        let _: Envelope = self
            .client
            .post_form(Service::WebApi, "rb/delete", &form)
            .await?;
        Ok(())
    }

    /// Rename a file or directory.
    pub async fn rename(&self, file_id: &str, new_name: &str) -> Result<()> {
        if file_id.trim().is_empty() {
            return Err(Error::validation("file_id", "must not be empty"));
        }
        if new_name.trim().is_empty() {
            return Err(Error::validation("new_name", "must not be empty"));
        }
        let form = vec![(
            format!("files_new_name[{}]", file_id.trim()),
            new_name.trim().to_string(),
        )];
        let _: Envelope = self
            .client
            .post_form(Service::WebApi, "files/batch_rename", &form)
            .await?;
        Ok(())
    }

    /// Move files into `dir_id`.
    pub async fn move_to(&self, dir_id: &str, file_ids: &[String]) -> Result<()> {
        self.transfer("files/move", dir_id, file_ids).await
    }

    /// Copy files into `dir_id`.
    pub async fn copy_to(&self, dir_id: &str, file_ids: &[String]) -> Result<()> {
        self.transfer("files/copy", dir_id, file_ids).await
    }

    async fn transfer(&self, path: &str, dir_id: &str, file_ids: &[String]) -> Result<()> {
        require_ids("file_ids", file_ids)?;
        if dir_id.trim().is_empty() {
            return Err(Error::validation("dir_id", "must not be empty"));
        }
        let mut form = vec![("pid".to_string(), dir_id.trim().to_string())];
        form.extend(indexed_fields("fid", file_ids));
        let _: Envelope = self.client.post_form(Service::WebApi, path, &form).await?;
        Ok(())
    }
}
