//! Recycle bin API.

use reqwest::header::HeaderMap;

use super::files::{indexed_fields, require_ids};
use crate::client::{Pan115Client, Service};
use crate::error::Result;
use crate::query::{compose, QueryOption, QueryParams};
use crate::types::RecycleBinPage;
use crate::wire::{Envelope, RawRecycleList};

/// Defaults for `GET /rb`.
const RECYCLE_DEFAULTS: &[(&str, &str)] = &[
    ("aid", "7"),
    ("cid", "0"),
    ("offset", "0"),
    ("limit", "40"),
];

/// Query parameters for listing the recycle bin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecycleQuery {
    /// Offset for pagination.
    pub offset: i64,
    /// Items per page (default 40).
    pub limit: i64,
}

impl RecycleQuery {
    /// The full, ordered option list.
    pub fn options(&self) -> Vec<QueryOption> {
        vec![
            QueryOption::Offset(self.offset),
            QueryOption::Limit(self.limit),
        ]
    }
}

/// Compose the parameters for a recycle bin listing.
pub fn recycle_params(query: &RecycleQuery) -> QueryParams {
    compose(RECYCLE_DEFAULTS, &query.options())
}

/// Recycle bin API client.
pub struct RecycleApi {
    client: Pan115Client,
}

impl RecycleApi {
    pub(crate) fn new(client: Pan115Client) -> Self {
        Self { client }
    }

    /// List deleted items.
    pub async fn list(&self, query: &RecycleQuery) -> Result<RecycleBinPage> {
        let raw: RawRecycleList = self
            .client
            .get(Service::WebApi, "rb", &recycle_params(query), HeaderMap::new())
            .await?;
        Ok(RecycleBinPage::try_from(raw)?)
    }

    /// Restore items to their original location.
    pub async fn revert(&self, item_ids: &[String]) -> Result<()> {
        require_ids("item_ids", item_ids)?;
        let form = indexed_fields("rid", item_ids);
        let _: Envelope = self
            .client
            .post_form(Service::WebApi, "rb/revert", &form)
            .await?;
        Ok(())
    }

    /// Permanently delete items.
    pub async fn clean(&self, password: &str, item_ids: &[String]) -> Result<()> {
        require_ids("item_ids", item_ids)?;
        let mut form = indexed_fields("rid", item_ids);
        form.push(("password".to_string(), password.trim().to_string()));
        let _: Envelope = self
            .client
            .post_form(Service::WebApi, "rb/secret_del", &form)
            .await?;
        Ok(())
    }
}
