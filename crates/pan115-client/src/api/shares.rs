//! Shares API.

use reqwest::header::{HeaderMap, HeaderValue, REFERER};

use crate::client::{Pan115Client, Service};
use crate::error::{Error, Result};
use crate::query::{compose, QueryOption, QueryParams};
use crate::types::ShareSnapshot;
use crate::wire::RawShareSnap;

/// Defaults for `GET /share/snap`.
const SHARE_SNAP_DEFAULTS: &[(&str, &str)] = &[("limit", "20"), ("offset", "0"), ("asc", "0")];

/// Public share page, used as the referer of snapshot requests.
const SHARE_PAGE: &str = "https://115cdn.com/s/";

/// Referer header value for a share.
pub fn share_referer(share_code: &str, receive_code: &str) -> String {
    format!("{SHARE_PAGE}{share_code}?password={receive_code}&")
}

/// Query parameters for a share snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShareSnapQuery {
    /// Share code (required).
    pub share_code: String,
    /// Receive code (password).
    pub receive_code: String,
    /// Directory inside the share; empty means the share root.
    pub dir_id: String,
    /// Offset for pagination.
    pub offset: i64,
    /// Items per page (default 20).
    pub limit: i64,
}

impl ShareSnapQuery {
    pub fn new(share_code: impl Into<String>, receive_code: impl Into<String>) -> Self {
        Self {
            share_code: share_code.into(),
            receive_code: receive_code.into(),
            ..Default::default()
        }
    }

    /// The full, ordered option list.
    pub fn options(&self) -> Vec<QueryOption> {
        vec![
            QueryOption::Limit(self.limit),
            QueryOption::Offset(self.offset),
        ]
    }
}

/// Compose the parameters for a snapshot call.
pub fn share_snap_params(query: &ShareSnapQuery) -> Result<QueryParams> {
    let share_code = query.share_code.trim();
    if share_code.is_empty() {
        return Err(Error::validation("share_code", "must not be empty"));
    }

    let mut params = compose(SHARE_SNAP_DEFAULTS, &query.options());
    params.insert("share_code".to_string(), share_code.to_string());
    params.insert(
        "receive_code".to_string(),
        query.receive_code.trim().to_string(),
    );
    params.insert("cid".to_string(), query.dir_id.trim().to_string());
    Ok(params)
}

/// Shares API client.
pub struct SharesApi {
    client: Pan115Client,
}

impl SharesApi {
    pub(crate) fn new(client: Pan115Client) -> Self {
        Self { client }
    }

    /// Browse the contents of a share.
    pub async fn snapshot(&self, query: &ShareSnapQuery) -> Result<ShareSnapshot> {
        let params = share_snap_params(query)?;
        let referer = share_referer(query.share_code.trim(), query.receive_code.trim());

        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&referer)
            .map_err(|_| Error::validation("share_code", "contains invalid characters"))?;
        headers.insert(REFERER, value);

        let raw: RawShareSnap = self
            .client
            .get(Service::WebApi, "share/snap", &params, headers)
            .await?;
        Ok(ShareSnapshot::try_from(raw)?)
    }
}
