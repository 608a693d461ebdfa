//! Search API.

use reqwest::header::HeaderMap;

use crate::client::{Pan115Client, Service};
use crate::error::Result;
use crate::query::{compose, QueryOption, QueryParams};
use crate::types::SearchResult;
use crate::wire::RawFileList;

/// Defaults for `GET /files/search`.
const SEARCH_DEFAULTS: &[(&str, &str)] = &[
    ("aid", "7"),
    ("cid", "0"),
    ("offset", "0"),
    ("limit", "30"),
    ("type", "0"),
    ("count_folders", "1"),
    ("o", "file_name"),
    ("asc", "1"),
];

/// Query parameters for a search.
///
/// Zero, negative and empty fields fall back to the endpoint defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Search keyword.
    pub search_value: String,
    /// Offset for pagination.
    pub offset: i64,
    /// Maximum results (default 30).
    pub limit: i64,
    /// File type filter: 1 folder, 2 document, 3 image, 4 video, 5 audio, 6 archive.
    pub file_type: i64,
    /// Sort field (`file_name`, `user_ptime`, ...).
    pub order: String,
    /// Sort direction.
    pub asc: Option<bool>,
    /// Restrict to a directory.
    pub cid: String,
    /// Storage area.
    pub aid: String,
    /// Date filter.
    pub date: String,
    /// Restrict to a pick code.
    pub pick_code: String,
    /// File suffix filter (`mkv`, `pdf`, ...).
    pub suffix: String,
    /// Starred files only.
    pub star: String,
    /// Source filter.
    pub source: String,
    /// Whether folders are counted.
    pub count_folders: i64,
}

impl SearchQuery {
    pub fn new(search_value: impl Into<String>) -> Self {
        Self {
            search_value: search_value.into(),
            ..Default::default()
        }
    }

    /// The full, ordered option list.
    pub fn options(&self) -> Vec<QueryOption> {
        vec![
            QueryOption::Offset(self.offset),
            QueryOption::Limit(self.limit),
            QueryOption::SearchValue(self.search_value.clone()),
            QueryOption::Date(self.date.clone()),
            QueryOption::Aid(self.aid.clone()),
            QueryOption::Cid(self.cid.clone()),
            QueryOption::PickCode(self.pick_code.clone()),
            QueryOption::FileType(self.file_type),
            QueryOption::CountFolders(self.count_folders),
            QueryOption::Source(self.source.clone()),
            QueryOption::Star(self.star.clone()),
            QueryOption::Suffix(self.suffix.clone()),
            QueryOption::Order(self.order.clone()),
            QueryOption::Asc(self.asc),
        ]
    }
}

/// Compose the parameters for a search from raw options.
pub fn search_params(options: &[QueryOption]) -> QueryParams {
    compose(SEARCH_DEFAULTS, options)
}

/// Search API client.
pub struct SearchApi {
    client: Pan115Client,
}

impl SearchApi {
    pub(crate) fn new(client: Pan115Client) -> Self {
        Self { client }
    }

    /// Search files and directories.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        self.search_with_options(&query.options()).await
    }

    /// Search with an explicit option list.
    pub async fn search_with_options(&self, options: &[QueryOption]) -> Result<SearchResult> {
        let raw: RawFileList = self
            .client
            .get(
                Service::WebApi,
                "files/search",
                &search_params(options),
                HeaderMap::new(),
            )
            .await?;
        Ok(SearchResult::try_from(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_value_only() {
        let params = search_params(&SearchQuery::new("foo").options());
        let expected: QueryParams = [
            ("aid", "7"),
            ("cid", "0"),
            ("offset", "0"),
            ("limit", "30"),
            ("type", "0"),
            ("count_folders", "1"),
            ("o", "file_name"),
            ("asc", "1"),
            ("search_value", "foo"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(params, expected);
    }

    #[test]
    fn test_no_options_is_defaults() {
        let params = search_params(&[]);
        assert_eq!(params.len(), SEARCH_DEFAULTS.len());
        assert!(!params.contains_key("search_value"));
    }

    #[test]
    fn test_filters_and_sorting() {
        let query = SearchQuery {
            search_value: "report".into(),
            limit: 100,
            offset: 30,
            file_type: 2,
            suffix: "pdf".into(),
            order: "user_ptime".into(),
            asc: Some(false),
            ..Default::default()
        };
        let params = search_params(&query.options());
        assert_eq!(params["limit"], "100");
        assert_eq!(params["offset"], "30");
        assert_eq!(params["type"], "2");
        assert_eq!(params["suffix"], "pdf");
        assert_eq!(params["o"], "user_ptime");
        assert_eq!(params["asc"], "0");
    }

    #[test]
    fn test_non_positive_limit_keeps_default() {
        let query = SearchQuery {
            limit: -3,
            ..SearchQuery::new("x")
        };
        assert_eq!(search_params(&query.options())["limit"], "30");
    }
}
