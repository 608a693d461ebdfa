//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{DownloadApi, FilesApi, OfflineApi, RecycleApi, SearchApi, SharesApi};
use crate::classify::{classify, Exchange, StatusIndicator};
use crate::error::{ApiError, BoxError, Error, Result};
use crate::query::QueryParams;

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Web API base URL (files, search, shares, recycle bin).
pub const DEFAULT_WEB_API: &str = "https://webapi.115.com/";

/// Offline download API base URL.
pub const DEFAULT_OFFLINE_API: &str = "https://115.com/web/lixian/";

/// User agent of the 115 desktop browser, which the web API expects.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36 115Browser/27.0.5.7";

/// Which remote service a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Service {
    WebApi,
    Offline,
}

/// 115 cloud storage client.
///
/// Cheap to clone; clones share one connection pool and are safe to use from
/// many tasks at once.
///
/// # Example
///
/// ```no_run
/// use pan115_client::{Pan115Client, SearchQuery};
///
/// # async fn example() -> pan115_client::Result<()> {
/// let client = Pan115Client::builder()
///     .cookie("UID=...; CID=...; SEID=...")
///     .build()?;
///
/// let result = client.search().search(&SearchQuery::new("holiday")).await?;
/// println!("{} matches", result.count);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Pan115Client {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Web API base URL.
    pub(crate) web_api: Url,
    /// Offline download API base URL.
    pub(crate) offline_api: Url,
    /// Request timeout.
    pub(crate) timeout: Duration,
}

impl Pan115Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the web API base URL.
    pub fn web_api(&self) -> &Url {
        &self.inner.web_api
    }

    /// Get the offline download API base URL.
    pub fn offline_api(&self) -> &Url {
        &self.inner.offline_api
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the files API.
    pub fn files(&self) -> FilesApi {
        FilesApi::new(self.clone())
    }

    /// Access the search API.
    pub fn search(&self) -> SearchApi {
        SearchApi::new(self.clone())
    }

    /// Access the shares API.
    pub fn shares(&self) -> SharesApi {
        SharesApi::new(self.clone())
    }

    /// Access the recycle bin API.
    pub fn recycle(&self) -> RecycleApi {
        RecycleApi::new(self.clone())
    }

    /// Access the offline download API.
    pub fn offline(&self) -> OfflineApi {
        OfflineApi::new(self.clone())
    }

    /// Access the download API.
    pub fn downloads(&self) -> DownloadApi {
        DownloadApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for a path on the web API, or an action on the offline API.
    pub(crate) fn url(&self, service: Service, path: &str) -> Result<Url> {
        match service {
            Service::WebApi => self
                .inner
                .web_api
                .join(path.trim_start_matches('/'))
                .map_err(Error::from),
            Service::Offline => {
                let mut url = self.inner.offline_api.clone();
                url.query_pairs_mut()
                    .append_pair("ct", "lixian")
                    .append_pair("ac", path);
                Ok(url)
            }
        }
    }

    /// Make a GET request.
    pub(crate) async fn get<R>(
        &self,
        service: Service,
        path: &str,
        params: &QueryParams,
        headers: HeaderMap,
    ) -> Result<R>
    where
        R: DeserializeOwned + StatusIndicator,
    {
        let url = self.url(service, path)?;
        tracing::debug!(endpoint = path, params = params.len(), "GET");
        let request = self
            .inner
            .http
            .get(url)
            .query(params)
            .query(&[("format", "json")])
            .headers(headers)
            .timeout(self.inner.timeout);
        self.execute(path, request).await
    }

    /// Make a form-encoded POST request.
    pub(crate) async fn post_form<R>(
        &self,
        service: Service,
        path: &str,
        form: &[(String, String)],
    ) -> Result<R>
    where
        R: DeserializeOwned + StatusIndicator,
    {
        let url = self.url(service, path)?;
        tracing::debug!(endpoint = path, fields = form.len(), "POST");
        let request = self
            .inner
            .http
            .post(url)
            .query(&[("format", "json")])
            .form(form)
            .timeout(self.inner.timeout);
        self.execute(path, request).await
    }

    /// GET an absolute URL and hand back the response for streaming.
    ///
    /// Only the status is checked; the body is left unread.
    pub(crate) async fn fetch(&self, url: &str, headers: HeaderMap) -> Result<reqwest::Response> {
        let url = Url::parse(url)?;
        tracing::debug!(host = url.host_str().unwrap_or(""), "GET file");
        let response = self
            .inner
            .http
            .get(url)
            .headers(headers)
            .timeout(self.inner.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Transport(Box::new(e)))?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "file fetch failed");
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
            }
            .into());
        }
        Ok(response)
    }

    /// Send, decode, classify.
    async fn execute<R>(&self, endpoint: &str, request: reqwest::RequestBuilder) -> Result<R>
    where
        R: DeserializeOwned + StatusIndicator,
    {
        classify(exchange(request).await).inspect_err(|err| {
            tracing::warn!(endpoint, error = %err, "request failed");
        })
    }
}

/// Perform the request and decode the body, without judging the outcome.
async fn exchange<R: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> std::result::Result<Exchange<R>, BoxError> {
    let response = request.send().await?;
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    let body = serde_json::from_slice::<R>(&bytes).map_err(BoxError::from);
    Ok(Exchange::new(status, body))
}

/// Builder for creating a Pan115Client.
#[derive(Debug)]
pub struct ClientBuilder {
    cookie: Option<String>,
    user_agent: Option<String>,
    timeout: Duration,
    web_api: Option<String>,
    offline_api: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            cookie: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            web_api: None,
            offline_api: None,
        }
    }

    /// Set the session cookie (`UID=...; CID=...; SEID=...`).
    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the web API base URL.
    pub fn web_api(mut self, url: impl Into<String>) -> Self {
        self.web_api = Some(url.into());
        self
    }

    /// Override the offline download API base URL.
    pub fn offline_api(mut self, url: impl Into<String>) -> Self {
        self.offline_api = Some(url.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Pan115Client> {
        let web_api = parse_base(self.web_api.as_deref().unwrap_or(DEFAULT_WEB_API))?;
        let offline_api = Url::parse(self.offline_api.as_deref().unwrap_or(DEFAULT_OFFLINE_API))?;

        // Build default headers
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(cookie) = &self.cookie {
            let mut value = HeaderValue::from_str(cookie.trim())
                .map_err(|_| Error::Config("Invalid cookie".to_string()))?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Pan115Client {
            inner: Arc::new(ClientInner {
                http,
                web_api,
                offline_api,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a base URL and make sure relative joins stay under it.
fn parse_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    Ok(url)
}
