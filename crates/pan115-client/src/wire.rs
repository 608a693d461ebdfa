//! Wire-shape response types.
//!
//! These mirror the JSON the 115 web API actually returns, with every
//! loosely-typed field held as a [`Scalar`] and every array optional. They are
//! only ever produced by one call and consumed by one mapper; see
//! [`crate::mapping`] for the conversion into [`crate::types`].

use serde::Deserialize;
use serde_json::Value;

use crate::classify::{ApiStatus, StatusIndicator};
use crate::scalar::{DecodeError, Scalar};

// ─────────────────────────────────────────────────────────────────────────────
// Status envelope
// ─────────────────────────────────────────────────────────────────────────────

/// Status fields shared by (almost) every endpoint.
///
/// The error code and message go by several names across endpoints, and some
/// responses carry more than one of them, so each spelling is its own field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub state: Scalar,
    #[serde(default)]
    pub errno: Scalar,
    #[serde(default, rename = "errNo")]
    pub err_no: Scalar,
    #[serde(default)]
    pub errcode: Scalar,
    #[serde(default)]
    pub code: Scalar,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub error_msg: Option<Value>,
    #[serde(default)]
    pub msg: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl Envelope {
    fn error_code(&self) -> Result<i64, DecodeError> {
        let fields = [
            ("errno", &self.errno),
            ("errNo", &self.err_no),
            ("errcode", &self.errcode),
            ("code", &self.code),
        ];
        for (field, scalar) in fields {
            let code = scalar.int64(field)?;
            if code != 0 {
                return Ok(code);
            }
        }
        Ok(0)
    }

    fn error_message(&self) -> String {
        [&self.error, &self.error_msg, &self.msg, &self.message]
            .into_iter()
            .flatten()
            .filter_map(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

impl StatusIndicator for Envelope {
    fn status(&self) -> Result<ApiStatus, DecodeError> {
        if self.state.flag("state")? {
            Ok(ApiStatus::Ok)
        } else {
            Ok(ApiStatus::Failed {
                code: self.error_code()?,
                message: self.error_message(),
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Files
// ─────────────────────────────────────────────────────────────────────────────

/// A label attached to a file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLabel {
    #[serde(default)]
    pub id: Scalar,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// One entry of a listing or search page.
///
/// Files carry `fid` (and their parent in `cid`); directories have no `fid`,
/// their own id in `cid` and their parent in `pid`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFileItem {
    #[serde(default)]
    pub fid: Scalar,
    #[serde(default)]
    pub cid: Scalar,
    #[serde(default)]
    pub pid: Scalar,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub s: Scalar,
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub pc: Option<String>,
    #[serde(default)]
    pub m: Scalar,
    #[serde(default)]
    pub fl: Option<Vec<RawLabel>>,
    #[serde(default)]
    pub tp: Scalar,
    #[serde(default)]
    pub te: Scalar,
    #[serde(default)]
    pub ico: Option<String>,
    #[serde(default)]
    pub u: Option<String>,
}

/// An ancestor directory in a listing's breadcrumb.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPathSegment {
    #[serde(default)]
    pub cid: Scalar,
    #[serde(default)]
    pub pid: Scalar,
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /files` and `GET /files/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFileList {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub data: Option<Vec<RawFileItem>>,
    #[serde(default)]
    pub path: Option<Vec<RawPathSegment>>,
    #[serde(default)]
    pub cid: Scalar,
    #[serde(default)]
    pub count: Scalar,
    #[serde(default)]
    pub file_count: Scalar,
    #[serde(default)]
    pub folder_count: Scalar,
    #[serde(default)]
    pub page_size: Scalar,
    #[serde(default)]
    pub offset: Scalar,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub is_asc: Scalar,
}

impl StatusIndicator for RawFileList {
    fn status(&self) -> Result<ApiStatus, DecodeError> {
        self.envelope.status()
    }
}

/// `GET /category/get`. Carries no envelope on success.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFileStat {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub pick_code: Option<String>,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub file_category: Scalar,
    #[serde(default)]
    pub is_mark: Scalar,
    #[serde(default)]
    pub count: Scalar,
    #[serde(default)]
    pub folder_count: Scalar,
    #[serde(default)]
    pub size: Scalar,
    #[serde(default)]
    pub ptime: Scalar,
    #[serde(default)]
    pub utime: Scalar,
    #[serde(default)]
    pub open_time: Scalar,
    #[serde(default)]
    pub paths: Option<Vec<RawStatPath>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatPath {
    #[serde(default)]
    pub file_id: Scalar,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl StatusIndicator for RawFileStat {
    fn status(&self) -> Result<ApiStatus, DecodeError> {
        if !self.envelope.state.is_null() {
            return self.envelope.status();
        }
        Ok(match self.file_name.as_deref() {
            Some(name) if !name.is_empty() => ApiStatus::Ok,
            _ => ApiStatus::Failed {
                code: 0,
                message: "empty stat response".to_string(),
            },
        })
    }
}

/// `POST /files/add`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCreatedDir {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub cid: Scalar,
    #[serde(default)]
    pub cname: Option<String>,
    #[serde(default)]
    pub file_id: Scalar,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl StatusIndicator for RawCreatedDir {
    fn status(&self) -> Result<ApiStatus, DecodeError> {
        self.envelope.status()
    }
}

/// `GET /files/download`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDownloadInfo {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub pickcode: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Scalar,
    #[serde(default)]
    pub file_url: Option<String>,
}

impl StatusIndicator for RawDownloadInfo {
    fn status(&self) -> Result<ApiStatus, DecodeError> {
        let status = self.envelope.status()?;
        let no_url = self.file_url.as_deref().is_none_or(|u| u.trim().is_empty());
        if status == ApiStatus::Ok && no_url {
            return Ok(ApiStatus::Failed {
                code: 0,
                message: "no download URL in response".to_string(),
            });
        }
        Ok(status)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shares
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /share/snap`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawShareSnap {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub data: Option<RawShareSnapData>,
}

impl StatusIndicator for RawShareSnap {
    fn status(&self) -> Result<ApiStatus, DecodeError> {
        self.envelope.status()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawShareSnapData {
    #[serde(default)]
    pub userinfo: Option<RawShareOwner>,
    #[serde(default)]
    pub shareinfo: Option<RawShareInfo>,
    #[serde(default)]
    pub count: Scalar,
    #[serde(default)]
    pub list: Option<Vec<RawSharedFile>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawShareOwner {
    #[serde(default)]
    pub user_id: Scalar,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub face: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawShareInfo {
    #[serde(default)]
    pub snap_id: Scalar,
    #[serde(default)]
    pub share_title: Option<String>,
    #[serde(default)]
    pub file_size: Scalar,
    #[serde(default)]
    pub share_state: Scalar,
    #[serde(default)]
    pub forbid_reason: Option<String>,
    #[serde(default)]
    pub create_time: Scalar,
    #[serde(default)]
    pub expire_time: Scalar,
    #[serde(default)]
    pub receive_count: Scalar,
    #[serde(default)]
    pub auto_renewal: Scalar,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSharedFile {
    #[serde(default)]
    pub fid: Scalar,
    #[serde(default)]
    pub cid: Scalar,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub s: Scalar,
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub t: Scalar,
    #[serde(default)]
    pub ico: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Recycle bin
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /rb`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecycleList {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub count: Scalar,
    #[serde(default)]
    pub offset: Scalar,
    #[serde(default)]
    pub page_size: Scalar,
    #[serde(default)]
    pub data: Option<Vec<RawRecycleItem>>,
}

impl StatusIndicator for RawRecycleList {
    fn status(&self) -> Result<ApiStatus, DecodeError> {
        self.envelope.status()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecycleItem {
    #[serde(default)]
    pub id: Scalar,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default, rename = "type")]
    pub item_type: Scalar,
    #[serde(default)]
    pub file_size: Scalar,
    #[serde(default)]
    pub dtime: Scalar,
    #[serde(default)]
    pub cid: Scalar,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub pick_code: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Offline downloads
// ─────────────────────────────────────────────────────────────────────────────

/// `GET ?ct=lixian&ac=task_lists`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOfflineTaskList {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub page: Scalar,
    #[serde(default)]
    pub page_count: Scalar,
    #[serde(default)]
    pub page_row: Scalar,
    #[serde(default)]
    pub count: Scalar,
    #[serde(default)]
    pub quota: Scalar,
    #[serde(default)]
    pub total: Scalar,
    #[serde(default)]
    pub tasks: Option<Vec<RawOfflineTask>>,
}

impl StatusIndicator for RawOfflineTaskList {
    fn status(&self) -> Result<ApiStatus, DecodeError> {
        self.envelope.status()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOfflineTask {
    #[serde(default)]
    pub info_hash: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Scalar,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub add_time: Scalar,
    #[serde(default)]
    pub peers: Scalar,
    #[serde(default, rename = "rateDownload")]
    pub rate_download: Scalar,
    #[serde(default)]
    pub status: Scalar,
    #[serde(default, rename = "percentDone")]
    pub percent: Scalar,
    #[serde(default)]
    pub last_update: Scalar,
    #[serde(default)]
    pub left_time: Scalar,
    #[serde(default)]
    pub file_id: Scalar,
    #[serde(default)]
    pub delete_file_id: Scalar,
    #[serde(default)]
    pub wp_path_id: Scalar,
    #[serde(default, rename = "move")]
    pub move_state: Scalar,
}

/// `POST ?ct=lixian&ac=add_task_urls`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAddTasks {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub result: Option<Vec<RawAddTaskResult>>,
}

impl StatusIndicator for RawAddTasks {
    fn status(&self) -> Result<ApiStatus, DecodeError> {
        self.envelope.status()
    }
}

/// Per-URI outcome; each carries its own envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAddTaskResult {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub info_hash: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}
