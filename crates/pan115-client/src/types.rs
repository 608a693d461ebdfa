//! Domain types returned by the client.
//!
//! These are the stable shapes handed to tool handlers. Scalars are already
//! decoded into native types and every collection is present, possibly empty.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Files
// ─────────────────────────────────────────────────────────────────────────────

/// A label attached to a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// A file or directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// File ID (directory ID for directories).
    pub file_id: String,
    /// ID of the containing directory.
    pub parent_id: String,
    pub name: String,
    /// Size in bytes; 0 for directories.
    pub size: i64,
    /// Pick code, used to address the file for downloads.
    pub pick_code: String,
    pub sha1: String,
    pub is_directory: bool,
    /// Starred by the user.
    pub star: bool,
    pub labels: Vec<Label>,
    /// Creation time (unix seconds).
    pub create_time: i64,
    /// Last modification time (unix seconds).
    pub update_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
}

/// An ancestor directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub dir_id: String,
    pub parent_id: String,
    pub name: String,
}

/// One page of a directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub dir_id: String,
    /// Total entries in the directory.
    pub count: i64,
    pub offset: i64,
    pub page_size: i64,
    /// Breadcrumb from the root down to `dir_id`.
    pub path: Vec<PathSegment>,
    pub files: Vec<File>,
}

/// Details of a single file or directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileStat {
    pub name: String,
    pub pick_code: String,
    pub sha1: String,
    pub is_directory: bool,
    pub star: bool,
    /// Files contained (directories only).
    pub file_count: i64,
    /// Folders contained (directories only).
    pub folder_count: i64,
    /// Human-readable size as reported by the server.
    pub size: String,
    pub create_time: i64,
    pub update_time: i64,
    pub open_time: i64,
    pub paths: Vec<PathSegment>,
}

/// A directory created by `mkdir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedDir {
    pub dir_id: String,
    pub name: String,
}

/// Where and what to download for a pick code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadInfo {
    pub pick_code: String,
    pub file_name: String,
    /// Size in bytes.
    pub size: i64,
    /// Download URL; only valid with the user agent that requested it.
    pub url: String,
}

/// A file written to local disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadedFile {
    pub file_name: String,
    pub local_path: String,
    /// Bytes written.
    pub size: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

/// A page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub count: i64,
    pub file_count: i64,
    pub folder_count: i64,
    pub offset: i64,
    pub page_size: i64,
    pub order: String,
    pub is_asc: bool,
    pub files: Vec<File>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shares
// ─────────────────────────────────────────────────────────────────────────────

/// The account that published a share.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareOwner {
    pub user_id: String,
    pub user_name: String,
}

/// Share metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareInfo {
    pub snap_id: String,
    pub title: String,
    /// Total size of the shared content in bytes.
    pub file_size: i64,
    pub share_state: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forbid_reason: Option<String>,
    pub create_time: i64,
    /// Expiry (unix seconds); negative or zero means no expiry.
    pub expire_time: i64,
    pub receive_count: i64,
    pub auto_renewal: bool,
}

/// An entry inside a share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedFile {
    pub file_id: String,
    pub parent_id: String,
    pub name: String,
    pub size: i64,
    pub sha1: String,
    pub is_directory: bool,
    pub update_time: i64,
}

/// One page of a share's contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareSnapshot {
    pub owner: ShareOwner,
    pub share: ShareInfo,
    pub count: i64,
    pub files: Vec<SharedFile>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Recycle bin
// ─────────────────────────────────────────────────────────────────────────────

/// A deleted file or directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecycleBinItem {
    pub id: String,
    pub name: String,
    /// Raw item type as reported by the server.
    pub item_type: i32,
    pub size: i64,
    /// Deletion time (unix seconds).
    pub delete_time: i64,
    pub parent_id: String,
    pub parent_name: String,
    pub pick_code: String,
}

/// A page of the recycle bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecycleBinPage {
    pub count: i64,
    pub offset: i64,
    pub page_size: i64,
    pub items: Vec<RecycleBinItem>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Offline downloads
// ─────────────────────────────────────────────────────────────────────────────

/// Offline download task state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfflineTaskStatus {
    Pending,
    Downloading,
    Completed,
    Failed,
    Unknown,
}

impl OfflineTaskStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Pending,
            1 => Self::Downloading,
            2 => Self::Completed,
            -1 => Self::Failed,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Downloading => "downloading",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

/// An offline download task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineTask {
    pub info_hash: String,
    pub name: String,
    pub size: i64,
    pub url: String,
    pub add_time: i64,
    pub peers: i64,
    /// Bytes per second.
    pub rate_download: f64,
    pub status: OfflineTaskStatus,
    pub status_code: i32,
    /// Progress, 0–100.
    pub percent: f64,
    pub update_time: i64,
    /// Estimated seconds remaining.
    pub left_time: i64,
    pub file_id: String,
    pub delete_file_id: String,
    /// Directory the result is saved into.
    pub dir_id: String,
    #[serde(rename = "move")]
    pub move_state: i32,
}

/// A page of offline tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineTaskPage {
    pub total: i64,
    pub count: i64,
    pub page: i64,
    pub page_count: i64,
    pub page_row: i64,
    /// Remaining task quota.
    pub quota: i64,
    pub tasks: Vec<OfflineTask>,
}

/// Outcome of one submitted URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedTask {
    pub url: String,
    pub info_hash: String,
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of submitting URIs for offline download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedTasks {
    pub tasks: Vec<AddedTask>,
}

impl AddedTasks {
    /// Info hashes of the accepted tasks.
    pub fn hashes(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|t| t.accepted)
            .map(|t| t.info_hash.as_str())
            .collect()
    }
}

/// Which offline tasks `clear` removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearFlag {
    Completed,
    All,
    Failed,
    Running,
    CompletedWithFiles,
    AllWithFiles,
}

impl ClearFlag {
    pub fn code(&self) -> i64 {
        match self {
            Self::Completed => 0,
            Self::All => 1,
            Self::Failed => 2,
            Self::Running => 3,
            Self::CompletedWithFiles => 4,
            Self::AllWithFiles => 5,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => Self::Completed,
            1 => Self::All,
            2 => Self::Failed,
            3 => Self::Running,
            4 => Self::CompletedWithFiles,
            5 => Self::AllWithFiles,
            _ => return None,
        })
    }
}
