//! API endpoint implementations.

mod download;
mod files;
mod offline;
mod recycle;
mod search;
mod shares;

pub use download::DownloadApi;
pub use files::{list_params, FilesApi, ListQuery, LIST_PAGE_SIZE};
pub use offline::{task_list_params, OfflineApi};
pub use recycle::{recycle_params, RecycleApi, RecycleQuery};
pub use search::{search_params, SearchApi, SearchQuery};
pub use shares::{share_referer, share_snap_params, ShareSnapQuery, SharesApi};
