//! Wire → domain mapping.
//!
//! Every conversion here is pure. The only failure is a scalar that does not
//! decode, reported as a [`DecodeError`] naming the wire field.

use crate::classify::{ApiStatus, StatusIndicator};
use crate::scalar::DecodeError;
use crate::types::{
    AddedTask, AddedTasks, CreatedDir, DownloadInfo, File, FileStat, Label, Listing, OfflineTask,
    OfflineTaskPage, OfflineTaskStatus, PathSegment, RecycleBinItem, RecycleBinPage,
    SearchResult, ShareInfo, ShareOwner, ShareSnapshot, SharedFile,
};
use crate::wire::{
    RawAddTasks, RawCreatedDir, RawDownloadInfo, RawFileItem, RawFileList, RawFileStat, RawLabel,
    RawOfflineTask, RawOfflineTaskList, RawPathSegment, RawRecycleItem, RawRecycleList,
    RawShareInfo, RawShareOwner, RawShareSnap, RawSharedFile, RawStatPath,
};

/// Map every element, stopping at the first failure. Absent lists map to empty.
fn map_all<R, T>(raw: Option<Vec<R>>) -> Result<Vec<T>, DecodeError>
where
    T: TryFrom<R, Error = DecodeError>,
{
    raw.unwrap_or_default().into_iter().map(T::try_from).collect()
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Files
// ─────────────────────────────────────────────────────────────────────────────

impl TryFrom<RawLabel> for Label {
    type Error = DecodeError;

    fn try_from(raw: RawLabel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id.id("fl.id")?,
            name: text(raw.name),
            color: text(raw.color),
        })
    }
}

impl TryFrom<RawFileItem> for File {
    type Error = DecodeError;

    fn try_from(raw: RawFileItem) -> Result<Self, Self::Error> {
        let fid = raw.fid.id("fid")?;
        let cid = raw.cid.id("cid")?;
        let is_directory = fid.is_empty();
        let (file_id, parent_id) = if is_directory {
            (cid, raw.pid.id("pid")?)
        } else {
            (fid, cid)
        };

        Ok(Self {
            file_id,
            parent_id,
            name: text(raw.n),
            size: raw.s.int64("s")?,
            pick_code: text(raw.pc),
            sha1: text(raw.sha),
            is_directory,
            star: raw.m.flag("m")?,
            labels: map_all(raw.fl)?,
            create_time: raw.tp.int64("tp")?,
            update_time: raw.te.int64("te")?,
            thumb_url: raw.u.filter(|u| !u.is_empty()),
        })
    }
}

impl TryFrom<RawPathSegment> for PathSegment {
    type Error = DecodeError;

    fn try_from(raw: RawPathSegment) -> Result<Self, Self::Error> {
        Ok(Self {
            dir_id: raw.cid.id("path.cid")?,
            parent_id: raw.pid.id("path.pid")?,
            name: text(raw.name),
        })
    }
}

impl TryFrom<RawFileList> for Listing {
    type Error = DecodeError;

    fn try_from(raw: RawFileList) -> Result<Self, Self::Error> {
        Ok(Self {
            dir_id: raw.cid.id("cid")?,
            count: raw.count.int64("count")?,
            offset: raw.offset.int64("offset")?,
            page_size: raw.page_size.int64("page_size")?,
            path: map_all(raw.path)?,
            files: map_all(raw.data)?,
        })
    }
}

impl TryFrom<RawFileList> for SearchResult {
    type Error = DecodeError;

    fn try_from(raw: RawFileList) -> Result<Self, Self::Error> {
        Ok(Self {
            count: raw.count.int64("count")?,
            file_count: raw.file_count.int64("file_count")?,
            folder_count: raw.folder_count.int64("folder_count")?,
            offset: raw.offset.int64("offset")?,
            page_size: raw.page_size.int64("page_size")?,
            order: text(raw.order),
            is_asc: raw.is_asc.flag("is_asc")?,
            files: map_all(raw.data)?,
        })
    }
}

impl TryFrom<RawStatPath> for PathSegment {
    type Error = DecodeError;

    fn try_from(raw: RawStatPath) -> Result<Self, Self::Error> {
        Ok(Self {
            dir_id: raw.file_id.id("paths.file_id")?,
            parent_id: String::new(),
            name: text(raw.file_name),
        })
    }
}

impl TryFrom<RawFileStat> for FileStat {
    type Error = DecodeError;

    fn try_from(raw: RawFileStat) -> Result<Self, Self::Error> {
        let mut paths: Vec<PathSegment> = map_all(raw.paths)?;
        // `paths` lists ancestors root-first without parent links; chain them.
        for i in 1..paths.len() {
            paths[i].parent_id = paths[i - 1].dir_id.clone();
        }

        Ok(Self {
            name: text(raw.file_name),
            pick_code: text(raw.pick_code),
            sha1: text(raw.sha1),
            is_directory: raw.file_category.int("file_category")? == 0,
            star: raw.is_mark.flag("is_mark")?,
            file_count: raw.count.int64("count")?,
            folder_count: raw.folder_count.int64("folder_count")?,
            size: raw.size.id("size")?,
            create_time: raw.ptime.int64("ptime")?,
            update_time: raw.utime.int64("utime")?,
            open_time: raw.open_time.int64("open_time")?,
            paths,
        })
    }
}

impl TryFrom<RawCreatedDir> for CreatedDir {
    type Error = DecodeError;

    fn try_from(raw: RawCreatedDir) -> Result<Self, Self::Error> {
        let dir_id = match raw.cid.id("cid")? {
            id if id.is_empty() => raw.file_id.id("file_id")?,
            id => id,
        };
        let name = raw
            .cname
            .filter(|n| !n.is_empty())
            .or(raw.file_name)
            .unwrap_or_default();
        Ok(Self { dir_id, name })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shares
// ─────────────────────────────────────────────────────────────────────────────

impl TryFrom<RawShareOwner> for ShareOwner {
    type Error = DecodeError;

    fn try_from(raw: RawShareOwner) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: raw.user_id.id("userinfo.user_id")?,
            user_name: text(raw.user_name),
        })
    }
}

impl TryFrom<RawShareInfo> for ShareInfo {
    type Error = DecodeError;

    fn try_from(raw: RawShareInfo) -> Result<Self, Self::Error> {
        Ok(Self {
            snap_id: raw.snap_id.id("shareinfo.snap_id")?,
            title: text(raw.share_title),
            file_size: raw.file_size.int64("shareinfo.file_size")?,
            share_state: raw.share_state.int("shareinfo.share_state")?,
            forbid_reason: raw.forbid_reason.filter(|r| !r.is_empty()),
            create_time: raw.create_time.int64("shareinfo.create_time")?,
            expire_time: raw.expire_time.int64("shareinfo.expire_time")?,
            receive_count: raw.receive_count.int64("shareinfo.receive_count")?,
            auto_renewal: raw.auto_renewal.flag("shareinfo.auto_renewal")?,
        })
    }
}

impl TryFrom<RawSharedFile> for SharedFile {
    type Error = DecodeError;

    fn try_from(raw: RawSharedFile) -> Result<Self, Self::Error> {
        let fid = raw.fid.id("list.fid")?;
        let cid = raw.cid.id("list.cid")?;
        let is_directory = fid.is_empty();
        let (file_id, parent_id) = if is_directory {
            (cid, String::new())
        } else {
            (fid, cid)
        };

        Ok(Self {
            file_id,
            parent_id,
            name: text(raw.n),
            size: raw.s.int64("list.s")?,
            sha1: text(raw.sha),
            is_directory,
            update_time: raw.t.int64("list.t")?,
        })
    }
}

impl TryFrom<RawShareSnap> for ShareSnapshot {
    type Error = DecodeError;

    fn try_from(raw: RawShareSnap) -> Result<Self, Self::Error> {
        let data = raw.data.unwrap_or_default();
        Ok(Self {
            owner: data.userinfo.map(ShareOwner::try_from).transpose()?.unwrap_or_default(),
            share: data.shareinfo.map(ShareInfo::try_from).transpose()?.unwrap_or_default(),
            count: data.count.int64("count")?,
            files: map_all(data.list)?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Recycle bin
// ─────────────────────────────────────────────────────────────────────────────

impl TryFrom<RawRecycleItem> for RecycleBinItem {
    type Error = DecodeError;

    fn try_from(raw: RawRecycleItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id.id("id")?,
            name: text(raw.file_name),
            item_type: raw.item_type.int("type")?,
            size: raw.file_size.int64("file_size")?,
            delete_time: raw.dtime.int64("dtime")?,
            parent_id: raw.cid.id("cid")?,
            parent_name: text(raw.parent_name),
            pick_code: text(raw.pick_code),
        })
    }
}

impl TryFrom<RawRecycleList> for RecycleBinPage {
    type Error = DecodeError;

    fn try_from(raw: RawRecycleList) -> Result<Self, Self::Error> {
        Ok(Self {
            count: raw.count.int64("count")?,
            offset: raw.offset.int64("offset")?,
            page_size: raw.page_size.int64("page_size")?,
            items: map_all(raw.data)?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Offline downloads
// ─────────────────────────────────────────────────────────────────────────────

impl TryFrom<RawOfflineTask> for OfflineTask {
    type Error = DecodeError;

    fn try_from(raw: RawOfflineTask) -> Result<Self, Self::Error> {
        let status_code = raw.status.int("status")?;
        Ok(Self {
            info_hash: text(raw.info_hash),
            name: text(raw.name),
            size: raw.size.int64("size")?,
            url: text(raw.url),
            add_time: raw.add_time.int64("add_time")?,
            peers: raw.peers.int64("peers")?,
            rate_download: raw.rate_download.float("rateDownload")?,
            status: OfflineTaskStatus::from_code(status_code),
            status_code,
            percent: raw.percent.float("percentDone")?,
            update_time: raw.last_update.int64("last_update")?,
            left_time: raw.left_time.int64("left_time")?,
            file_id: raw.file_id.id("file_id")?,
            delete_file_id: raw.delete_file_id.id("delete_file_id")?,
            dir_id: raw.wp_path_id.id("wp_path_id")?,
            move_state: raw.move_state.int("move")?,
        })
    }
}

impl TryFrom<RawOfflineTaskList> for OfflineTaskPage {
    type Error = DecodeError;

    fn try_from(raw: RawOfflineTaskList) -> Result<Self, Self::Error> {
        Ok(Self {
            total: raw.total.int64("total")?,
            count: raw.count.int64("count")?,
            page: raw.page.int64("page")?,
            page_count: raw.page_count.int64("page_count")?,
            page_row: raw.page_row.int64("page_row")?,
            quota: raw.quota.int64("quota")?,
            tasks: map_all(raw.tasks)?,
        })
    }
}

impl TryFrom<RawDownloadInfo> for DownloadInfo {
    type Error = DecodeError;

    fn try_from(raw: RawDownloadInfo) -> Result<Self, Self::Error> {
        Ok(Self {
            pick_code: text(raw.pickcode),
            file_name: text(raw.file_name),
            size: raw.file_size.int64("file_size")?,
            url: text(raw.file_url),
        })
    }
}

impl TryFrom<RawAddTasks> for AddedTasks {
    type Error = DecodeError;

    fn try_from(raw: RawAddTasks) -> Result<Self, Self::Error> {
        let tasks = raw
            .result
            .unwrap_or_default()
            .into_iter()
            .map(|item| {
                let (accepted, error_code, error) = match item.envelope.status()? {
                    ApiStatus::Ok => (true, None, None),
                    ApiStatus::Failed { code, message } => (false, Some(code), Some(message)),
                };
                Ok(AddedTask {
                    url: text(item.url),
                    info_hash: text(item.info_hash),
                    accepted,
                    error_code,
                    error,
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;
        Ok(Self { tasks })
    }
}
